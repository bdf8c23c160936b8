use bevy::prelude::*;
use strum::IntoEnumIterator;
use thiserror::Error;
use walker_helpers::input::Direction;

use crate::hero::AnimationRows;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Tile size must be a positive number of pixels, got {0}")]
    InvalidTileSize(f32),

    #[error("Grid needs at least one tile, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },

    #[error("Hero start tile {tile} lies outside the {columns}x{rows} grid")]
    StartOutsideGrid { tile: UVec2, columns: u32, rows: u32 },

    #[error("Hero speed must be a positive number of pixels per second, got {0}")]
    InvalidSpeed(f32),

    #[error("Animation interval must be a positive number of milliseconds, got {0}")]
    InvalidAnimationInterval(f32),

    #[error("Animation frame {max_frame} does not fit a sheet {columns} frames wide")]
    FrameOutsideSheet { max_frame: u32, columns: u32 },

    #[error("Animation row {row} for {direction} does not fit a sheet {rows} rows tall")]
    RowOutsideSheet {
        direction: Direction,
        row: u32,
        rows: u32,
    },
}

/// Resource holding every tunable of the demo.
#[derive(Resource, Debug, Clone)]
pub struct WalkerConfig {
    // Grid
    /// Edge length of a square tile in pixels
    pub tile_size: f32,
    /// Number of tile columns
    pub columns: u32,
    /// Number of tile rows
    pub rows: u32,
    /// Color of the grid strokes
    pub grid_color: Color,
    /// Width of a grid stroke in pixels
    pub grid_stroke_width: f32,

    // Hero
    /// Tile the hero starts on
    pub hero_start_tile: UVec2,
    /// Travel speed in pixels per second
    pub hero_speed: f32,

    // Sprite sheet
    /// Size of a single animation frame in the sheet
    pub hero_frame_size: UVec2,
    /// Frames per row in the sheet
    pub hero_sheet_columns: u32,
    /// Rows in the sheet
    pub hero_sheet_rows: u32,
    /// Last walk frame; columns `0..=hero_max_frame` are cycled while moving
    pub hero_max_frame: u32,
    /// Walk animation row for each direction
    pub hero_rows: AnimationRows,

    // Timing
    /// Accumulated time between two animation frame advances (milliseconds)
    pub animation_interval_ms: f32,

    // Assets
    pub background_path: &'static str,
    pub foreground_path: &'static str,
    pub hero_sheet_path: &'static str,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            columns: 15,
            rows: 20,
            grid_color: Color::srgba(0.0, 0.0, 0.0, 0.35),
            grid_stroke_width: 1.0,

            hero_start_tile: UVec2::new(1, 2),
            hero_speed: 100.0,

            // Universal LPC layout: 13x21 frames of 64px, walk cycles on rows 8 to 11
            hero_frame_size: UVec2::new(64, 64),
            hero_sheet_columns: 13,
            hero_sheet_rows: 21,
            hero_max_frame: 8,
            hero_rows: AnimationRows {
                up: 8,
                left: 9,
                down: 10,
                right: 11,
            },

            animation_interval_ms: 120.0,

            background_path: "background.png",
            foreground_path: "foreground.png",
            hero_sheet_path: "hero.png",
        }
    }
}

impl WalkerConfig {
    pub fn game_width(&self) -> f32 {
        self.tile_size * self.columns as f32
    }

    pub fn game_height(&self) -> f32 {
        self.tile_size * self.rows as f32
    }

    /// Top-left pixel of the hero's starting tile.
    pub fn hero_start_position(&self) -> Vec2 {
        self.hero_start_tile.as_vec2() * self.tile_size
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.tile_size) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.hero_start_tile.x >= self.columns || self.hero_start_tile.y >= self.rows {
            return Err(ConfigError::StartOutsideGrid {
                tile: self.hero_start_tile,
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !is_positive(self.hero_speed) {
            return Err(ConfigError::InvalidSpeed(self.hero_speed));
        }
        if !is_positive(self.animation_interval_ms) {
            return Err(ConfigError::InvalidAnimationInterval(
                self.animation_interval_ms,
            ));
        }
        if self.hero_max_frame >= self.hero_sheet_columns {
            return Err(ConfigError::FrameOutsideSheet {
                max_frame: self.hero_max_frame,
                columns: self.hero_sheet_columns,
            });
        }
        for direction in Direction::iter() {
            let row = self.hero_rows.row(direction);
            if row >= self.hero_sheet_rows {
                return Err(ConfigError::RowOutsideSheet {
                    direction,
                    row,
                    rows: self.hero_sheet_rows,
                });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
