use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::config::WalkerConfig;

/// Draw layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Grid,
    Hero,
    Foreground,
}

impl Layer {
    pub const fn z(self) -> f32 {
        match self {
            Self::Background => 0.0,
            Self::Grid => 1.0,
            Self::Hero => 2.0,
            Self::Foreground => 3.0,
        }
    }
}

#[derive(Component)]
pub struct GridStroke;

#[derive(Component)]
pub struct LevelImage(pub Layer);

/// Canvas pixels (origin top-left, y down) to world units (origin centered, y up).
pub fn canvas_to_world(point: Vec2, config: &WalkerConfig) -> Vec2 {
    Vec2::new(
        point.x - config.game_width() / 2.0,
        config.game_height() / 2.0 - point.y,
    )
}

/// Strokes outlining every tile, in canvas pixels.
///
/// Neighbouring tiles share their edges, so the grid is `columns + 1`
/// vertical and `rows + 1` horizontal strokes spanning the whole level.
pub fn grid_stroke_rects(config: &WalkerConfig) -> Vec<Rect> {
    let width = config.game_width();
    let height = config.game_height();
    let stroke = config.grid_stroke_width;

    let vertical = (0..=config.columns).map(|column| {
        let x = column as f32 * config.tile_size;
        Rect::from_center_size(Vec2::new(x, height / 2.0), Vec2::new(stroke, height))
    });
    let horizontal = (0..=config.rows).map(|row| {
        let y = row as f32 * config.tile_size;
        Rect::from_center_size(Vec2::new(width / 2.0, y), Vec2::new(width, stroke))
    });

    vertical.chain(horizontal).collect()
}

pub fn spawn_world(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<WalkerConfig>,
) {
    let top_left = canvas_to_world(Vec2::ZERO, &config);

    commands.spawn((
        Sprite {
            anchor: Anchor::TopLeft,
            ..Sprite::from_image(asset_server.load(config.background_path))
        },
        Transform::from_translation(top_left.extend(Layer::Background.z())),
        LevelImage(Layer::Background),
    ));

    let strokes = grid_stroke_rects(&config);
    let stroke_count = strokes.len();
    for rect in strokes {
        commands.spawn((
            Sprite::from_color(config.grid_color, rect.size()),
            Transform::from_translation(
                canvas_to_world(rect.center(), &config).extend(Layer::Grid.z()),
            ),
            GridStroke,
        ));
    }

    commands.spawn((
        Sprite {
            anchor: Anchor::TopLeft,
            ..Sprite::from_image(asset_server.load(config.foreground_path))
        },
        Transform::from_translation(top_left.extend(Layer::Foreground.z())),
        LevelImage(Layer::Foreground),
    ));

    info!(
        "World spawned: {}x{} tiles of {}px, {stroke_count} grid strokes",
        config.columns, config.rows, config.tile_size
    );
}
