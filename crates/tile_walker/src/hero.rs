use bevy::prelude::*;
use bevy::sprite::Anchor;
use walker_helpers::input::{Direction, HeldDirections};

use crate::config::WalkerConfig;
use crate::movement::Movable;
use crate::timing::EventGate;
use crate::world::{Layer, canvas_to_world};

/// Sprite sheet row holding the walk cycle for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRows {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
}

impl AnimationRows {
    pub const fn row(self, direction: Direction) -> u32 {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Region of the sprite sheet currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    /// Animation frame, `0..=max_frame`
    pub column: u32,
    /// Facing direction row
    pub row: u32,
    /// Source frame size in pixels
    pub width: u32,
    pub height: u32,
    pub max_frame: u32,
}

impl SpriteFrame {
    fn advance(&mut self) {
        self.column = if self.column < self.max_frame {
            self.column + 1
        } else {
            0
        };
    }

    pub const fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub const fn atlas_index(&self, sheet_columns: u32) -> usize {
        (self.row * sheet_columns + self.column) as usize
    }
}

#[derive(Component, Debug, Clone)]
pub struct Hero {
    /// Pixels per second
    pub speed: f32,
    pub tile_size: f32,
    pub sprite: SpriteFrame,
    pub rows: AnimationRows,
    moving: bool,
}

impl Hero {
    pub fn new(config: &WalkerConfig) -> Self {
        Self {
            speed: config.hero_speed,
            tile_size: config.tile_size,
            sprite: SpriteFrame {
                column: 0,
                row: config.hero_rows.down,
                width: config.hero_frame_size.x,
                height: config.hero_frame_size.y,
                max_frame: config.hero_max_frame,
            },
            rows: config.hero_rows,
            moving: false,
        }
    }

    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Advances the hero by one frame of `delta_ms` milliseconds.
    ///
    /// Once the current destination is reached, the most recently held
    /// direction picks the next tile. Returns that direction when a new step
    /// starts. The walk cycle only advances on frames where `advance_animation`
    /// is set, and snaps back to the idle pose as soon as the hero stops.
    pub fn update(
        &mut self,
        body: &mut Movable,
        delta_ms: f32,
        held: &HeldDirections,
        advance_animation: bool,
    ) -> Option<Direction> {
        let scaled_speed = self.speed * delta_ms / 1000.0;
        let distance = body.move_towards(body.destination, scaled_speed);
        let arrived = distance <= scaled_speed;

        let started = if arrived { held.last_key() } else { None };
        if let Some(direction) = started {
            body.destination += direction.offset() * self.tile_size;
            self.sprite.row = self.rows.row(direction);
        }

        self.moving = !held.is_empty() || !arrived;

        if !self.moving {
            self.sprite.column = 0;
        } else if advance_animation {
            self.sprite.advance();
        }

        started
    }
}

pub fn spawn_hero(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut texture_atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
    config: Res<WalkerConfig>,
) {
    let hero = Hero::new(&config);
    let layout = TextureAtlasLayout::from_grid(
        hero.sprite.size(),
        config.hero_sheet_columns,
        config.hero_sheet_rows,
        None,
        None,
    );
    let body = Movable::at(config.hero_start_position());

    let sprite = Sprite {
        anchor: Anchor::BottomCenter,
        ..Sprite::from_atlas_image(
            asset_server.load(config.hero_sheet_path),
            TextureAtlas {
                layout: texture_atlas_layouts.add(layout),
                index: hero.sprite.atlas_index(config.hero_sheet_columns),
            },
        )
    };

    commands.spawn((
        Name::new("Hero"),
        sprite,
        Transform::from_translation(feet_position(&body, &config)),
        hero,
        body,
    ));

    info!("Hero spawned on tile {}", config.hero_start_tile);
}

pub fn update_hero(
    time: Res<Time>,
    held: Res<HeldDirections>,
    gate: Res<EventGate>,
    mut heroes: Query<(&mut Hero, &mut Movable)>,
) {
    let delta_ms = time.delta_secs() * 1000.0;

    for (mut hero, mut body) in &mut heroes {
        if let Some(direction) = hero.update(&mut body, delta_ms, &held, gate.is_open()) {
            debug!("Hero heading {direction} to {}", body.destination);
        }
    }
}

/// Copies hero state into the rendered sprite.
pub fn sync_hero_sprite(
    config: Res<WalkerConfig>,
    mut heroes: Query<(&Hero, &Movable, &mut Transform, &mut Sprite)>,
) {
    for (hero, body, mut transform, mut sprite) in &mut heroes {
        transform.translation = feet_position(body, &config);

        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = hero.sprite.atlas_index(config.hero_sheet_columns);
        }
    }
}

// The sheet frame is taller than a tile, so it stands on the bottom edge of its tile.
fn feet_position(body: &Movable, config: &WalkerConfig) -> Vec3 {
    let feet = body.position + Vec2::new(config.tile_size / 2.0, config.tile_size);
    canvas_to_world(feet, config).extend(Layer::Hero.z())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_at(position: Vec2) -> (Hero, Movable) {
        (Hero::new(&WalkerConfig::default()), Movable::at(position))
    }

    fn holding(direction: Direction) -> HeldDirections {
        let mut held = HeldDirections::default();
        held.key_pressed(direction);
        held
    }

    #[test]
    fn held_key_picks_the_next_tile_on_arrival() {
        let (mut hero, mut body) = hero_at(Vec2::new(32.0, 64.0));
        let held = holding(Direction::Right);

        let started = hero.update(&mut body, 16.0, &held, false);

        assert_eq!(started, Some(Direction::Right), "a new step begins");
        assert_eq!(body.destination, Vec2::new(64.0, 64.0), "one tile to the right");
        assert_eq!(hero.sprite.row, hero.rows.right, "facing right");
        assert!(hero.is_moving(), "key held");
        assert_ne!(body.position, body.destination, "no snap to the new tile");

        hero.update(&mut body, 16.0, &held, false);
        assert!(
            (body.position.x - 33.6).abs() < 1e-4,
            "100px/s for 16ms is 1.6px, got {}",
            body.position.x
        );
        assert!((body.position.y - 64.0).abs() < f32::EPSILON, "stays on the row");
        assert_eq!(body.destination, Vec2::new(64.0, 64.0), "still heading to the same tile");
    }

    #[test]
    fn idles_without_input() {
        let (mut hero, mut body) = hero_at(Vec2::new(32.0, 64.0));
        hero.sprite.column = 5;

        let started = hero.update(&mut body, 16.0, &HeldDirections::default(), false);

        assert_eq!(started, None, "nothing to do");
        assert!(body.is_at_destination(), "stays on its tile");
        assert_eq!(body.destination, Vec2::new(32.0, 64.0), "destination unchanged");
        assert!(!hero.is_moving(), "idle");
        assert_eq!(hero.sprite.column, 0, "idle pose restored at once");
    }

    #[test]
    fn finishes_the_step_after_release() {
        let (mut hero, mut body) = hero_at(Vec2::new(32.0, 64.0));
        hero.update(&mut body, 16.0, &holding(Direction::Up), false);
        assert_eq!(body.destination, Vec2::new(32.0, 32.0), "one tile up");

        let released = HeldDirections::default();
        hero.update(&mut body, 16.0, &released, true);
        assert!(hero.is_moving(), "still travelling after release");
        assert_eq!(hero.sprite.column, 1, "walk cycle keeps going");

        let mut frames = 0;
        while hero.is_moving() {
            hero.update(&mut body, 16.0, &released, false);
            frames += 1;
            assert!(frames < 100, "32px at 1.6px per frame must finish");
        }
        assert!((body.position.y - 32.0).abs() < 2.0, "stopped next to the tile");
        assert_eq!(hero.sprite.row, hero.rows.up, "keeps facing up");
        assert_eq!(hero.sprite.column, 0, "back to idle pose");
    }

    #[test]
    fn most_recent_key_wins() {
        let (mut hero, mut body) = hero_at(Vec2::new(64.0, 64.0));
        let mut held = holding(Direction::Up);
        held.key_pressed(Direction::Left);

        hero.update(&mut body, 16.0, &held, false);
        assert_eq!(body.destination, Vec2::new(32.0, 64.0), "left was pressed last");
        assert_eq!(hero.sprite.row, hero.rows.left, "facing left");
    }

    #[test]
    fn walk_cycle_wraps_after_last_frame() {
        let (mut hero, mut body) = hero_at(Vec2::ZERO);
        let held = holding(Direction::Down);
        let max_frame = hero.sprite.max_frame;

        let mut columns = Vec::new();
        for _ in 0..=max_frame + 1 {
            hero.update(&mut body, 16.0, &held, true);
            columns.push(hero.sprite.column);
        }

        assert_eq!(columns.first(), Some(&1), "first advance");
        assert!(columns.contains(&max_frame), "last frame is shown");
        assert_eq!(columns.last(), Some(&1), "wrapped through 0");
        assert!(columns.iter().all(|column| *column <= max_frame), "stays inside the row");
    }

    #[test]
    fn animation_follows_the_gate_not_the_frame_rate() {
        let (mut hero, mut body) = hero_at(Vec2::new(32.0, 64.0));
        let held = holding(Direction::Right);
        let mut gate = EventGate::new(120.0);

        let mut advances = 0;
        let mut previous = hero.sprite.column;
        for _ in 0..60 {
            gate.tick(16.0);
            hero.update(&mut body, 16.0, &held, gate.is_open());
            if hero.sprite.column != previous {
                advances += 1;
            }
            previous = hero.sprite.column;
        }

        assert!(advances > 0, "the hero animates while walking");
        assert!(advances <= 60 * 16 / 120, "at most one frame per 120ms, got {advances}");
    }

    #[test]
    fn atlas_index_is_row_major() {
        let frame = SpriteFrame {
            column: 3,
            row: 11,
            width: 64,
            height: 64,
            max_frame: 8,
        };
        assert_eq!(frame.atlas_index(13), 11 * 13 + 3, "row 11, column 3");
    }

    #[test]
    fn frame_size_comes_from_the_config() {
        let config = WalkerConfig {
            hero_frame_size: UVec2::new(48, 56),
            ..WalkerConfig::default()
        };
        let hero = Hero::new(&config);
        assert_eq!(hero.sprite.size(), UVec2::new(48, 56), "atlas cells match the sheet");

        let layout = TextureAtlasLayout::from_grid(
            hero.sprite.size(),
            config.hero_sheet_columns,
            config.hero_sheet_rows,
            None,
            None,
        );
        assert_eq!(
            layout.size,
            UVec2::new(48 * 13, 56 * 21),
            "layout spans the whole sheet"
        );
    }
}
