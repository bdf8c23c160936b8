use bevy::prelude::*;
use walker_helpers::input::{HeldDirections, track_direction_keys};

use crate::config::WalkerConfig;
use crate::hero::{spawn_hero, sync_hero_sprite, update_hero};
use crate::timing::{EventGate, tick_event_gate};
use crate::world::spawn_world;

/// Ordering of the per-frame work.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FrameSet {
    Input,
    Timing,
    Movement,
    Draw,
}

pub struct TileWalkerPlugin {
    config: WalkerConfig,
}

impl TileWalkerPlugin {
    pub const fn new(config: WalkerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TileWalkerPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Tile walker: {}x{}px level, hero at {}px/s, animation every {}ms",
            self.config.game_width(),
            self.config.game_height(),
            self.config.hero_speed,
            self.config.animation_interval_ms
        );

        app.insert_resource(self.config.clone())
            .insert_resource(EventGate::new(self.config.animation_interval_ms))
            .init_resource::<HeldDirections>()
            .add_systems(Startup, (setup_camera, spawn_world, spawn_hero));

        add_frame_systems(app);
    }
}

// Input, then the animation clock, then movement, then the sprite sync that feeds rendering.
fn add_frame_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Input,
            FrameSet::Timing,
            FrameSet::Movement,
            FrameSet::Draw,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            track_direction_keys.in_set(FrameSet::Input),
            tick_event_gate.in_set(FrameSet::Timing),
            update_hero.in_set(FrameSet::Movement),
            sync_hero_sprite.in_set(FrameSet::Draw),
        ),
    );
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
