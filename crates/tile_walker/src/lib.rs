pub mod config;
pub mod game;
pub mod hero;
pub mod movement;
pub mod timing;
pub mod world;

use bevy::log::error;

pub use config::{ConfigError, WalkerConfig};
pub use game::TileWalkerPlugin;

pub fn run() -> Result<(), ConfigError> {
    run_with(WalkerConfig::default())
}

pub fn run_with(config: WalkerConfig) -> Result<(), ConfigError> {
    if let Err(err) = config.validate() {
        error!("Invalid tile walker configuration: {err}");
        return Err(err);
    }

    walker_helpers::get_default_app(
        env!("CARGO_PKG_NAME"),
        config.game_width(),
        config.game_height(),
    )
    .add_plugins(TileWalkerPlugin::new(config))
    .run();

    Ok(())
}
