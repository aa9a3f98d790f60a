use bevy::prelude::*;

pub mod board;
pub mod config;
pub mod controller;
pub mod input;
pub mod pieces;
pub mod render;

use board::spawn_board;
use config::{BoardConfig, ConfigError};
use controller::DragController;
use input::{PointerAction, PointerPosition, apply_pointer_actions, read_pointer};
use pieces::PieceSet;
use render::{
    log_layout, spawn_pieces, spawn_pointer_marker, sync_piece_visuals, sync_pointer_marker,
};

pub struct CheckersPlugin {
    pub config: BoardConfig,
}

impl Plugin for CheckersPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(PieceSet::new_game(&self.config))
            .init_resource::<DragController>()
            .init_resource::<PointerPosition>()
            .add_event::<PointerAction>()
            .add_systems(
                Startup,
                (spawn_board, spawn_pieces, spawn_pointer_marker, log_layout),
            )
            .add_systems(
                Update,
                (
                    read_pointer,
                    apply_pointer_actions,
                    sync_piece_visuals,
                    sync_pointer_marker,
                )
                    .chain(),
            );
    }
}

pub fn run() -> Result<(), ConfigError> {
    run_with(BoardConfig::default())
}

pub fn run_with(config: BoardConfig) -> Result<(), ConfigError> {
    config.validate()?;

    default_app(&config).add_plugins(CheckersPlugin { config }).run();
    Ok(())
}

fn default_app(config: &BoardConfig) -> App {
    board_helpers::get_default_app(
        env!("CARGO_PKG_NAME"),
        config.surface(),
        config.frame_rate,
        config.palette.background,
    )
}
