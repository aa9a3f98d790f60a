use bevy::prelude::*;
use board_helpers::surface::Surface;

use crate::config::{BoardConfig, Palette};

#[derive(Component)]
pub struct BoardCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

pub const fn shade(col: u32, row: u32) -> Shade {
    if (col + row) % 2 == 0 {
        Shade::Light
    } else {
        Shade::Dark
    }
}

impl Shade {
    pub const fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Light => palette.light_square,
            Self::Dark => palette.dark_square,
        }
    }
}

/// Grid lines first, then one sprite per cell leaving a border-wide gap on its top and left.
pub fn spawn_board(mut commands: Commands, config: Res<BoardConfig>, surface: Res<Surface>) {
    commands.spawn((
        Sprite::from_color(config.palette.grid_line, surface.size),
        Transform::from_xyz(0., 0., 0.),
    ));

    let inner = config.cell_size - config.border;
    let offset = Vec2::splat(config.cell_size + config.border) / 2.0;
    for row in 0..config.rows {
        for col in 0..config.columns {
            let corner = Vec2::new(col as f32, row as f32) * config.cell_size;
            commands.spawn((
                Sprite::from_color(shade(col, row).color(&config.palette), Vec2::splat(inner)),
                Transform::from_translation(surface.translation(corner + offset, 1.)),
                BoardCell,
            ));
        }
    }
}
