use bevy::color::palettes::css::{BLACK, GRAY, GREEN, WHITE, YELLOW};
use bevy::prelude::*;
use board_helpers::surface::Surface;
use thiserror::Error;

const BROWN: Color = Color::srgb(0.647, 0.165, 0.165);

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("Board needs at least one column and one row, got {columns}x{rows}")]
    EmptyBoard { columns: u32, rows: u32 },

    #[error("{piece_rows} piece rows per side do not fit on a board with {rows} rows")]
    CampsOverlap { piece_rows: u32, rows: u32 },

    #[error("Frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub light_square: Color,
    pub dark_square: Color,
    pub grid_line: Color,
    pub black_piece: Color,
    pub white_piece: Color,
    pub highlight: Color,
    pub pointer_marker: Color,
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            light_square: Color::Srgba(YELLOW),
            dark_square: BROWN,
            grid_line: Color::Srgba(BLACK),
            black_piece: Color::Srgba(BLACK),
            white_piece: Color::Srgba(WHITE),
            highlight: Color::Srgba(GRAY),
            pointer_marker: Color::Srgba(GREEN),
            background: Color::Srgba(WHITE),
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct BoardConfig {
    pub cell_size: f32,
    pub columns: u32,
    pub rows: u32,
    /// Rows filled with pieces at each end of the board.
    pub piece_rows: u32,
    pub border: f32,
    pub frame_rate: f64,
    /// Keeps dropped pieces on the board. Off by default so pieces can be left anywhere.
    pub clamp_to_board: bool,
    pub palette: Palette,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            columns: 10,
            rows: 10,
            piece_rows: 4,
            border: 1.0,
            frame_rate: 60.0,
            clamp_to_board: false,
            palette: Palette::default(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.piece_rows > self.rows / 2 {
            return Err(ConfigError::CampsOverlap {
                piece_rows: self.piece_rows,
                rows: self.rows,
            });
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }

    pub fn half_cell(&self) -> f32 {
        self.cell_size / 2.0
    }

    pub fn surface(&self) -> Surface {
        Surface::new(
            (self.columns as f32).mul_add(self.cell_size, self.border),
            (self.rows as f32).mul_add(self.cell_size, self.border),
        )
    }
}
