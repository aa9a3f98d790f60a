use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;
use strum::{Display as StrumDisplay, EnumIter};

use crate::config::BoardConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
pub enum PieceColor {
    Black,
    White,
}

impl PieceColor {
    const fn symbol(self) -> char {
        match self {
            Self::Black => 'X',
            Self::White => 'O',
        }
    }
}

/// Stable handle to a piece in a [`PieceSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

impl PieceId {
    /// Position of the piece in layout order across both colors.
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    color: PieceColor,
    pixel_position: Vec2,
    grid_position: IVec2,
    settled_position: Vec2,
}

impl Piece {
    pub fn new(color: PieceColor, grid_position: IVec2, cell_size: f32) -> Self {
        let pixel_position = grid_position.as_vec2() * cell_size;
        Self {
            color,
            pixel_position,
            grid_position,
            settled_position: pixel_position,
        }
    }

    pub const fn color(&self) -> PieceColor {
        self.color
    }

    /// Top-left corner of the cell the piece is drawn in.
    pub const fn pixel_position(&self) -> Vec2 {
        self.pixel_position
    }

    /// Cell the piece was last dropped on. Stale while the piece is dragged.
    pub const fn grid_position(&self) -> IVec2 {
        self.grid_position
    }

    pub const fn settled_position(&self) -> Vec2 {
        self.settled_position
    }

    pub fn center(&self, half_cell: f32) -> Vec2 {
        self.pixel_position + Vec2::splat(half_cell)
    }

    pub fn contains(&self, point: Vec2, half_cell: f32) -> bool {
        point.distance(self.center(half_cell)) < half_cell
    }

    pub const fn move_to(&mut self, pixel_position: Vec2) {
        self.pixel_position = pixel_position;
    }

    /// Snaps the piece onto the cell under its center and records it as settled.
    pub fn drop_pos(&mut self, config: &BoardConfig) -> IVec2 {
        // Truncation, not floor: a piece dragged just past the top-left edge lands on cell 0.
        let mut grid_position =
            ((self.pixel_position + Vec2::splat(config.half_cell())) / config.cell_size).as_ivec2();
        if config.clamp_to_board {
            let last = IVec2::new(config.columns as i32 - 1, config.rows as i32 - 1);
            grid_position = grid_position.clamp(IVec2::ZERO, last);
        }
        self.grid_position = grid_position;
        self.pixel_position = grid_position.as_vec2() * config.cell_size;
        self.settled_position = self.pixel_position;
        grid_position
    }

    pub const fn revert_pos(&mut self) {
        self.pixel_position = self.settled_position;
    }
}

/// All pieces on the board, stored once and addressed by [`PieceId`].
#[derive(Resource, Clone, Debug, Default)]
pub struct PieceSet {
    pieces: Vec<Piece>,
    black: Vec<PieceId>,
    white: Vec<PieceId>,
    columns: u32,
    rows: u32,
}

impl PieceSet {
    pub fn new_game(config: &BoardConfig) -> Self {
        let mut set = Self {
            columns: config.columns,
            rows: config.rows,
            ..default()
        };

        for x in 0..config.columns {
            for y in 0..config.piece_rows {
                if (x + y) % 2 == 1 {
                    set.push(PieceColor::Black, x, y, config.cell_size);
                }
            }
        }

        let white_rows = config.rows.saturating_sub(config.piece_rows)..config.rows;
        for x in 0..config.columns {
            for y in white_rows.clone().rev() {
                if (x + y) % 2 == 1 {
                    set.push(PieceColor::White, x, y, config.cell_size);
                }
            }
        }

        set
    }

    fn push(&mut self, color: PieceColor, x: u32, y: u32, cell_size: f32) -> PieceId {
        let id = PieceId(self.pieces.len());
        let grid_position = IVec2::new(x as i32, y as i32);
        self.pieces.push(Piece::new(color, grid_position, cell_size));
        match color {
            PieceColor::Black => self.black.push(id),
            PieceColor::White => self.white.push(id),
        }
        id
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.0)
    }

    /// Pieces of one color, in the order they were laid out.
    pub fn collection(&self, color: PieceColor) -> &[PieceId] {
        match color {
            PieceColor::Black => &self.black,
            PieceColor::White => &self.white,
        }
    }

    /// Every piece in draw order: black first, then white.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.black
            .iter()
            .chain(&self.white)
            .filter_map(|&id| self.get(id).map(|piece| (id, piece)))
    }

    /// Piece last dropped on `cell`, if any.
    pub fn settled_at(&self, cell: IVec2) -> Option<PieceId> {
        self.iter()
            .find(|(_, piece)| piece.grid_position() == cell)
            .map(|(id, _)| id)
    }
}

impl Display for PieceSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows as i32 {
            for x in 0..self.columns as i32 {
                let symbol = self
                    .settled_at(IVec2::new(x, y))
                    .and_then(|id| self.get(id))
                    .map_or('-', |piece| piece.color().symbol());
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
