//! Drag and drop of pieces.
//!
//! The controller is either idle or dragging exactly one piece. A press that
//! hits one of the current player's pieces starts a drag, moves follow the
//! pointer and a release snaps the piece onto a cell. There are no rules: any
//! piece of the current player can go anywhere, including off the board.

use bevy::prelude::*;

use crate::config::BoardConfig;
use crate::pieces::{PieceColor, PieceId, PieceSet};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct DragController {
    current: Option<PieceId>,
    current_player: PieceColor,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            current: None,
            current_player: PieceColor::White,
        }
    }
}

impl DragController {
    pub const fn current(&self) -> Option<PieceId> {
        self.current
    }

    pub const fn is_dragging(&self) -> bool {
        self.current.is_some()
    }

    pub const fn current_player(&self) -> PieceColor {
        self.current_player
    }

    /// Nothing in the board advances the player; turns are left to whoever embeds it.
    pub const fn set_current_player(&mut self, player: PieceColor) {
        self.current_player = player;
    }

    pub fn press(
        &mut self,
        pieces: &PieceSet,
        config: &BoardConfig,
        pointer: Vec2,
    ) -> Option<PieceId> {
        self.current = hit_test(pieces, self.current_player, pointer, config.half_cell());
        match self.current {
            Some(id) => debug!("{} picked up {id:?} at {pointer}", self.current_player),
            None => debug!("press at {pointer} missed every {} piece", self.current_player),
        }
        self.current
    }

    pub fn drag(&self, pieces: &mut PieceSet, config: &BoardConfig, pointer: Vec2) {
        let Some(piece) = self.current.and_then(|id| pieces.get_mut(id)) else {
            return;
        };
        piece.move_to(pointer - Vec2::splat(config.half_cell()));
    }

    /// Drops the dragged piece, returning the cell it landed on.
    pub fn release(&mut self, pieces: &mut PieceSet, config: &BoardConfig) -> Option<IVec2> {
        let id = self.current.take()?;
        let piece = pieces.get_mut(id)?;
        let cell = piece.drop_pos(config);
        info!(
            "{} piece {id:?} dropped on {cell} at {}",
            piece.color(),
            piece.pixel_position()
        );
        if !on_board(cell, config) {
            warn!("{id:?} left outside the board at {cell}");
        }
        Some(cell)
    }
}

/// First piece of `color` whose disc contains `pointer`, in collection order.
pub fn hit_test(
    pieces: &PieceSet,
    color: PieceColor,
    pointer: Vec2,
    half_cell: f32,
) -> Option<PieceId> {
    pieces.collection(color).iter().copied().find(|&id| {
        pieces
            .get(id)
            .is_some_and(|piece| piece.contains(pointer, half_cell))
    })
}

fn on_board(cell: IVec2, config: &BoardConfig) -> bool {
    (0..config.columns as i32).contains(&cell.x) && (0..config.rows as i32).contains(&cell.y)
}
