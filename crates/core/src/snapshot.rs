//! Render-facing copy of the game state.
//!
//! Front ends draw from a [`GameSnapshot`] instead of borrowing the live
//! [`crate::GameState`]. The snapshot owns plain values only, so it can be
//! refilled every frame with [`crate::GameState::snapshot_into`].

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Difficulty, PieceKind};

/// One tile of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSnapshot {
    pub x: i32,
    pub y: i32,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub tiles: ArrayVec<TileSnapshot, 4>,
}

impl PieceSnapshot {
    /// Tiles in board coordinates.
    pub fn absolute(piece: &Tetromino) -> Self {
        Self::offset(piece, 0, 0)
    }

    /// Tiles relative to the piece's bottom-left corner, for the preview panel.
    pub fn relative(piece: &Tetromino) -> Self {
        let blc = piece.bottom_left_corner();
        Self::offset(piece, blc.x, blc.y)
    }

    fn offset(piece: &Tetromino, dx: i32, dy: i32) -> Self {
        let tiles = piece
            .tiles()
            .map(|tile| {
                let pos = tile.position();
                TileSnapshot {
                    x: pos.x - dx,
                    y: pos.y - dy,
                    value: tile.value(),
                }
            })
            .collect();
        Self {
            kind: piece.kind(),
            tiles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major tile values, row 0 at the bottom; 0 marks an empty cell
    pub board: Vec<u32>,
    pub active: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub difficulty: Difficulty,
    pub episode_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Value of the landed tile at `(row, col)`, if any.
    pub fn value_at(&self, row: i32, col: i32) -> Option<u32> {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            return None;
        }
        match self.board[row as usize * self.width as usize + col as usize] {
            0 => None,
            value => Some(value),
        }
    }

    /// Value of the active piece's tile at `(row, col)`, if any.
    pub fn active_at(&self, row: i32, col: i32) -> Option<u32> {
        self.active
            .as_ref()?
            .tiles
            .iter()
            .find(|t| t.x == col && t.y == row)
            .map(|t| t.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_relative_preview_starts_at_origin() {
        let mut rng = SimpleRng::new(3);
        let piece = Tetromino::new(PieceKind::O, 12, 20, &mut rng);
        let snap = PieceSnapshot::relative(&piece);
        assert_eq!(snap.tiles.len(), 4);
        assert!(snap.tiles.iter().all(|t| t.x >= 0 && t.y >= 0 && t.x < 4 && t.y < 4));
        assert!(snap.tiles.iter().all(|t| t.value == 2 || t.value == 4));
    }

    #[test]
    fn test_value_at_out_of_bounds() {
        let snap = GameSnapshot {
            width: 2,
            height: 2,
            board: vec![0, 8, 0, 0],
            ..Default::default()
        };
        assert_eq!(snap.value_at(0, 1), Some(8));
        assert_eq!(snap.value_at(0, 0), None);
        assert_eq!(snap.value_at(-1, 0), None);
        assert_eq!(snap.value_at(0, 2), None);
        assert_eq!(snap.active_at(0, 0), None);
    }
}
