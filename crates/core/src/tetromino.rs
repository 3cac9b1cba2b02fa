//! Falling pieces.
//!
//! A [`Tetromino`] owns its four tiles in an `n x n` local grid (row 0 at the
//! top) anchored at `bottom_left_corner`. The tile at local `(col, row)` always
//! sits at `(blc.x + col, blc.y + n - 1 - row)` on the board.
//!
//! Movement checks the board before mutating. Rotation is speculative: rotate,
//! validate, and rotate back on failure. Pieces never write to the board; they
//! land through [`crate::Board::commit`].

use arrayvec::ArrayVec;
use log::trace;

use crate::board::Board;
use crate::pieces::{get_shape, right_margin};
use crate::position::Position;
use crate::rng::RandomSource;
use crate::tile::Tile;
use crate::types::{MoveDirection, PieceKind, RotationDirection};

/// Largest local grid (I piece, 4x4).
const MAX_CELLS: usize = 16;

/// Active or preview piece
#[derive(Debug, Clone, PartialEq)]
pub struct Tetromino {
    kind: PieceKind,
    /// Local grid size
    n: usize,
    board_width: u16,
    board_height: u16,
    /// Row-major local grid, row 0 at the top
    matrix: ArrayVec<Option<Tile>, MAX_CELLS>,
    bottom_left_corner: Position,
}

impl Tetromino {
    /// Build a piece with fresh 2/4 tiles, parked in the preview slot to the
    /// right of the board.
    pub fn new(kind: PieceKind, board_width: u16, board_height: u16, rng: &mut impl RandomSource) -> Self {
        let shape = get_shape(kind);
        let n = shape.size as usize;

        // O is one column further right so the 2-wide block looks centered.
        let preview_x = if kind == PieceKind::O {
            board_width as i32 + 1
        } else {
            board_width as i32
        };
        let bottom_left_corner = Position::new(preview_x, 1);

        let mut matrix: ArrayVec<Option<Tile>, MAX_CELLS> = (0..n * n).map(|_| None).collect();
        for &(col, row) in shape.cells.iter() {
            let (col, row) = (col as usize, row as usize);
            let position = local_to_board(bottom_left_corner, n, col, row);
            matrix[row * n + col] = Some(Tile::random(position, rng));
        }

        Self {
            kind,
            n,
            board_width,
            board_height,
            matrix,
            bottom_left_corner,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Local grid size `n`.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn bottom_left_corner(&self) -> Position {
        self.bottom_left_corner
    }

    /// Owned tiles, in local row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.matrix.iter().flatten()
    }

    /// Hand the tiles over, consuming the piece.
    pub fn into_tiles(self) -> impl Iterator<Item = Tile> {
        self.matrix.into_iter().flatten()
    }

    /// Tile at local `(col, row)`, row 0 at the top.
    pub fn local(&self, col: usize, row: usize) -> Option<&Tile> {
        if col >= self.n || row >= self.n {
            return None;
        }
        self.matrix[row * self.n + col].as_ref()
    }

    /// Check every tile sits where the local grid says it should.
    pub fn is_consistent(&self) -> bool {
        (0..self.n).all(|row| {
            (0..self.n).all(|col| match self.local(col, row) {
                Some(tile) => {
                    tile.position() == local_to_board(self.bottom_left_corner, self.n, col, row)
                }
                None => true,
            })
        })
    }

    fn place_tiles(&mut self) {
        let n = self.n;
        let blc = self.bottom_left_corner;
        for (idx, cell) in self.matrix.iter_mut().enumerate() {
            if let Some(tile) = cell {
                tile.set_position(local_to_board(blc, n, idx % n, idx / n));
            }
        }
    }

    /// Move to a random column just above the visible board.
    ///
    /// Must be called before the piece becomes the current one.
    pub fn position(&mut self, rng: &mut impl RandomSource) {
        let columns = (self.board_width as usize).saturating_sub(self.n) as u32 + 1;
        let x = rng.next_range(columns) as i32;
        self.bottom_left_corner = Position::new(x, self.board_height as i32);
        self.place_tiles();
        trace!("{:?} positioned at column {x}", self.kind);
    }

    /// Extreme tile of each local row (or column for `Down`) in the direction
    /// of travel.
    fn leading_tiles(&self, direction: MoveDirection) -> ArrayVec<Position, 4> {
        let n = self.n;
        let mut out = ArrayVec::new();
        for line in 0..n {
            let found = (0..n).find_map(|step| {
                let (col, row) = match direction {
                    MoveDirection::Left => (step, line),
                    MoveDirection::Right => (n - 1 - step, line),
                    MoveDirection::Down => (line, n - 1 - step),
                };
                self.local(col, row).map(Tile::position)
            });
            if let Some(pos) = found {
                out.push(pos);
            }
        }
        out
    }

    /// Check if a one-cell move is possible without mutating anything.
    ///
    /// Leading tiles must not sit on the board edge in the direction of
    /// travel. Tiles whose destination is still above the visible board skip
    /// the occupancy check.
    pub fn can_be_moved(&self, direction: MoveDirection, board: &Board) -> bool {
        let height = board.height() as i32;
        let last_col = board.width() as i32 - 1;
        let (dx, dy) = direction.delta();

        self.leading_tiles(direction).iter().all(|pos| {
            let at_edge = match direction {
                MoveDirection::Left => pos.x == 0,
                MoveDirection::Right => pos.x == last_col,
                MoveDirection::Down => pos.y == 0,
            };
            if at_edge {
                return false;
            }
            let dest = pos.translated(dx, dy);
            dest.y >= height || !board.is_occupied(dest.y, dest.x)
        })
    }

    /// Move one cell; returns false and leaves the piece untouched if blocked.
    pub fn try_move(&mut self, direction: MoveDirection, board: &Board) -> bool {
        if !self.can_be_moved(direction, board) {
            return false;
        }
        let (dx, dy) = direction.delta();
        self.bottom_left_corner.translate(dx, dy);
        for tile in self.matrix.iter_mut().flatten() {
            tile.translate(dx, dy);
        }
        true
    }

    /// Check if the piece cannot fall any further
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.can_be_moved(MoveDirection::Down, board)
    }

    /// Fall until blocked; returns the number of rows dropped.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut rows = 0;
        while self.try_move(MoveDirection::Down, board) {
            rows += 1;
        }
        rows
    }

    /// Rotate tiles about the geometric center of the local grid and remap the
    /// grid to match, without any checks.
    fn rotate_unchecked(&mut self, direction: RotationDirection) {
        let n = self.n;
        let span = n as i32 - 1;
        // Doubled coordinates keep the half-cell center of even grids exact.
        let center2 = Position::new(
            2 * self.bottom_left_corner.x + span,
            2 * self.bottom_left_corner.y + span,
        );
        for tile in self.matrix.iter_mut().flatten() {
            let pos = tile.position();
            let mut doubled = Position::new(2 * pos.x, 2 * pos.y);
            doubled.rotate_around(center2, direction);
            tile.set_position(Position::new(doubled.x / 2, doubled.y / 2));
        }

        let old = std::mem::take(&mut self.matrix);
        let mut rotated: ArrayVec<Option<Tile>, MAX_CELLS> = (0..n * n).map(|_| None).collect();
        for (idx, cell) in old.into_iter().enumerate() {
            let (row, col) = (idx / n, idx % n);
            let (new_row, new_col) = match direction {
                RotationDirection::Clockwise => (col, n - 1 - row),
                RotationDirection::CounterClockwise => (n - 1 - col, row),
            };
            rotated[new_row * n + new_col] = cell;
        }
        self.matrix = rotated;
        debug_assert!(self.is_consistent(), "rotation broke the local grid");
    }

    fn fits(&self, board: &Board) -> bool {
        let max_x = board.width() as i32 - 1 - right_margin(self.kind);
        self.tiles().all(|tile| {
            let pos = tile.position();
            pos.x >= 0 && pos.x <= max_x && pos.y >= 0 && !board.is_occupied(pos.y, pos.x)
        })
    }

    /// Rotate a quarter turn if the result fits; otherwise undo and return false.
    pub fn try_rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        self.rotate_unchecked(direction);
        if self.fits(board) {
            return true;
        }
        self.rotate_unchecked(direction.inverse());
        trace!("{:?} rotation {direction:?} rejected", self.kind);
        false
    }
}

fn local_to_board(blc: Position, n: usize, col: usize, row: usize) -> Position {
    Position::new(blc.x + col as i32, blc.y + (n - 1 - row) as i32)
}
