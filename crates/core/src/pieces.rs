//! Pieces module - tetromino shape table
//!
//! Each kind maps to a fixed local grid size `n` and the four occupied cells
//! of its spawn orientation. Cells are `(col, row)` with row 0 at the *top* of
//! the local grid; [`crate::Tetromino`] converts them to board coordinates.
//!
//! The sizes are load-bearing for collision geometry: I is 4x4, O is 2x2,
//! everything else 3x3.

use crate::types::PieceKind;

/// `(col, row)` inside the local grid, row 0 at the top.
pub type LocalCell = (u8, u8);

/// Local grid size plus occupied cells of the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    pub size: u8,
    pub cells: [LocalCell; 4],
}

const I_SHAPE: PieceShape = PieceShape {
    size: 4,
    cells: [(1, 0), (1, 1), (1, 2), (1, 3)],
};

const O_SHAPE: PieceShape = PieceShape {
    size: 2,
    cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
};

const Z_SHAPE: PieceShape = PieceShape {
    size: 3,
    cells: [(0, 0), (1, 0), (1, 1), (2, 1)],
};

const L_SHAPE: PieceShape = PieceShape {
    size: 3,
    cells: [(1, 0), (1, 1), (1, 2), (2, 2)],
};

const J_SHAPE: PieceShape = PieceShape {
    size: 3,
    cells: [(1, 0), (1, 1), (1, 2), (0, 2)],
};

const S_SHAPE: PieceShape = PieceShape {
    size: 3,
    cells: [(0, 1), (1, 1), (1, 0), (2, 0)],
};

const T_SHAPE: PieceShape = PieceShape {
    size: 3,
    cells: [(0, 1), (1, 1), (1, 2), (2, 1)],
};

/// Get the shape table entry for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static PieceShape {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::L => &L_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::T => &T_SHAPE,
    }
}

/// Columns a rotated piece must keep free on the right edge.
///
/// S and Z reject rotations that put a tile in the last column.
pub fn right_margin(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::S | PieceKind::Z => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_distinct_cells_inside_its_grid() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            for (i, &(c, r)) in shape.cells.iter().enumerate() {
                assert!(c < shape.size && r < shape.size, "{kind:?} cell out of grid");
                assert!(
                    !shape.cells[..i].contains(&(c, r)),
                    "{kind:?} has a duplicated cell"
                );
            }
        }
    }

    #[test]
    fn test_grid_sizes() {
        assert_eq!(get_shape(PieceKind::I).size, 4);
        assert_eq!(get_shape(PieceKind::O).size, 2);
        for kind in [PieceKind::Z, PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::T] {
            assert_eq!(get_shape(kind).size, 3);
        }
    }

    #[test]
    fn test_right_margin() {
        assert_eq!(right_margin(PieceKind::S), 1);
        assert_eq!(right_margin(PieceKind::Z), 1);
        assert_eq!(right_margin(PieceKind::T), 0);
    }
}
