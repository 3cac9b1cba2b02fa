//! Shape table tests

use tetris_2048::core::get_shape;
use tetris_2048::types::PieceKind;

#[test]
fn test_layout_table() {
    let expect = |kind: PieceKind, mut cells: [(u8, u8); 4]| {
        let mut actual = get_shape(kind).cells;
        actual.sort_unstable();
        cells.sort_unstable();
        assert_eq!(actual, cells, "{kind:?}");
    };

    expect(PieceKind::I, [(1, 0), (1, 1), (1, 2), (1, 3)]);
    expect(PieceKind::O, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    expect(PieceKind::Z, [(0, 0), (1, 0), (1, 1), (2, 1)]);
    expect(PieceKind::L, [(1, 0), (1, 1), (1, 2), (2, 2)]);
    expect(PieceKind::J, [(1, 0), (1, 1), (1, 2), (0, 2)]);
    expect(PieceKind::S, [(0, 1), (1, 1), (1, 0), (2, 0)]);
    expect(PieceKind::T, [(0, 1), (1, 1), (1, 2), (2, 1)]);
}
