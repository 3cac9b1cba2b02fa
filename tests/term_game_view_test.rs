use tetris_2048::core::{GameSnapshot, GameState, PieceSnapshot, TileSnapshot};
use tetris_2048::term::{AnchorY, GameView, Viewport};
use tetris_2048::types::{BoardConfig, Difficulty, PieceKind};

fn empty_snapshot() -> GameSnapshot {
    let mut snap = GameState::new(BoardConfig::default(), Difficulty::Medium, 1).snapshot();
    snap.active = None;
    snap
}

fn fit(view: &GameView) -> Viewport {
    view.required_size(12, 20)
}

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();
    let fb = view.render(&empty_snapshot(), fit(&view));

    // 12 cells x 4 columns plus the border.
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(49, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(49, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_bottom_row_at_the_bottom_with_values() {
    let mut snap = empty_snapshot();
    snap.board[0] = 2048;
    snap.board[11] = 8;

    let view = GameView::default();
    let fb = view.render(&snap, fit(&view));

    let bottom = fb.row_text(20);
    assert!(bottom.starts_with("│2048"), "got {bottom:?}");
    // Column 11 spans x 45..=48; a single digit sits left of center.
    assert_eq!(fb.get(46, 20).unwrap().ch, '8');
    assert!(!fb.row_text(1).contains("2048"));
}

#[test]
fn term_view_draws_active_piece_inside_board_only() {
    let mut snap = empty_snapshot();
    let tiles = [
        TileSnapshot { x: 0, y: 19, value: 4 },
        TileSnapshot { x: 0, y: 20, value: 2 },
    ];
    snap.active = Some(PieceSnapshot {
        kind: PieceKind::I,
        tiles: tiles.into_iter().collect(),
    });

    let view = GameView::default();
    let fb = view.render(&snap, fit(&view));

    assert_eq!(fb.get(2, 1).unwrap().ch, '4');
    // The tile above the board has nowhere to go but the border row.
    assert_eq!(fb.get(2, 0).unwrap().ch, '─');
}

#[test]
fn term_view_side_panel_shows_score_and_speed() {
    let mut snap = empty_snapshot();
    snap.score = 1234;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, fit(&view));

    assert!(fb.row_text(0).contains("SCORE"));
    assert!(fb.row_text(1).contains("1234"));
    assert!(fb.row_text(3).contains("NEXT"));
    assert!(fb.row_text(9).contains("SPEED"));
    assert!(fb.row_text(10).contains("medium"));
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();

    let mut snap = empty_snapshot();
    snap.paused = true;
    let fb = view.render(&snap, fit(&view));
    assert!(fb.row_text(11).contains("PAUSED"));

    snap.game_over = true;
    let fb = view.render(&snap, fit(&view));
    assert!(fb.row_text(11).contains("GAME OVER"));
    assert!(!fb.row_text(11).contains("PAUSED"));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let view = GameView::default();
    let fb = view.render(&empty_snapshot(), Viewport::new(10, 5));
    assert_eq!(fb.width(), 10);
    assert_eq!(fb.height(), 5);
}
