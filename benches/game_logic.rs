use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tetris_2048::core::{Board, GameState, SimpleRng, Tetromino};
use tetris_2048::types::{BoardConfig, Difficulty, GameAction, PieceKind, RotationDirection};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(BoardConfig::default(), Difficulty::Fast, 12345);
    state.start();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            black_box(state.tick());
        })
    });
}

fn bench_hard_drop_and_land(c: &mut Criterion) {
    let mut state = GameState::new(BoardConfig::default(), Difficulty::Fast, 12345);
    state.start();

    c.bench_function("hard_drop_and_land", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.apply_action(GameAction::HardDrop);
            black_box(state.tick());
        })
    });
}

/// Four full rows of alternating values under a stack of equal tiles.
fn busy_board() -> Board {
    let mut board = Board::default();
    for row in 0..4 {
        for col in 0..12 {
            board.place(row, col, if (row + col) % 2 == 0 { 2 } else { 4 });
        }
    }
    for row in 4..10 {
        board.place(row, 5, 8);
    }
    board.place(12, 9, 16);
    board
}

fn bench_settle(c: &mut Criterion) {
    c.bench_function("settle_busy_board", |b| {
        b.iter_batched(
            busy_board,
            |mut board| black_box(board.settle()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::default();
    let mut rng = SimpleRng::new(7);
    let mut piece = Tetromino::new(PieceKind::T, board.width(), board.height(), &mut rng);
    piece.position(&mut rng);
    piece.hard_drop(&board);

    c.bench_function("try_rotate", |b| {
        b.iter(|| black_box(piece.try_rotate(RotationDirection::Clockwise, &board)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_and_land,
    bench_settle,
    bench_try_rotate
);
criterion_main!(benches);
