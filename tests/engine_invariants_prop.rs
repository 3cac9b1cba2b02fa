//! Property tests for the board and session invariants.
//!
//! Generated boards exercise each settle step on its own; generated action
//! sequences drive whole sessions and check what must hold after every step.

use proptest::prelude::*;
use tetris_2048::core::{Board, GameState, SimpleRng, Tetromino, TickOutcome};
use tetris_2048::types::{BoardConfig, Difficulty, GameAction, MoveDirection, PieceKind, RotationDirection};

const W: u16 = 6;
const H: u16 = 8;

fn board_from(values: &[u32]) -> Board {
    let mut board = Board::new(W, H);
    for (idx, &value) in values.iter().enumerate() {
        if value != 0 {
            board.place((idx / W as usize) as i32, (idx % W as usize) as i32, value);
        }
    }
    board
}

fn value_sum(board: &Board) -> u64 {
    board.tiles().map(|(_, _, t)| u64::from(t.value())).sum()
}

fn has_floating_tile(board: &Board) -> bool {
    board.tiles().any(|(row, col, _)| {
        row > 0
            && !board.is_occupied(row - 1, col)
            && !board.is_occupied(row, col - 1)
            && !board.is_occupied(row, col + 1)
    })
}

fn cells() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(
        prop_oneof![1 => Just(0u32), 1 => Just(2u32), 1 => Just(4u32), 1 => Just(8u32)],
        (W * H) as usize,
    )
}

const ACTIONS: [GameAction; 7] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
    GameAction::Pause,
];

proptest! {
    #[test]
    fn merge_leaves_no_equal_vertical_pair(values in cells()) {
        let mut board = board_from(&values);
        let sum = value_sum(&board);
        let score = board.score();

        let merges = board.merge();

        for row in 0..H as i32 - 1 {
            for col in 0..W as i32 {
                if let (Some(a), Some(b)) = (board.value_at(row, col), board.value_at(row + 1, col)) {
                    prop_assert_ne!(a, b, "pair left at row {} col {}", row, col);
                }
            }
        }
        // Merging combines values without creating or destroying any.
        prop_assert_eq!(value_sum(&board), sum);
        prop_assert_eq!(board.occupied_count() + merges, values.iter().filter(|&&v| v != 0).count());
        prop_assert!(board.score() >= score);
        prop_assert!(board.positions_in_sync());
    }

    #[test]
    fn clear_lines_removes_exactly_the_full_rows(values in cells()) {
        let mut board = board_from(&values);
        let full = (0..H as i32).filter(|&row| board.is_row_full(row)).count();
        let before = board.occupied_count();

        let cleared = board.clear_lines();

        prop_assert_eq!(cleared, full);
        prop_assert_eq!(before - board.occupied_count(), full * W as usize);
        prop_assert!((0..H as i32).all(|row| !board.is_row_full(row)));
        prop_assert!(board.positions_in_sync());
    }

    #[test]
    fn remove_gaps_leaves_no_floating_tile(values in cells()) {
        let mut board = board_from(&values);
        let count = board.occupied_count();
        let sum = value_sum(&board);

        board.remove_gaps();

        prop_assert!(!has_floating_tile(&board));
        prop_assert_eq!(board.occupied_count(), count);
        prop_assert_eq!(value_sum(&board), sum);
        prop_assert!(board.positions_in_sync());
    }

    #[test]
    fn four_quarter_turns_are_identity(
        seed in any::<u32>(),
        kind_idx in 0usize..7,
        right in 0usize..12,
        down in 0usize..16,
        clockwise in any::<bool>(),
    ) {
        let board = Board::default();
        let mut rng = SimpleRng::new(seed);
        let kind = PieceKind::ALL[kind_idx];
        let mut piece = Tetromino::new(kind, board.width(), board.height(), &mut rng);
        piece.position(&mut rng);
        for _ in 0..right {
            piece.try_move(MoveDirection::Right, &board);
        }
        for _ in 0..down {
            piece.try_move(MoveDirection::Down, &board);
        }

        let direction = if clockwise {
            RotationDirection::Clockwise
        } else {
            RotationDirection::CounterClockwise
        };
        let start = piece.clone();
        let mut all_accepted = true;
        for _ in 0..4 {
            let before = piece.clone();
            if !piece.try_rotate(direction, &board) {
                prop_assert_eq!(&piece, &before);
                all_accepted = false;
                break;
            }
            prop_assert!(piece.is_consistent());
        }
        if all_accepted {
            prop_assert_eq!(&piece, &start);
        }
    }

    #[test]
    fn session_invariants_hold_over_random_play(
        seed in any::<u32>(),
        actions in prop::collection::vec(0usize..ACTIONS.len(), 1..300),
    ) {
        let config = BoardConfig::new(8, 12).unwrap();
        let mut game = GameState::new(config, Difficulty::Fast, seed);
        game.start();

        for idx in actions {
            let action = ACTIONS[idx];
            let piece = game.current().cloned();
            let board = game.board().clone();
            let score = game.score();

            if !game.apply_action(action) {
                // A refused action changes nothing.
                prop_assert_eq!(game.current().cloned(), piece);
                prop_assert_eq!(game.board(), &board);
            }

            let outcome = game.tick();
            prop_assert!(game.score() >= score);
            if let TickOutcome::Landed(report) = outcome {
                prop_assert!(!has_floating_tile(game.board()));
                prop_assert!(game.board().positions_in_sync());
                prop_assert_eq!(game.score() - score, report.points);
            }
            if let Some(piece) = game.current() {
                prop_assert!(piece.is_consistent());
            }
            if game.game_over() {
                prop_assert!(game.current().is_none());
                break;
            }
        }
    }
}
