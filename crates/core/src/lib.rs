//! Core game logic module - pure, deterministic, and testable
//!
//! A falling-block game where every block carries a 2048-style number. Pieces
//! fall and rotate like Tetris; once one lands, equal numbers stacked on top of
//! each other combine, full rows are cleared for the sum of their values, and
//! isolated floating tiles drop.
//!
//! Nothing here touches the terminal or the clock, so the same seed always
//! produces the same game.
//!
//! # Module Structure
//!
//! - [`position`]: integer grid coordinates, `(0, 0)` at the bottom-left
//! - [`tile`]: a numbered block
//! - [`pieces`]: the seven shape layouts
//! - [`tetromino`]: a falling piece with movement and rotation
//! - [`board`]: landed tiles, merging, line clearing and gap removal
//! - [`rng`]: deterministic random source
//! - [`game_state`]: one play session driven by actions and ticks
//! - [`snapshot`]: render-facing copy of the session
//!
//! # Example
//!
//! ```
//! use tetris_2048_core::{GameState, TickOutcome};
//! use tetris_2048_types::{BoardConfig, Difficulty, GameAction};
//!
//! let mut game = GameState::new(BoardConfig::default(), Difficulty::Medium, 12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // A dropped piece lands on the following tick.
//! assert!(matches!(game.tick(), TickOutcome::Landed(_)));
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod position;
pub mod rng;
pub mod snapshot;
pub mod tetromino;
pub mod tile;

pub use tetris_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Footprint, SettleReport};
pub use game_state::{GameState, TickOutcome};
pub use pieces::{get_shape, PieceShape};
pub use position::Position;
pub use rng::{random_kind, RandomSource, SimpleRng};
pub use snapshot::{GameSnapshot, PieceSnapshot, TileSnapshot};
pub use tetromino::Tetromino;
pub use tile::Tile;
