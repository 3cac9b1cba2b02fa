//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game
//! consumes at most one action per frame, so there is no repeat handling here:
//! the terminal's own key repeat drives held keys.

pub mod map;

pub use tetris_2048_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
