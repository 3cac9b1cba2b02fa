//! Terminal "game renderer" module.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the
//! terminal, instead of going through a widget toolkit. Each board cell is
//! several columns wide so tile values fit inside their blocks.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_2048_core as core;
pub use tetris_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
