//! Tetris 2048 (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetris_2048::{core,input,term,types}`
//! and holds the command-line configuration and logging setup used by the
//! binary.

pub mod config;
pub mod logging;

pub use tetris_2048_core as core;
pub use tetris_2048_input as input;
pub use tetris_2048_term as term;
pub use tetris_2048_types as types;
