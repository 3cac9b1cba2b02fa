//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (core simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The reference playfield is 12 columns by 20 rows. Coordinates are
//! `(x, y)` with `(0, 0)` at the bottom-left cell and `y` growing upwards,
//! so pieces spawn *above* row `height - 1` and fall towards row 0.
//!
//! # Frame Timing
//!
//! The game advances one gravity step per frame. The frame delay is chosen by
//! the [`Difficulty`] tier at session start:
//!
//! | Tier | Delay |
//! |------|-------|
//! | `Fast` | 120ms |
//! | `Medium` | 250ms |
//! | `Slow` | 400ms |
//!
//! # Examples
//!
//! ```
//! use tetris_2048_types::{BoardConfig, Difficulty, GameAction, PieceKind, RotationDirection};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(
//!     RotationDirection::Clockwise.inverse(),
//!     RotationDirection::CounterClockwise
//! );
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Difficulty::Medium.frame_ms(), 250);
//!
//! let config = BoardConfig::default();
//! assert_eq!((config.width, config.height), (12, 20));
//! ```

use thiserror::Error;

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u16 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Narrowest board that still fits the 4-wide I piece.
pub const MIN_BOARD_WIDTH: u16 = 4;

/// Widest and tallest board the terminal view can lay out.
pub const MAX_BOARD_SIDE: u16 = 256;

/// Frame delay for [`Difficulty::Fast`].
pub const FAST_FRAME_MS: u32 = 120;

/// Frame delay for [`Difficulty::Medium`].
pub const MEDIUM_FRAME_MS: u32 = 250;

/// Frame delay for [`Difficulty::Slow`].
pub const SLOW_FRAME_MS: u32 = 400;

/// Configuration errors reported before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width must be positive")]
    ZeroWidth,
    #[error("board height must be positive")]
    ZeroHeight,
    #[error("board width {width} is too narrow, need at least {min} columns")]
    TooNarrow { width: u16, min: u16 },
    #[error("board of {width}x{height} is too large, at most {max} cells per side")]
    TooLarge { width: u16, height: u16, max: u16 },
    #[error("unknown tetromino type `{0}`")]
    UnknownPiece(String),
    #[error("unknown difficulty `{0}`, expected fast, medium or slow")]
    UnknownDifficulty(String),
}

/// Validated board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardConfig {
    pub width: u16,
    pub height: u16,
}

impl BoardConfig {
    /// Validate user supplied dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::{BoardConfig, ConfigError};
    ///
    /// assert!(BoardConfig::new(12, 20).is_ok());
    /// assert_eq!(BoardConfig::new(0, 20), Err(ConfigError::ZeroWidth));
    /// assert_eq!(
    ///     BoardConfig::new(3, 20),
    ///     Err(ConfigError::TooNarrow { width: 3, min: 4 })
    /// );
    /// ```
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if width < MIN_BOARD_WIDTH {
            return Err(ConfigError::TooNarrow {
                width,
                min: MIN_BOARD_WIDTH,
            });
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::TooLarge {
                width,
                height,
                max: MAX_BOARD_SIDE,
            });
        }
        Ok(Self { width, height })
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: 4 tiles in a vertical bar (4x4 local grid)
/// - **O**: 2x2 square (2x2 local grid)
/// - **Z** / **S**: offset pairs (3x3)
/// - **L** / **J**: foot shapes (3x3)
/// - **T**: three in a row with a stem (3x3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    Z,
    L,
    J,
    S,
    T,
}

impl PieceKind {
    /// All kinds, in the order the random generator indexes them.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Like [`PieceKind::from_str`] but reports the rejected input.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_str(s).ok_or_else(|| ConfigError::UnknownPiece(s.to_string()))
    }

    /// Uppercase letter used by the terminal view.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::T => "T",
        }
    }
}

/// One-cell translation directions for a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// `(dx, dy)` in board coordinates (y grows upwards).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, -1),
        }
    }
}

/// Quarter-turn rotation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The rotation that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::RotationDirection;
    ///
    /// assert_eq!(
    ///     RotationDirection::CounterClockwise.inverse(),
    ///     RotationDirection::Clockwise
    /// );
    /// ```
    pub fn inverse(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Frame delay tiers, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Fast,
    #[default]
    Medium,
    Slow,
}

impl Difficulty {
    /// Delay between two frames in milliseconds.
    pub fn frame_ms(&self) -> u32 {
        match self {
            Difficulty::Fast => FAST_FRAME_MS,
            Difficulty::Medium => MEDIUM_FRAME_MS,
            Difficulty::Slow => SLOW_FRAME_MS,
        }
    }

    /// Parse a tier name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Some(Difficulty::Fast),
            "medium" => Some(Difficulty::Medium),
            "slow" => Some(Difficulty::Slow),
            _ => None,
        }
    }

    /// Like [`Difficulty::from_str`] but reports the rejected input.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_str(s).ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Fast => "fast",
            Difficulty::Medium => "medium",
            Difficulty::Slow => "slow",
        }
    }
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its resting position; it lands on the next tick
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Discard the session and start over
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
