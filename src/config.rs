//! Command-line configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::{BoardConfig, ConfigError, Difficulty, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Parser, Debug, Clone)]
#[command(name = "tetris-2048", version, about)]
pub struct Config {
    /// Board width in cells
    #[arg(long, default_value_t = BOARD_WIDTH)]
    pub width: u16,

    /// Board height in cells
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    pub height: u16,

    /// Fall speed: fast, medium or slow
    #[arg(long, default_value = "medium", value_parser = Difficulty::parse)]
    pub difficulty: Difficulty,

    /// Random seed; taken from the clock when omitted
    #[arg(long)]
    pub seed: Option<u32>,

    /// Write logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Validated board dimensions.
    pub fn board(&self) -> Result<BoardConfig, ConfigError> {
        BoardConfig::new(self.width, self.height)
    }

    /// The explicit seed, or one derived from the current time.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            // Fold the high bits in so consecutive launches differ.
            (nanos ^ (nanos >> 32)) as u32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["tetris-2048"]);
        assert_eq!(config.board(), Ok(BoardConfig::default()));
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.seed.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::parse_from([
            "tetris-2048",
            "--width",
            "8",
            "--height",
            "16",
            "--difficulty",
            "Fast",
            "--seed",
            "42",
        ]);
        assert_eq!(config.board(), BoardConfig::new(8, 16));
        assert_eq!(config.difficulty, Difficulty::Fast);
        assert_eq!(config.seed(), 42);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let result = Config::try_parse_from(["tetris-2048", "--difficulty", "ludicrous"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_narrow_board_is_rejected() {
        let config = Config::parse_from(["tetris-2048", "--width", "3"]);
        assert_eq!(
            config.board(),
            Err(ConfigError::TooNarrow { width: 3, min: 4 })
        );
    }
}
