//! Numbered tiles.
//!
//! A tile is owned by exactly one container at a time: the tetromino that is
//! falling, or the board once the piece has landed. Tiles are moved between
//! containers, never copied.

use crate::position::Position;
use crate::rng::RandomSource;
use crate::types::RotationDirection;

/// A single numbered cell. The value is a power of two, at least 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    value: u32,
    position: Position,
}

impl Tile {
    pub fn new(value: u32, position: Position) -> Self {
        debug_assert!(
            value >= 2 && value.is_power_of_two(),
            "tile value {value} is not a power of two >= 2"
        );
        Self { value, position }
    }

    /// New tile worth 2 or 4 with equal probability.
    pub fn random(position: Position, rng: &mut impl RandomSource) -> Self {
        let value = if rng.next_range(2) == 0 { 2 } else { 4 };
        Self::new(value, position)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position.translate(dx, dy);
    }

    pub fn rotate_around(&mut self, center: Position, direction: RotationDirection) {
        self.position.rotate_around(center, direction);
    }

    /// Absorb an equal tile; returns the new value.
    pub(crate) fn double(&mut self) -> u32 {
        self.value = self.value.saturating_mul(2);
        self.value
    }
}
