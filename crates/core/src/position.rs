//! Integer board coordinates.
//!
//! `(0, 0)` is the bottom-left cell of the playfield, `x` grows to the right
//! and `y` grows upwards. Positions above the visible board (`y >= height`)
//! are legal: freshly positioned pieces start there.

use crate::types::RotationDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift in place by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Copy shifted by `(dx, dy)`.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Quarter-turn about `center`.
    ///
    /// Clockwise maps the offset `(x, y)` to `(y, -x)`, counter-clockwise to
    /// `(-y, x)`. No validity checking happens here.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_core::Position;
    /// use tetris_2048_types::RotationDirection;
    ///
    /// let mut p = Position::new(2, 1);
    /// p.rotate_around(Position::new(1, 1), RotationDirection::Clockwise);
    /// assert_eq!(p, Position::new(1, 0));
    /// ```
    pub fn rotate_around(&mut self, center: Position, direction: RotationDirection) {
        let rx = self.x - center.x;
        let ry = self.y - center.y;
        let (nx, ny) = match direction {
            RotationDirection::Clockwise => (ry, -rx),
            RotationDirection::CounterClockwise => (-ry, rx),
        };
        self.x = center.x + nx;
        self.y = center.y + ny;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        let mut p = Position::new(3, 4);
        p.translate(-1, 2);
        assert_eq!(p, Position::new(2, 6));
        assert_eq!(p.translated(0, -6), Position::new(2, 0));
    }

    #[test]
    fn test_rotate_counter_clockwise() {
        let mut p = Position::new(2, 1);
        p.rotate_around(Position::new(1, 1), RotationDirection::CounterClockwise);
        assert_eq!(p, Position::new(1, 2));
    }

    #[test]
    fn test_rotate_inverse_restores() {
        let center = Position::new(-3, 7);
        let original = Position::new(5, -2);
        let mut p = original;
        p.rotate_around(center, RotationDirection::Clockwise);
        assert_ne!(p, original);
        p.rotate_around(center, RotationDirection::CounterClockwise);
        assert_eq!(p, original);
    }

    #[test]
    fn test_center_is_fixed_point() {
        let center = Position::new(4, 4);
        let mut p = center;
        p.rotate_around(center, RotationDirection::Clockwise);
        assert_eq!(p, center);
    }
}
