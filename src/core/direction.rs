//! Snake headings and the cyclic turn order.
//!
//! Directions live in the fixed ring North → East → South → West. Turning
//! left or right moves one step through that ring by index, wrapping at the
//! ends. "Left" and "right" are therefore *logical*, defined by position in
//! the canonical list, not by the snake's own facing. This matches the
//! behavior agents are trained against and is kept as-is.

use serde::{Deserialize, Serialize};

use super::point::Point;

/// One of the four unit headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing y.
    North,
    /// Toward increasing x.
    East,
    /// Toward increasing y.
    South,
    /// Toward decreasing x.
    West,
}

/// The canonical direction ring, in turn order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// The unit offset this heading moves by.
    ///
    /// y grows downward (row-major grid), so North is (0, -1).
    #[must_use]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Position of this direction in the canonical ring.
    #[must_use]
    pub fn ring_index(self) -> usize {
        ALL_DIRECTIONS
            .iter()
            .position(|&d| d == self)
            .expect("direction is in the canonical ring")
    }

    /// The heading one step counter-clockwise through the ring.
    ///
    /// ```
    /// use snake_env::core::Direction;
    ///
    /// assert_eq!(Direction::North.turned_left(), Direction::West);
    /// assert_eq!(Direction::East.turned_left(), Direction::North);
    /// ```
    #[must_use]
    pub fn turned_left(self) -> Self {
        ALL_DIRECTIONS[(self.ring_index() + ALL_DIRECTIONS.len() - 1) % ALL_DIRECTIONS.len()]
    }

    /// The heading one step clockwise through the ring.
    #[must_use]
    pub fn turned_right(self) -> Self {
        ALL_DIRECTIONS[(self.ring_index() + 1) % ALL_DIRECTIONS.len()]
    }
}
