//! 2D grid coordinates.
//!
//! `Point` doubles as a cell coordinate and as a direction offset:
//! adding a direction's offset to a head position yields the next cell.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// An integer (x, y) pair on the grid.
///
/// ```
/// use snake_env::core::Point;
///
/// let head = Point::new(3, 4);
/// let north = Point::new(0, -1);
/// assert_eq!(head + north, Point::new(3, 3));
/// assert_eq!(head - north, Point::new(3, 5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column index (0 = leftmost).
    pub x: i32,
    /// Row index (0 = topmost).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
