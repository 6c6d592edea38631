//! Snake body and heading state for one agent.
//!
//! A snake is an ordered sequence of cells (head first, tail last) plus a
//! heading. The snake never mutates the grid itself; the environment keeps
//! grid tags and body cells consistent by pairing every body change with a
//! footprint update.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::core::{AgentId, Direction, Point};

/// One agent's snake.
#[derive(Clone, Debug)]
pub struct Snake {
    /// Body cells, head first. Always non-empty.
    body: VecDeque<Point>,
    direction: Direction,
    owner: AgentId,
}

impl Snake {
    /// Create a snake of `length` cells with its head at `head`, laid out
    /// along the heading axis (trailing cells extend opposite to `direction`).
    ///
    /// Panics if `length` is zero.
    #[must_use]
    pub fn new(owner: AgentId, head: Point, direction: Direction, length: usize) -> Self {
        assert!(length >= 1, "a snake has at least one cell");

        let step = direction.offset();
        let body = (0..length as i32)
            .map(|i| Point::new(head.x - step.x * i, head.y - step.y * i))
            .collect();

        Self {
            body,
            direction,
            owner,
        }
    }

    /// The owning agent.
    #[must_use]
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    /// Current heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The head cell.
    #[must_use]
    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    /// The tail cell.
    #[must_use]
    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    /// Current length in cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; present for clippy's `len`/`is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Body cells from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// The cell the snake will occupy after its next forward step.
    #[must_use]
    pub fn peek_next_move(&self) -> Point {
        self.head() + self.direction.offset()
    }

    /// Rotate the heading one step counter-clockwise through the direction ring.
    pub fn turn_left(&mut self) {
        self.direction = self.direction.turned_left();
    }

    /// Rotate the heading one step clockwise through the direction ring.
    pub fn turn_right(&mut self) {
        self.direction = self.direction.turned_right();
    }

    /// Step forward and grow by one: the head advances, the tail stays.
    pub fn grow(&mut self) {
        self.body.push_front(self.peek_next_move());
    }

    /// Step forward without growing: the head advances, the tail vacates.
    pub fn advance(&mut self) {
        self.body.push_front(self.peek_next_move());
        self.body.pop_back();
    }

    /// True if any cell of this snake coincides with any cell of `other`.
    ///
    /// Used to detect simultaneous head-on crossings that leave no trace in
    /// the cell tags (the later head stamp overwrites the earlier one).
    #[must_use]
    pub fn overlaps(&self, other: &Snake) -> bool {
        let cells: FxHashSet<Point> = self.body.iter().copied().collect();
        other.body.iter().any(|cell| cells.contains(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(head: Point, length: usize) -> Snake {
        Snake::new(AgentId::new(0), head, Direction::North, length)
    }

    #[test]
    fn test_new_lays_body_behind_head() {
        let s = snake(Point::new(3, 2), 3);

        let cells: Vec<_> = s.cells().collect();
        assert_eq!(
            cells,
            vec![Point::new(3, 2), Point::new(3, 3), Point::new(3, 4)]
        );
        assert_eq!(s.head(), Point::new(3, 2));
        assert_eq!(s.tail(), Point::new(3, 4));
    }

    #[test]
    fn test_new_respects_heading_axis() {
        let s = Snake::new(AgentId::new(1), Point::new(5, 5), Direction::East, 3);

        let cells: Vec<_> = s.cells().collect();
        assert_eq!(
            cells,
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]
        );
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_new_rejects_zero_length() {
        snake(Point::new(0, 0), 0);
    }

    #[test]
    fn test_peek_next_move() {
        let s = snake(Point::new(3, 3), 2);
        assert_eq!(s.peek_next_move(), Point::new(3, 2));
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut s = snake(Point::new(3, 3), 3);
        s.advance();

        assert_eq!(s.len(), 3);
        assert_eq!(s.head(), Point::new(3, 2));
        assert_eq!(s.tail(), Point::new(3, 4));
    }

    #[test]
    fn test_grow_extends_from_head() {
        let mut s = snake(Point::new(3, 3), 3);
        let old_tail = s.tail();
        s.grow();

        assert_eq!(s.len(), 4);
        assert_eq!(s.head(), Point::new(3, 2));
        assert_eq!(s.tail(), old_tail);
    }

    #[test]
    fn test_turns_change_next_move() {
        let mut s = snake(Point::new(3, 3), 1);

        s.turn_right();
        assert_eq!(s.direction(), Direction::East);
        assert_eq!(s.peek_next_move(), Point::new(4, 3));

        s.turn_left();
        s.turn_left();
        assert_eq!(s.direction(), Direction::West);
    }

    #[test]
    fn test_single_cell_snake_advances() {
        let mut s = snake(Point::new(2, 2), 1);
        s.advance();

        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), Point::new(2, 1));
        assert_eq!(s.head(), s.tail());
    }

    #[test]
    fn test_overlaps() {
        let a = snake(Point::new(3, 3), 3);
        let b = Snake::new(AgentId::new(1), Point::new(3, 4), Direction::East, 2);
        let c = Snake::new(AgentId::new(1), Point::new(8, 8), Direction::East, 2);

        assert!(a.overlaps(&b)); // (3, 4) is in both bodies
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
