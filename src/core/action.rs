//! Actions an agent can take at each tick.
//!
//! Actions only steer: they rotate the snake's heading before the positional
//! update. The snake always moves one cell forward per tick regardless of the
//! chosen action.

use serde::{Deserialize, Serialize};

/// The three per-tick actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnakeAction {
    /// Keep the current heading.
    MaintainDirection,
    /// Rotate the heading one step counter-clockwise through the direction ring.
    TurnLeft,
    /// Rotate the heading one step clockwise through the direction ring.
    TurnRight,
}

/// All actions, in wire-code order.
pub const ALL_SNAKE_ACTIONS: [SnakeAction; 3] = [
    SnakeAction::MaintainDirection,
    SnakeAction::TurnLeft,
    SnakeAction::TurnRight,
];

impl SnakeAction {
    /// The integer wire code for this action (0, 1, or 2).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            SnakeAction::MaintainDirection => 0,
            SnakeAction::TurnLeft => 1,
            SnakeAction::TurnRight => 2,
        }
    }

    /// Parse a wire code back into an action.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SnakeAction::MaintainDirection),
            1 => Some(SnakeAction::TurnLeft),
            2 => Some(SnakeAction::TurnRight),
            _ => None,
        }
    }

    /// Stable snake_case name, used in statistics columns.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SnakeAction::MaintainDirection => "maintain_direction",
            SnakeAction::TurnLeft => "turn_left",
            SnakeAction::TurnRight => "turn_right",
        }
    }
}

impl std::fmt::Display for SnakeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
