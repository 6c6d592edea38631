//! Grid cell tags.
//!
//! Every cell on the field carries exactly one `CellType` tag. The closed
//! enum makes illegal states (a cell that is both wall and body, a body cell
//! with no owner) unrepresentable.
//!
//! Two external encodings exist:
//! - **Observation codes** (`code`): the integer values handed to agents.
//! - **Level-map symbols** (`from_symbol`/`symbol`): the characters used in
//!   level files.

use serde::{Deserialize, Serialize};

use super::agent::AgentId;

/// The tag occupying one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Nothing here; a snake may enter and fruit may spawn.
    Empty,
    /// The single fruit.
    Fruit,
    /// The head of the owning agent's snake.
    Head(AgentId),
    /// A non-head body cell of the owning agent's snake.
    Body(AgentId),
    /// Impassable wall.
    Wall,
}

impl CellType {
    /// The integer observation code for this tag.
    ///
    /// Codes are stable across releases; trained agents depend on them.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            CellType::Empty => 0,
            CellType::Fruit => 1,
            CellType::Wall => 4,
            CellType::Head(agent) => 20 + agent.index() as u8,
            CellType::Body(agent) => 30 + agent.index() as u8,
        }
    }

    /// Parse a level-map symbol, if it is one of the known seven.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(CellType::Head(AgentId::new(0))),
            'B' => Some(CellType::Head(AgentId::new(1))),
            's' => Some(CellType::Body(AgentId::new(0))),
            'x' => Some(CellType::Body(AgentId::new(1))),
            '#' => Some(CellType::Wall),
            'O' => Some(CellType::Fruit),
            '.' => Some(CellType::Empty),
            _ => None,
        }
    }

    /// The level-map symbol for this tag (inverse of `from_symbol`).
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Fruit => 'O',
            CellType::Wall => '#',
            CellType::Head(agent) => {
                if agent.index() == 0 {
                    'A'
                } else {
                    'B'
                }
            }
            CellType::Body(agent) => {
                if agent.index() == 0 {
                    's'
                } else {
                    'x'
                }
            }
        }
    }

    /// True if this cell blocks a head from being stamped onto it.
    ///
    /// Walls and body cells of either snake block; everything else (empty,
    /// fruit, even the other snake's head) is overwritten by the incoming
    /// head. Collision consequences are decided separately by the engine.
    #[must_use]
    pub fn blocks_head(self) -> bool {
        matches!(self, CellType::Wall | CellType::Body(_))
    }
}
