//! Per-tick results handed to agents.
//!
//! A `TimestepResult` is produced fresh every tick and owned by the caller.
//! Its observation is a structural-sharing snapshot of the field, so callers
//! can hold it as long as they like without aliasing engine storage.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{CellType, Point};

/// Why an agent's episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The head entered a wall cell.
    HitWall,
    /// The head entered one of the snake's own body cells.
    HitOwnBody,
    /// The head entered the other snake, or the two bodies crossed.
    HitOtherBody,
    /// The episode reached the configured step limit.
    TimestepLimitExceeded,
}

impl TerminationReason {
    /// Stable snake_case wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::HitWall => "hit_wall",
            TerminationReason::HitOwnBody => "hit_own_body",
            TerminationReason::HitOtherBody => "hit_other_body",
            TerminationReason::TimestepLimitExceeded => "timestep_limit_exceeded",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An agent's view of the field at one tick.
///
/// Independent of the engine's working grid; cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    size: usize,
    cells: Vector<CellType>,
}

impl Observation {
    pub(crate) fn new(size: usize, cells: Vector<CellType>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Side length of the square observation.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cell tag at `cell`. Panics if out of bounds.
    #[must_use]
    pub fn get(&self, cell: Point) -> CellType {
        assert!(
            cell.x >= 0
                && cell.y >= 0
                && (cell.x as usize) < self.size
                && (cell.y as usize) < self.size,
            "cell {} is outside the {}x{} observation",
            cell,
            self.size,
            self.size
        );
        self.cells[cell.y as usize * self.size + cell.x as usize]
    }

    /// The integer cell-type code at `cell`.
    #[must_use]
    pub fn code_at(&self, cell: Point) -> u8 {
        self.get(cell).code()
    }

    /// Flatten into row-major integer codes (length `size * size`).
    #[must_use]
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|tag| tag.code()).collect()
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.cells[row * self.size + col].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Everything an agent learns from one tick.
#[derive(Clone, Debug)]
pub struct TimestepResult {
    /// Snapshot of the field after the transition.
    pub observation: Observation,
    /// Reward earned this tick.
    pub reward: f64,
    /// True once this agent's episode has ended.
    pub is_episode_end: bool,
}

impl std::fmt::Display for TimestepResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}R = {}   end={}",
            self.observation, self.reward, self.is_episode_end
        )
    }
}
