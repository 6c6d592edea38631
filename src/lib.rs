//! # snake-env
//!
//! A deterministic two-snake grid environment for RL training.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: all randomness flows through one explicitly seeded
//!    generator owned by the engine. Same seed + same action sequence means
//!    identical observation and reward traces.
//!
//! 2. **Closed State**: cell tags, actions, and termination reasons are
//!    closed enums; illegal states are unrepresentable. Runtime adversities
//!    (collisions, step limits) are ordinary data, never errors.
//!
//! 3. **Cheap Per Tick**: the transition runs thousands of times per training
//!    episode. The grid keeps an incremental vacancy index for O(1) fruit
//!    spawning, and observations are O(1) structural-sharing snapshots.
//!
//! ## Architecture
//!
//! - **Fixed priority order**: agent 0's move and footprint write commit
//!   before agent 1's move is evaluated within the same tick. A documented
//!   asymmetry, not a race.
//!
//! - **Footprint-then-read**: each move first records its cell retags, then
//!   death is decided by reading the resulting tags, which is what makes
//!   tail-chasing and same-tick collisions observable.
//!
//! ## Modules
//!
//! - `core`: points, directions, cells, agents, actions, RNG
//! - `grid`: the playing field and its vacancy index
//! - `snake`: per-agent body and heading state
//! - `env`: configuration, the engine, results, statistics, sinks
//! - `agents`: the policy contract and a random baseline
//! - `python`: PyO3 bindings (feature `python`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agents;
pub mod core;
pub mod env;
pub mod error;
pub mod grid;
pub mod snake;

/// Python bindings (requires the `python` feature).
#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    AgentId, AgentPair, CellType, Direction, GameRng, Point, SnakeAction, ALL_DIRECTIONS,
    ALL_SNAKE_ACTIONS,
};

pub use crate::agents::{run_episode, Agent, RandomAgent};
pub use crate::env::{
    CsvStatsWriter, EnvConfig, Environment, EpisodeRecord, EpisodeStatistics, Observation,
    RewardConfig, StatsSink, TerminationReason, TimestepResult,
};
pub use crate::error::EnvError;
pub use crate::grid::Field;
pub use crate::snake::Snake;

/// Current version of snake-env
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
