//! The stepping environment: configuration, engine, results, statistics.

pub mod config;
pub mod environment;
pub mod result;
pub mod sink;
pub mod stats;

pub use config::{EnvConfig, RewardConfig};
pub use environment::Environment;
pub use result::{Observation, TerminationReason, TimestepResult};
pub use sink::{CsvStatsWriter, StatsSink};
pub use stats::{EpisodeRecord, EpisodeStatistics};
