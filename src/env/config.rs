//! Environment configuration.
//!
//! Configurations typically come from JSON files (the same shape the training
//! tooling consumes): a `field` block of level-map rows, the initial snake
//! length, the three reward scalars, and an optional step limit. All reward
//! keys are required: a missing key is a parse error, not a silent default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EnvError;

/// The three reward scalars.
///
/// Every key is mandatory; deserialization fails fast if one is missing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward unit for eating a fruit, scaled by the snake's new length.
    pub ate_fruit: f64,
    /// Reward for surviving a timestep without eating.
    pub timestep: f64,
    /// Reward that replaces everything else accrued on the tick an agent dies.
    pub died: f64,
}

impl RewardConfig {
    /// Create a reward configuration.
    #[must_use]
    pub const fn new(ate_fruit: f64, timestep: f64, died: f64) -> Self {
        Self {
            ate_fruit,
            timestep,
            died,
        }
    }
}

fn default_step_limit() -> u32 {
    1000
}

fn default_snake_length() -> usize {
    3
}

/// Complete environment configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Level map rows, one string per row (symbol table: `A B s x # O .`).
    #[serde(rename = "field")]
    pub level_map: Vec<String>,

    /// Initial snake length in cells.
    #[serde(default = "default_snake_length")]
    pub initial_snake_length: usize,

    /// Reward scalars.
    pub rewards: RewardConfig,

    /// Tick count at which the episode is cut off for both agents.
    #[serde(default = "default_step_limit")]
    pub max_step_limit: u32,
}

impl EnvConfig {
    /// Create a configuration with the default snake length (3) and step
    /// limit (1000).
    #[must_use]
    pub fn new(level_map: Vec<String>, rewards: RewardConfig) -> Self {
        Self {
            level_map,
            initial_snake_length: default_snake_length(),
            rewards,
            max_step_limit: default_step_limit(),
        }
    }

    /// Set the initial snake length.
    #[must_use]
    pub fn with_initial_snake_length(mut self, length: usize) -> Self {
        self.initial_snake_length = length;
        self
    }

    /// Set the step limit.
    #[must_use]
    pub fn with_max_step_limit(mut self, limit: u32) -> Self {
        self.max_step_limit = limit;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, EnvError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the scalar fields.
    ///
    /// Level-map geometry, symbols, and head markers are checked when the
    /// environment is constructed; this covers everything else.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.initial_snake_length < 1 {
            return Err(EnvError::InvalidConfig(
                "initial_snake_length must be at least 1".into(),
            ));
        }
        if self.max_step_limit < 1 {
            return Err(EnvError::InvalidConfig(
                "max_step_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
