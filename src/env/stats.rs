//! Per-episode bookkeeping fed to external sinks.

use serde::Serialize;

use super::result::{TerminationReason, TimestepResult};
use crate::core::{SnakeAction, ALL_SNAKE_ACTIONS};

/// Running statistics for one agent's episode.
#[derive(Clone, Debug, Default)]
pub struct EpisodeStatistics {
    /// Ticks this agent survived (the tick it died on counts).
    pub timesteps_survived: u32,
    /// Sum of all per-tick rewards.
    pub sum_episode_rewards: f64,
    /// Fruits eaten this episode.
    pub fruits_eaten: u32,
    /// Why the episode ended, once it has.
    pub termination_reason: Option<TerminationReason>,
    action_counter: [u64; 3],
}

impl EpisodeStatistics {
    /// Create empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and prepare for a new episode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold in one tick's result and the action that produced it.
    ///
    /// `action` is `None` for the initial result of `new_episode`.
    pub fn record_timestep(&mut self, action: Option<SnakeAction>, result: &TimestepResult) {
        self.sum_episode_rewards += result.reward;
        if let Some(action) = action {
            self.action_counter[action.code() as usize] += 1;
        }
    }

    /// How often `action` was chosen this episode.
    #[must_use]
    pub fn action_count(&self, action: SnakeAction) -> u64 {
        self.action_counter[action.code() as usize]
    }

    /// Flatten into the end-of-episode record handed to sinks.
    #[must_use]
    pub fn flatten(&self) -> EpisodeRecord {
        EpisodeRecord {
            timesteps_survived: self.timesteps_survived,
            sum_episode_rewards: self.sum_episode_rewards,
            mean_reward: if self.timesteps_survived > 0 {
                Some(self.sum_episode_rewards / f64::from(self.timesteps_survived))
            } else {
                None
            },
            fruits_eaten: self.fruits_eaten,
            termination_reason: self.termination_reason,
            action_counter_maintain_direction: self.action_count(SnakeAction::MaintainDirection),
            action_counter_turn_left: self.action_count(SnakeAction::TurnLeft),
            action_counter_turn_right: self.action_count(SnakeAction::TurnRight),
        }
    }
}

/// Flat summary of one agent's finished episode.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeRecord {
    /// Ticks survived.
    pub timesteps_survived: u32,
    /// Sum of all rewards.
    pub sum_episode_rewards: f64,
    /// Mean reward per tick, absent for zero-length episodes.
    pub mean_reward: Option<f64>,
    /// Fruits eaten.
    pub fruits_eaten: u32,
    /// Why the episode ended.
    pub termination_reason: Option<TerminationReason>,
    /// Times `maintain_direction` was chosen.
    pub action_counter_maintain_direction: u64,
    /// Times `turn_left` was chosen.
    pub action_counter_turn_left: u64,
    /// Times `turn_right` was chosen.
    pub action_counter_turn_right: u64,
}

impl EpisodeRecord {
    /// CSV column names, in row order.
    #[must_use]
    pub fn csv_header() -> String {
        let mut columns = vec![
            "timesteps_survived".to_string(),
            "sum_episode_rewards".to_string(),
            "mean_reward".to_string(),
            "fruits_eaten".to_string(),
            "termination_reason".to_string(),
        ];
        for action in ALL_SNAKE_ACTIONS {
            columns.push(format!("action_counter_{}", action.name()));
        }
        columns.join(",")
    }

    /// One CSV row matching `csv_header`.
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        let mean = self
            .mean_reward
            .map(|m| m.to_string())
            .unwrap_or_default();
        let reason = self
            .termination_reason
            .map(|r| r.as_str().to_string())
            .unwrap_or_default();

        format!(
            "{},{},{},{},{},{},{},{}",
            self.timesteps_survived,
            self.sum_episode_rewards,
            mean,
            self.fruits_eaten,
            reason,
            self.action_counter_maintain_direction,
            self.action_counter_turn_left,
            self.action_counter_turn_right,
        )
    }
}
