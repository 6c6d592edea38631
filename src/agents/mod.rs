//! Agent collaborator contract and a reference policy.
//!
//! Policies live outside the simulation core: they only consume observations
//! and produce actions. `run_episode` is the canonical driver loop; training
//! harnesses wire their own policies through the same three-method contract.

use crate::core::{AgentId, GameRng, SnakeAction, ALL_SNAKE_ACTIONS};
use crate::env::{Environment, Observation};

/// The per-episode contract a policy implements.
pub trait Agent {
    /// Called once when a new episode starts.
    fn begin_episode(&mut self);

    /// Choose an action from the current observation and the reward earned
    /// on the previous tick.
    fn act(&mut self, observation: &Observation, reward: f64) -> SnakeAction;

    /// Called once when this agent's episode has ended.
    fn end_episode(&mut self);
}

/// Uniform random policy with its own seedable RNG.
///
/// Useful as a baseline and for exercising the environment in tests; its
/// randomness is independent of the environment's fruit placement.
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    /// Create a random agent with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn begin_episode(&mut self) {}

    fn act(&mut self, _observation: &Observation, _reward: f64) -> SnakeAction {
        *self
            .rng
            .choose(&ALL_SNAKE_ACTIONS)
            .expect("action list is non-empty")
    }

    fn end_episode(&mut self) {}
}

/// Drive one full episode and return the number of ticks it lasted.
///
/// The canonical loop: `new_episode`, then `choose_action`/`timestep` until
/// both results are terminal. Agents whose episode has already ended are not
/// asked to act.
pub fn run_episode(
    env: &mut Environment,
    agent0: &mut dyn Agent,
    agent1: &mut dyn Agent,
) -> u32 {
    let mut results = env.new_episode();
    agent0.begin_episode();
    agent1.begin_episode();

    while !env.is_episode_over() {
        let id0 = AgentId::new(0);
        let id1 = AgentId::new(1);

        let action0 = if env.is_terminal(id0) {
            SnakeAction::MaintainDirection
        } else {
            agent0.act(&results[id0].observation, results[id0].reward)
        };
        let action1 = if env.is_terminal(id1) {
            SnakeAction::MaintainDirection
        } else {
            agent1.act(&results[id1].observation, results[id1].reward)
        };

        env.choose_action([action0, action1]);
        results = env.timestep();
    }

    agent0.end_episode();
    agent1.end_episode();
    env.timestep_index()
}
