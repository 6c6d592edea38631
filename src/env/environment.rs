//! The simulation engine.
//!
//! ## Episode lifecycle
//!
//! `Environment::new` validates the configuration and builds a first episode;
//! `new_episode` rebuilds everything from the pristine level. Within an
//! episode the driver alternates `choose_action` and `timestep` until both
//! results are terminal or the step limit fires. Nothing is shared across
//! episodes.
//!
//! ## Ordering guarantee
//!
//! Within one tick, agent 0's move and footprint write are fully committed
//! before agent 1's move is evaluated. This is a deliberate, visible
//! asymmetry kept for behavioral compatibility: agent 1 may enter the
//! cell agent 0's tail vacated this tick, but not the other way around.
//!
//! ## Determinism
//!
//! The only randomness is fruit placement, drawn from the engine-owned
//! seedable `GameRng`. The same seed and action sequence produce identical
//! observation and reward traces.

use crate::core::{AgentId, AgentPair, CellType, Direction, GameRng, Point, SnakeAction};
use crate::error::EnvError;
use crate::grid::Field;
use crate::snake::Snake;

use super::config::EnvConfig;
use super::result::{Observation, TerminationReason, TimestepResult};
use super::sink::StatsSink;
use super::stats::EpisodeStatistics;

/// Both snakes start heading north; trailing body cells extend south of the
/// head marker.
const START_HEADING: Direction = Direction::North;

/// The two-snake stepping environment.
pub struct Environment {
    config: EnvConfig,
    /// Field parsed once from the level map; every episode starts from a
    /// structural-sharing clone of it.
    level_field: Field,
    start_cells: AgentPair<Point>,

    field: Field,
    snakes: AgentPair<Snake>,
    fruit: Point,
    rng: GameRng,

    timestep_index: u32,
    terminal: AgentPair<bool>,
    current_actions: Option<[SnakeAction; 2]>,

    stats: AgentPair<EpisodeStatistics>,
    stats_reported: AgentPair<bool>,
    sink: Option<Box<dyn StatsSink>>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("level_field", &self.level_field)
            .field("start_cells", &self.start_cells)
            .field("field", &self.field)
            .field("snakes", &self.snakes)
            .field("fruit", &self.fruit)
            .field("rng", &self.rng)
            .field("timestep_index", &self.timestep_index)
            .field("terminal", &self.terminal)
            .field("current_actions", &self.current_actions)
            .field("stats", &self.stats)
            .field("stats_reported", &self.stats_reported)
            .field("sink", &self.sink.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

impl Environment {
    /// Build an environment, validating the whole configuration up front.
    ///
    /// Fails if the level map is malformed, a head marker is missing, an
    /// initial body would not fit on the field, or a scalar is out of range.
    /// There is no partially-built state: the first episode is ready as soon
    /// as this returns.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        let level_field = Field::from_level(&config.level_map)?;

        let head0 = level_field.find_marker(CellType::Head(AgentId::new(0)))?;
        let head1 = level_field.find_marker(CellType::Head(AgentId::new(1)))?;
        let start_cells = AgentPair::new(|agent| if agent.index() == 0 { head0 } else { head1 });

        let size = level_field.size() as i32;
        let step = START_HEADING.offset();
        for (agent, &head) in start_cells.iter() {
            for i in 0..config.initial_snake_length as i32 {
                let cell = Point::new(head.x - step.x * i, head.y - step.y * i);
                if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
                    return Err(EnvError::InvalidConfig(format!(
                        "initial body for {agent} extends outside the field at {cell}"
                    )));
                }
            }
        }

        let mut env = Self {
            field: level_field.clone(),
            snakes: AgentPair::new(|agent| {
                Snake::new(
                    agent,
                    start_cells[agent],
                    START_HEADING,
                    config.initial_snake_length,
                )
            }),
            level_field,
            start_cells,
            fruit: Point::new(0, 0),
            rng: GameRng::new(seed),
            timestep_index: 0,
            terminal: AgentPair::with_value(false),
            current_actions: None,
            stats: AgentPair::with_default(),
            stats_reported: AgentPair::with_value(false),
            sink: None,
            config,
        };
        env.new_episode();
        Ok(env)
    }

    /// Reseed the random generator for a reproducible run.
    ///
    /// Call before `new_episode` so fruit placement restarts from the seed.
    pub fn seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Attach a statistics sink; it receives every subsequent result.
    pub fn attach_sink(&mut self, sink: impl StatsSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Shape of the observation grid: (size, size).
    #[must_use]
    pub fn observation_shape(&self) -> (usize, usize) {
        (self.level_field.size(), self.level_field.size())
    }

    /// Number of actions an agent can take.
    #[must_use]
    pub fn num_actions(&self) -> usize {
        crate::core::ALL_SNAKE_ACTIONS.len()
    }

    /// The configuration this environment was built from.
    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Current fruit cell.
    #[must_use]
    pub fn fruit(&self) -> Point {
        self.fruit
    }

    /// One agent's snake.
    #[must_use]
    pub fn snake(&self, agent: AgentId) -> &Snake {
        &self.snakes[agent]
    }

    /// One agent's running episode statistics.
    #[must_use]
    pub fn stats(&self, agent: AgentId) -> &EpisodeStatistics {
        &self.stats[agent]
    }

    /// Ticks elapsed in the current episode.
    #[must_use]
    pub fn timestep_index(&self) -> u32 {
        self.timestep_index
    }

    /// True once the given agent's episode has ended.
    #[must_use]
    pub fn is_terminal(&self, agent: AgentId) -> bool {
        self.terminal[agent]
    }

    /// True once both agents' episodes have ended.
    #[must_use]
    pub fn is_episode_over(&self) -> bool {
        AgentId::both().all(|agent| self.terminal[agent])
    }

    /// A fresh snapshot of the field.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::new(self.field.size(), self.field.snapshot())
    }

    /// Reset everything and begin a new episode.
    ///
    /// Rebuilds the field from the pristine level, places both snakes at
    /// their marker cells, spawns one fruit, and clears counters, flags, and
    /// statistics. Returns the initial result pair: zero reward,
    /// non-terminal.
    pub fn new_episode(&mut self) -> AgentPair<TimestepResult> {
        self.field = self.level_field.clone();
        self.snakes = AgentPair::new(|agent| {
            Snake::new(
                agent,
                self.start_cells[agent],
                START_HEADING,
                self.config.initial_snake_length,
            )
        });
        self.field.place_initial_bodies(&self.snakes);
        self.fruit = self.spawn_fruit();

        self.timestep_index = 0;
        self.terminal = AgentPair::with_value(false);
        self.current_actions = None;
        self.stats = AgentPair::with_default();
        self.stats_reported = AgentPair::with_value(false);

        let results = AgentPair::new(|_| TimestepResult {
            observation: self.observation(),
            reward: 0.0,
            is_episode_end: false,
        });
        for agent in AgentId::both() {
            self.stats[agent].record_timestep(None, &results[agent]);
            if let Some(sink) = &mut self.sink {
                sink.record_timestep(agent, &results[agent]);
            }
        }
        results
    }

    /// Queue both agents' actions for the next tick.
    ///
    /// Turns apply to headings immediately; positions do not change until
    /// `timestep`. Actions for already-terminal agents are ignored.
    pub fn choose_action(&mut self, actions: [SnakeAction; 2]) {
        self.current_actions = Some(actions);
        for agent in AgentId::both() {
            if self.terminal[agent] {
                continue;
            }
            match actions[agent.index()] {
                SnakeAction::MaintainDirection => {}
                SnakeAction::TurnLeft => self.snakes[agent].turn_left(),
                SnakeAction::TurnRight => self.snakes[agent].turn_right(),
            }
        }
    }

    /// Advance the simulation by one tick and return one result per agent.
    ///
    /// Resolves agent 0 fully before agent 1 (see the module docs), then
    /// re-checks body overlap once both moves have committed; a simultaneous
    /// head-on crossing leaves no trace in the cell tags because the later
    /// head stamp overwrites the earlier one.
    pub fn timestep(&mut self) -> AgentPair<TimestepResult> {
        self.timestep_index += 1;
        let was_terminal = self.terminal.clone();
        let mut rewards: AgentPair<f64> = AgentPair::with_value(0.0);

        for agent in AgentId::both() {
            if self.terminal[agent] {
                continue;
            }

            let old_head = self.snakes[agent].head();
            let old_tail = self.snakes[agent].tail();

            let freed_tail = if self.snakes[agent].peek_next_move() == self.fruit {
                self.snakes[agent].grow();
                self.fruit = self.spawn_fruit();
                rewards[agent] =
                    self.config.rewards.ate_fruit * self.snakes[agent].len() as f64;
                self.stats[agent].fruits_eaten += 1;
                None
            } else {
                self.snakes[agent].advance();
                rewards[agent] = self.config.rewards.timestep;
                Some(old_tail)
            };

            let new_head = self.snakes[agent].head();
            self.field
                .apply_footprint(agent, old_head, freed_tail, new_head);

            if let Some(reason) = self.death_reason(agent) {
                self.kill(agent, reason);
                rewards[agent] = self.config.rewards.died;
            }
        }

        let crossed = self.snakes[AgentId::new(0)].overlaps(&self.snakes[AgentId::new(1)]);
        if crossed {
            for agent in AgentId::both() {
                if !self.terminal[agent] && !was_terminal[agent] {
                    self.kill(agent, TerminationReason::HitOtherBody);
                    rewards[agent] = self.config.rewards.died;
                }
            }
        }

        if self.timestep_index >= self.config.max_step_limit {
            for agent in AgentId::both() {
                self.terminal[agent] = true;
                self.stats[agent]
                    .termination_reason
                    .get_or_insert(TerminationReason::TimestepLimitExceeded);
            }
        }

        let results = AgentPair::new(|agent| TimestepResult {
            observation: self.observation(),
            reward: rewards[agent],
            is_episode_end: self.terminal[agent],
        });

        let actions = self.current_actions;
        for agent in AgentId::both() {
            if was_terminal[agent] {
                // This agent's episode already ended; its stats are final.
                continue;
            }
            self.stats[agent]
                .record_timestep(actions.map(|a| a[agent.index()]), &results[agent]);
            self.stats[agent].timesteps_survived = self.timestep_index;
            if let Some(sink) = &mut self.sink {
                sink.record_timestep(agent, &results[agent]);
            }
            if self.terminal[agent] && !self.stats_reported[agent] {
                self.stats_reported[agent] = true;
                let record = self.stats[agent].flatten();
                if let Some(sink) = &mut self.sink {
                    sink.episode_end(agent, &record);
                }
            }
        }

        results
    }

    /// Move the fruit to a specific vacant cell.
    ///
    /// Intended for scripted scenarios and tests; normal play respawns fruit
    /// randomly. Panics if `cell` is not currently empty.
    pub fn place_fruit(&mut self, cell: Point) {
        if cell == self.fruit {
            return;
        }
        assert_eq!(
            self.field.get(cell),
            CellType::Empty,
            "fruit can only be placed on an empty cell"
        );
        self.field.set(self.fruit, CellType::Empty);
        self.field.set(cell, CellType::Fruit);
        self.fruit = cell;
    }

    fn spawn_fruit(&mut self) -> Point {
        let cell = self.field.random_vacant_cell(&mut self.rng);
        self.field.set(cell, CellType::Fruit);
        cell
    }

    /// Decide whether `agent` died, reading the tags written by the
    /// footprint. Priority: wall, own body, other agent.
    fn death_reason(&self, agent: AgentId) -> Option<TerminationReason> {
        let head = self.snakes[agent].head();
        let other = agent.other();

        match self.field.get(head) {
            CellType::Wall => Some(TerminationReason::HitWall),
            CellType::Body(owner) if owner == agent => Some(TerminationReason::HitOwnBody),
            CellType::Body(_) => Some(TerminationReason::HitOtherBody),
            CellType::Head(owner) if owner == other => Some(TerminationReason::HitOtherBody),
            _ => {
                if self.snakes[agent].overlaps(&self.snakes[other]) {
                    Some(TerminationReason::HitOtherBody)
                } else {
                    None
                }
            }
        }
    }

    /// Mark an agent dead and re-stamp its head cell so the final frame
    /// still shows the head marker.
    fn kill(&mut self, agent: AgentId, reason: TerminationReason) {
        self.terminal[agent] = true;
        self.stats[agent].termination_reason.get_or_insert(reason);
        self.field
            .set(self.snakes[agent].head(), CellType::Head(agent));
    }
}
