//! End-to-end transition scenarios.
//!
//! Each test scripts a small, fully determined situation and checks the
//! transition outcome: movement, fruit consumption, every collision kind,
//! the step-limit cutoff, and the fixed agent-0-first resolution order.

use snake_env::{
    AgentId, CellType, EnvConfig, Environment, Point, RewardConfig, SnakeAction,
    TerminationReason,
};

const FRUIT_REWARD: f64 = 1.0;
const STEP_REWARD: f64 = -0.01;
const DEATH_REWARD: f64 = -1.0;

fn rows(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// 7x7 bordered field, both snakes apart, heading north.
fn bordered_7x7(seed: u64) -> Environment {
    let level = rows(&[
        "#######", //
        "#.....#", //
        "#.....#", //
        "#.A.B.#", //
        "#.....#", //
        "#.....#", //
        "#######",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(3);
    Environment::new(config, seed).unwrap()
}

fn maintain(env: &mut Environment) -> snake_env::AgentPair<snake_env::TimestepResult> {
    env.choose_action([SnakeAction::MaintainDirection, SnakeAction::MaintainDirection]);
    env.timestep()
}

#[test]
fn both_agents_advance_one_cell_north() {
    let mut env = bordered_7x7(42);
    env.place_fruit(Point::new(1, 5)); // away from both paths

    let results = maintain(&mut env);

    assert_eq!(env.snake(AgentId::new(0)).head(), Point::new(2, 2));
    assert_eq!(env.snake(AgentId::new(1)).head(), Point::new(4, 2));
    for agent in AgentId::both() {
        assert_eq!(results[agent].reward, STEP_REWARD);
        assert!(!results[agent].is_episode_end);
        assert_eq!(env.snake(agent).len(), 3);
    }

    // The grid reflects the move: new heads stamped, old heads now body,
    // vacated tails empty.
    let obs = &results[AgentId::new(0)].observation;
    assert_eq!(obs.get(Point::new(2, 2)), CellType::Head(AgentId::new(0)));
    assert_eq!(obs.get(Point::new(2, 3)), CellType::Body(AgentId::new(0)));
    assert_eq!(obs.get(Point::new(2, 5)), CellType::Empty);
}

#[test]
fn eating_fruit_grows_and_respawns() {
    let mut env = bordered_7x7(42);
    let fruit_cell = Point::new(2, 2); // directly in front of agent 0
    env.place_fruit(fruit_cell);

    let results = maintain(&mut env);
    let agent0 = AgentId::new(0);

    assert_eq!(env.snake(agent0).len(), 4);
    assert_eq!(env.snake(agent0).head(), fruit_cell);
    assert_ne!(env.fruit(), fruit_cell, "fruit must move after being eaten");
    assert_eq!(
        results[agent0].observation.get(env.fruit()),
        CellType::Fruit
    );

    // Reward scales with the new length; the per-step reward is not added.
    assert_eq!(results[agent0].reward, FRUIT_REWARD * 4.0);
    assert!(!results[agent0].is_episode_end);
    assert_eq!(env.stats(agent0).fruits_eaten, 1);

    // Growth keeps the tail: no cell was freed.
    assert_eq!(env.snake(agent0).tail(), Point::new(2, 5));
    assert_eq!(
        results[agent0].observation.get(Point::new(2, 5)),
        CellType::Body(agent0)
    );
}

#[test]
fn hitting_a_wall_terminates_with_death_penalty() {
    let mut env = bordered_7x7(42);
    env.place_fruit(Point::new(1, 5));
    let agent0 = AgentId::new(0);

    // West, two cells to the border.
    env.choose_action([SnakeAction::TurnLeft, SnakeAction::MaintainDirection]);
    let results = env.timestep();
    assert!(!results[agent0].is_episode_end);

    env.choose_action([SnakeAction::MaintainDirection, SnakeAction::TurnRight]);
    let results = env.timestep();

    assert!(results[agent0].is_episode_end);
    assert_eq!(results[agent0].reward, DEATH_REWARD);
    assert_eq!(
        env.stats(agent0).termination_reason,
        Some(TerminationReason::HitWall)
    );

    // The final frame keeps the head marker visible on the crash cell.
    assert_eq!(
        results[agent0].observation.get(Point::new(0, 3)),
        CellType::Head(agent0)
    );

    // The survivor keeps its ordinary reward and stays alive.
    assert_eq!(results[AgentId::new(1)].reward, STEP_REWARD);
    assert!(!results[AgentId::new(1)].is_episode_end);
}

#[test]
fn running_into_own_body_terminates() {
    // Length 5 gives the snake enough body to wrap onto itself.
    let level = rows(&[
        "#########", //
        "#.......#", //
        "#.......#", //
        "#.A...B.#", //
        "#.......#", //
        "#.......#", //
        "#.......#", //
        "#.......#", //
        "#########",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(5);
    let mut env = Environment::new(config, 42).unwrap();
    env.place_fruit(Point::new(7, 7));
    let agent0 = AgentId::new(0);

    // Right, right, right: a tight U-turn back into the still-present body.
    env.choose_action([SnakeAction::TurnRight, SnakeAction::MaintainDirection]);
    env.timestep();
    env.choose_action([SnakeAction::TurnRight, SnakeAction::MaintainDirection]);
    env.timestep();
    env.choose_action([SnakeAction::TurnRight, SnakeAction::TurnRight]);
    let results = env.timestep();

    assert!(results[agent0].is_episode_end);
    assert_eq!(results[agent0].reward, DEATH_REWARD);
    assert_eq!(
        env.stats(agent0).termination_reason,
        Some(TerminationReason::HitOwnBody)
    );
}

#[test]
fn head_on_crossing_kills_both() {
    let mut env = bordered_7x7(42);
    env.place_fruit(Point::new(1, 5));

    // Heads at (2,3) and (4,3); turn them toward each other so both compute
    // (3,3) as their next head cell.
    env.choose_action([SnakeAction::TurnRight, SnakeAction::TurnLeft]);
    let results = env.timestep();

    for agent in AgentId::both() {
        assert!(results[agent].is_episode_end);
        assert_eq!(results[agent].reward, DEATH_REWARD);
        assert_eq!(
            env.stats(agent).termination_reason,
            Some(TerminationReason::HitOtherBody)
        );
    }
    assert!(env.is_episode_over());

    // The contested cell still shows a head marker in the final frame.
    assert!(matches!(
        results[AgentId::new(1)].observation.get(Point::new(3, 3)),
        CellType::Head(_)
    ));
}

#[test]
fn step_limit_cuts_off_both_agents() {
    let level = rows(&[
        "#######", //
        "#.....#", //
        "#.....#", //
        "#.A.B.#", //
        "#.....#", //
        "#.....#", //
        "#######",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(3)
    .with_max_step_limit(2);
    let mut env = Environment::new(config, 42).unwrap();
    env.place_fruit(Point::new(1, 5));

    let results = maintain(&mut env);
    for agent in AgentId::both() {
        assert!(!results[agent].is_episode_end);
    }

    let results = maintain(&mut env);
    for agent in AgentId::both() {
        assert!(results[agent].is_episode_end);
        // The cutoff does not touch the tick's reward.
        assert_eq!(results[agent].reward, STEP_REWARD);
        assert_eq!(
            env.stats(agent).termination_reason,
            Some(TerminationReason::TimestepLimitExceeded)
        );
    }
    assert!(env.is_episode_over());
}

#[test]
fn tail_chasing_is_legal_indefinitely() {
    // A length-4 snake turning right every tick cycles a 2x2 block, entering
    // the cell its own tail vacates each move.
    let level = rows(&[
        "#######", //
        "#.....#", //
        "#.A.B.#", //
        "#.....#", //
        "#.....#", //
        "#.....#", //
        "#######",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(4)
    .with_max_step_limit(1000);
    let mut env = Environment::new(config, 1).unwrap();
    env.place_fruit(Point::new(5, 5));
    let agent0 = AgentId::new(0);

    for _ in 0..20 {
        env.choose_action([SnakeAction::TurnRight, SnakeAction::MaintainDirection]);
        let results = env.timestep();
        assert!(
            !results[agent0].is_episode_end,
            "tail chasing must not kill the snake"
        );
        assert_eq!(env.snake(agent0).len(), 4);
    }
}

/// Agent 0 resolves first: its vacated tail cell is already free when agent 1
/// moves into it.
#[test]
fn later_agent_may_enter_earlier_agents_vacated_tail() {
    let level = rows(&[
        "#########", //
        "#.......#", //
        "#.A.....#", //
        "#.......#", //
        "#.......#", //
        "#.B.....#", //
        "#.......#", //
        "#.......#", //
        "#########",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(3);
    let mut env = Environment::new(config, 42).unwrap();
    env.place_fruit(Point::new(6, 6));

    // Agent 0's tail (2,4) vacates this tick; agent 1's head moves into it.
    let results = maintain(&mut env);

    assert_eq!(env.snake(AgentId::new(1)).head(), Point::new(2, 4));
    for agent in AgentId::both() {
        assert!(!results[agent].is_episode_end);
    }
}

/// The mirror image: agent 0 moving into agent 1's tail dies, because agent 1
/// has not vacated it yet when agent 0 is resolved.
#[test]
fn earlier_agent_dies_on_later_agents_tail() {
    let level = rows(&[
        "#########", //
        "#.......#", //
        "#.B.....#", //
        "#.......#", //
        "#.......#", //
        "#.A.....#", //
        "#.......#", //
        "#.......#", //
        "#########",
    ]);
    let config = EnvConfig::new(
        level,
        RewardConfig::new(FRUIT_REWARD, STEP_REWARD, DEATH_REWARD),
    )
    .with_initial_snake_length(3);
    let mut env = Environment::new(config, 42).unwrap();
    env.place_fruit(Point::new(6, 6));

    let results = maintain(&mut env);
    let agent0 = AgentId::new(0);

    assert!(results[agent0].is_episode_end);
    assert_eq!(
        env.stats(agent0).termination_reason,
        Some(TerminationReason::HitOtherBody)
    );

    // Agent 1 moved afterwards, freeing its tail, and survives.
    assert!(!results[AgentId::new(1)].is_episode_end);
    assert_eq!(env.snake(AgentId::new(1)).head(), Point::new(2, 1));
}

#[test]
fn side_collision_into_other_body_kills_both_crossers() {
    let mut env = bordered_7x7(42);
    env.place_fruit(Point::new(1, 5));

    // Send agent 1 west across agent 0's column while agent 0 marches north:
    // agent 1's head lands inside agent 0's body.
    env.choose_action([SnakeAction::MaintainDirection, SnakeAction::TurnLeft]);
    let results = env.timestep();

    // Agent 1 moved into (3,3), not yet touching agent 0.
    assert!(!results[AgentId::new(1)].is_episode_end);

    env.choose_action([SnakeAction::MaintainDirection, SnakeAction::MaintainDirection]);
    let results = env.timestep();

    // Agent 1's head is stuck inside agent 0's body at the end of the tick,
    // so the crossing takes both agents down.
    for agent in AgentId::both() {
        assert!(results[agent].is_episode_end);
        assert_eq!(
            env.stats(agent).termination_reason,
            Some(TerminationReason::HitOtherBody)
        );
    }
}
