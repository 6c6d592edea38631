//! Python bindings for the snake environment.
//!
//! # Quick Start
//!
//! ```python
//! import json
//! import snake_env
//!
//! config = {
//!     "field": ["#####", "#A.B#", "#...#", "#.O.#", "#####"],
//!     "initial_snake_length": 1,
//!     "rewards": {"ate_fruit": 1.0, "timestep": -0.01, "died": -1.0},
//! }
//!
//! env = snake_env.Environment(json.dumps(config), seed=42)
//! results = env.new_episode()
//!
//! while not env.is_episode_over():
//!     env.choose_action([0, 0])
//!     results = env.timestep()
//!     print(results[0].observation_numpy())
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// snake-env: a deterministic two-snake grid environment for RL training.
#[pymodule]
fn snake_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEnvironment>()?;
    m.add_class::<PyTimestepResult>()?;

    Ok(())
}
