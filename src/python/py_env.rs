//! Environment bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::SnakeAction;
use crate::env::{EnvConfig, Environment, TimestepResult};

fn to_value_error(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(format!("{err}"))
}

/// Python wrapper for TimestepResult.
#[pyclass(name = "TimestepResult")]
pub struct PyTimestepResult(pub(crate) TimestepResult);

#[pymethods]
impl PyTimestepResult {
    /// Reward earned this tick.
    #[getter]
    fn reward(&self) -> f64 {
        self.0.reward
    }

    /// True once this agent's episode has ended.
    #[getter]
    fn is_episode_end(&self) -> bool {
        self.0.is_episode_end
    }

    /// Observation as an NxN uint8 numpy array of cell-type codes.
    fn observation_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let n = self.0.observation.size();
        PyArray1::from_vec_bound(py, self.0.observation.to_codes())
            .reshape([n, n])
            .map_err(|e| to_value_error(format!("{e}")))
    }

    fn __repr__(&self) -> String {
        format!(
            "TimestepResult(reward={}, is_episode_end={})",
            self.0.reward, self.0.is_episode_end
        )
    }

    fn __str__(&self) -> String {
        format!("{}", self.0)
    }
}

/// Python wrapper for the two-snake environment.
///
/// Unsendable: the environment may hold an attached statistics sink, which
/// is not required to be thread-safe.
#[pyclass(name = "Environment", unsendable)]
pub struct PyEnvironment {
    inner: Environment,
}

#[pymethods]
impl PyEnvironment {
    /// Build an environment from a JSON configuration string and a seed.
    #[new]
    #[pyo3(signature = (config_json, seed = 0))]
    fn new(config_json: &str, seed: u64) -> PyResult<Self> {
        let config = EnvConfig::from_json_str(config_json).map_err(to_value_error)?;
        let inner = Environment::new(config, seed).map_err(to_value_error)?;
        Ok(Self { inner })
    }

    /// Reseed the environment's random generator.
    fn seed(&mut self, seed: u64) {
        self.inner.seed(seed);
    }

    /// Shape of the observation grid as (size, size).
    #[getter]
    fn observation_shape(&self) -> (usize, usize) {
        self.inner.observation_shape()
    }

    /// Number of actions an agent can take.
    #[getter]
    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    /// Reset and begin a new episode; returns one result per agent.
    fn new_episode(&mut self) -> Vec<PyTimestepResult> {
        self.inner
            .new_episode()
            .into_inner()
            .into_iter()
            .map(PyTimestepResult)
            .collect()
    }

    /// Queue both agents' actions by wire code (0, 1, or 2).
    fn choose_action(&mut self, actions: Vec<u8>) -> PyResult<()> {
        let [code0, code1]: [u8; 2] = actions
            .try_into()
            .map_err(|_| to_value_error("expected exactly 2 actions"))?;

        let decode = |code: u8| {
            SnakeAction::from_code(code)
                .ok_or_else(|| to_value_error(format!("unknown action code {code}")))
        };
        self.inner.choose_action([decode(code0)?, decode(code1)?]);
        Ok(())
    }

    /// Advance the simulation one tick; returns one result per agent.
    fn timestep(&mut self) -> Vec<PyTimestepResult> {
        self.inner
            .timestep()
            .into_inner()
            .into_iter()
            .map(PyTimestepResult)
            .collect()
    }

    /// True once both agents' episodes have ended.
    fn is_episode_over(&self) -> bool {
        self.inner.is_episode_over()
    }

    fn __repr__(&self) -> String {
        let (n, _) = self.inner.observation_shape();
        format!(
            "Environment(size={}, timestep={}, over={})",
            n,
            self.inner.timestep_index(),
            self.inner.is_episode_over()
        )
    }
}
