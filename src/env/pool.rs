//! Vectorized environment pool for parallel execution
//!
//! This module runs many independent environment instances side by side
//! using Rayon. Every instance owns its own state and random source, so
//! stepping them in parallel never shares anything between workers.
//!
//! # Example
//!
//! ```rust
//! use pomodoro_rl::env::{
//!     pomodoro::{PomodoroAction, PomodoroConfig, PomodoroEnv},
//!     pool::EnvPool,
//! };
//!
//! // Create pool with 4 parallel environments
//! let mut pool = EnvPool::new(|| PomodoroEnv::new(PomodoroConfig::default()).unwrap(), 4);
//!
//! // Reset all environments in parallel; environment i is seeded with 7 + i
//! let observations = pool.reset(Some(7)).unwrap();
//! assert_eq!(observations.len(), 4);
//!
//! // Step all environments in parallel, one action per environment
//! let actions = vec![PomodoroAction::new(25.0, 5.0); 4];
//! let results = pool.step(&actions).unwrap();
//! assert_eq!(results.len(), 4);
//! ```

use anyhow::Result;
use rayon::prelude::*;

use crate::env::{Environment, SpaceInfo, StepResult};

/// A pool of environments for parallel execution
///
/// EnvPool manages multiple environment instances and executes operations
/// across them in parallel using Rayon's thread pool.
pub struct EnvPool<E: Environment> {
    /// Vector of environment instances
    envs: Vec<E>,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
    E::Info: Send,
{
    /// Create a new environment pool
    ///
    /// # Arguments
    ///
    /// * `env_fn` - Factory function to create environment instances
    /// * `num_envs` - Number of parallel environments
    pub fn new<F>(env_fn: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        let envs = (0..num_envs).map(|_| env_fn()).collect();
        Self { envs }
    }

    /// Reset all environments in parallel
    ///
    /// With `Some(seed)`, environment `i` is re-seeded with `seed + i` so the
    /// whole pool is reproducible while each member draws a distinct stream.
    /// Returns one initial observation per environment.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Vec<E::Observation>> {
        self.envs
            .par_iter_mut()
            .enumerate()
            .map(|(i, env)| {
                let env_seed = seed.map(|s| s.wrapping_add(i as u64));
                env.reset(env_seed).map(|(observation, _)| observation)
            })
            .collect()
    }

    /// Step all environments in parallel with given actions
    ///
    /// Fails with the first error any environment reports.
    ///
    /// # Panics
    ///
    /// Panics if the number of actions doesn't match the number of
    /// environments.
    pub fn step(
        &mut self,
        actions: &[E::Action],
    ) -> Result<Vec<StepResult<E::Observation, E::Info>>> {
        assert_eq!(
            actions.len(),
            self.envs.len(),
            "Number of actions must match number of environments"
        );

        self.envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .map(|(env, action)| env.step(action.clone()))
            .collect()
    }

    /// Get the number of environments in the pool
    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Get observation space information from first environment
    pub fn observation_space(&self) -> Option<SpaceInfo> {
        self.envs.first().map(Environment::observation_space)
    }

    /// Get action space information from first environment
    pub fn action_space(&self) -> Option<SpaceInfo> {
        self.envs.first().map(Environment::action_space)
    }

    /// Reset a specific environment by index
    ///
    /// # Panics
    ///
    /// Panics if `env_id` is out of range.
    pub fn reset_env(&mut self, env_id: usize, seed: Option<u64>) -> Result<E::Observation> {
        self.envs[env_id].reset(seed).map(|(observation, _)| observation)
    }

    /// Access a single environment
    pub fn get(&self, env_id: usize) -> Option<&E> {
        self.envs.get(env_id)
    }
}

/// Result of stepping an environment pool
///
/// Contains observations, rewards, termination flags and infos for all
/// environments.
#[derive(Debug, Clone)]
pub struct PoolStepResult<O, I> {
    /// Observations for each environment
    pub observations: Vec<O>,

    /// Rewards for each environment
    pub rewards: Vec<f64>,

    /// Termination flags for each environment
    pub terminated: Vec<bool>,

    /// Truncation flags for each environment
    pub truncated: Vec<bool>,

    /// Per-step info for each environment
    pub infos: Vec<I>,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
    E::Info: Send,
{
    /// Step all environments and return structured result
    ///
    /// This is a convenience method that unpacks individual StepResults
    /// into a single PoolStepResult with parallel vectors.
    pub fn step_structured(
        &mut self,
        actions: &[E::Action],
    ) -> Result<PoolStepResult<E::Observation, E::Info>> {
        let results = self.step(actions)?;
        let n = results.len();

        let mut structured = PoolStepResult {
            observations: Vec::with_capacity(n),
            rewards: Vec::with_capacity(n),
            terminated: Vec::with_capacity(n),
            truncated: Vec::with_capacity(n),
            infos: Vec::with_capacity(n),
        };

        for result in results {
            structured.observations.push(result.observation);
            structured.rewards.push(result.reward);
            structured.terminated.push(result.terminated);
            structured.truncated.push(result.truncated);
            structured.infos.push(result.info);
        }

        Ok(structured)
    }
}
