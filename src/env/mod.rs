//! Environment traits and implementations
//!
//! This module defines the core environment interface shared by every
//! simulator in the crate, together with the box spaces used to describe
//! observations and actions.

use anyhow::Result;
use rand::Rng;

/// Core trait for RL environments
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Per-step diagnostic record
    type Info;

    /// Reset the environment and return the initial observation
    ///
    /// A `Some(seed)` re-seeds the environment's random source before the
    /// episode starts; `None` keeps drawing from the current stream.
    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, ResetInfo)>;

    /// Step the environment with an action
    fn step(
        &mut self,
        action: Self::Action,
    ) -> Result<StepResult<Self::Observation, Self::Info>>;

    /// Get the observation space
    fn observation_space(&self) -> SpaceInfo;

    /// Get the action space
    fn action_space(&self) -> SpaceInfo;

    /// One-line diagnostic description of the current state
    fn render(&self) -> String;
}

/// Result of an environment step
#[derive(Debug, Clone)]
pub struct StepResult<O, I> {
    /// Next observation
    pub observation: O,

    /// Reward received
    pub reward: f64,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Whether the episode was truncated
    pub truncated: bool,

    /// Additional info
    pub info: I,
}

impl<O, I> StepResult<O, I> {
    /// Whether either end-of-episode flag is set
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Information returned alongside the initial observation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetInfo {
    /// Seed applied by this reset, if any
    pub seed: Option<u64>,
}

/// A continuous box space with per-dimension inclusive bounds
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Lower bound per dimension
    pub low: Vec<f64>,

    /// Upper bound per dimension
    pub high: Vec<f64>,
}

impl SpaceInfo {
    /// Create a one-dimensional box from matching bound vectors
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Self {
        debug_assert_eq!(low.len(), high.len(), "box bounds must have equal length");
        Self { shape: vec![low.len()], low, high }
    }

    /// Number of dimensions
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Whether `values` has the right length and lies inside the bounds
    pub fn contains(&self, values: &[f64]) -> bool {
        values.len() == self.dim()
            && values
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (lo, hi))| v.is_finite() && (*lo..=*hi).contains(v))
    }

    /// Sample a point uniformly from the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&lo, &hi)| lo + rng.gen::<f64>() * (hi - lo))
            .collect()
    }
}

pub mod pomodoro;
pub mod pool;

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_space_contains() {
        let space = SpaceInfo::new(vec![15.0, 5.0], vec![50.0, 20.0]);
        assert_eq!(space.shape, vec![2]);

        assert!(space.contains(&[15.0, 5.0]));
        assert!(space.contains(&[50.0, 20.0]));
        assert!(space.contains(&[30.0, 10.0]));

        assert!(!space.contains(&[14.0, 10.0]));
        assert!(!space.contains(&[30.0, 21.0]));
        assert!(!space.contains(&[30.0]));
        assert!(!space.contains(&[f64::NAN, 10.0]));
    }

    #[test]
    fn test_space_sample_within_bounds() {
        let space = SpaceInfo::new(vec![15.0, 5.0], vec![50.0, 20.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1000 {
            let point = space.sample(&mut rng);
            assert!(space.contains(&point), "sample {:?} escaped the box", point);
        }
    }
}
