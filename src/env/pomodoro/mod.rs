//! Pomodoro work/break environment
//!
//! Simulates one person's working day as a sequence of Pomodoro cycles. Each
//! step the agent recommends a work length and a break length; a stochastic
//! user model decides how the person actually behaves, their fatigue is
//! updated, and a reward reflecting adherence and fatigue is returned.
//!
//! # Dynamics
//!
//! - State: `[fatigue, total_work_today, total_break_today]`
//! - Actions: `[work_minutes, break_minutes]`, continuous, inside the
//!   configured bounds (out-of-bounds actions are rejected)
//! - Reward: negative when the user stops early or reports the session as
//!   too short, otherwise proportional to adherence; always minus a
//!   normalized fatigue penalty
//! - Truncation: the daily work or break budget is reached
//! - Termination: `max_steps_per_episode` cycles have been taken
//!
//! # Example
//!
//! ```rust
//! use pomodoro_rl::env::{pomodoro::{PomodoroAction, PomodoroConfig, PomodoroEnv}, Environment};
//!
//! let mut env = PomodoroEnv::with_seed(PomodoroConfig::default(), 0).unwrap();
//! let (obs, _) = env.reset(Some(0)).unwrap();
//! assert_eq!(obs.total_work_today, 0.0);
//!
//! let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
//! assert!(result.info.actual_work <= 30.0);
//! ```

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::env::{Environment, ResetInfo, SpaceInfo, StepResult};
use crate::error::PomodoroError;

mod action;
mod config;
mod reward;
mod state;
mod types;
mod user;

pub use action::{validate_action, PomodoroAction};
pub use config::{PomodoroConfig, UserProfile};
pub use reward::{compute_reward, next_fatigue, RewardBreakdown};
pub use state::{EpisodePhase, EpisodeState};
pub use types::{PomodoroInfo, PomodoroObservation, UserReport};
pub use user::{UserResponse, UserSimulator};

/// Pomodoro environment
///
/// Owns its configuration, its episode state and its random source. The
/// source type is a parameter so tests and callers can inject their own;
/// independent instances never share entropy.
#[derive(Debug, Clone)]
pub struct PomodoroEnv<R = ChaCha8Rng> {
    config: PomodoroConfig,
    state: Option<EpisodeState>,
    rng: R,
}

impl PomodoroEnv<ChaCha8Rng> {
    /// Create an environment seeded from OS entropy
    pub fn new(config: PomodoroConfig) -> crate::error::Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an environment with a deterministic seed
    pub fn with_seed(config: PomodoroConfig, seed: u64) -> crate::error::Result<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PomodoroEnv<R> {
    /// Create an environment drawing from the given random source
    ///
    /// Fails with [`PomodoroError::InvalidConfiguration`] if the
    /// configuration does not validate.
    pub fn with_rng(config: PomodoroConfig, rng: R) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config, state: None, rng })
    }

    /// The configuration this environment was built with
    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Current episode state, `None` before the first reset
    pub fn state(&self) -> Option<&EpisodeState> {
        self.state.as_ref()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> EpisodePhase {
        self.state.as_ref().map_or(EpisodePhase::Idle, EpisodeState::phase)
    }

    /// Start a new day with fatigue drawn uniformly from the fatigue range
    fn start_episode(&mut self) -> PomodoroObservation {
        let fatigue = self.rng.gen_range(self.config.min_fatigue..self.config.max_fatigue);
        let state = EpisodeState::new(fatigue);
        let observation = state.observation();
        self.state = Some(state);
        observation
    }

    /// Run one cycle against the current state
    fn advance(
        &mut self,
        action: PomodoroAction,
    ) -> crate::error::Result<StepResult<PomodoroObservation, PomodoroInfo>> {
        let fatigue = match &self.state {
            Some(state) => state.fatigue,
            None => return Err(PomodoroError::ResetRequired),
        };

        // Rejected actions leave both the state and the entropy stream untouched
        let recommended = validate_action(action, &self.config)?;

        if self.phase() == EpisodePhase::Ended {
            tracing::debug!("stepping an episode that already ended");
        }

        let simulator = UserSimulator::new(&self.config);
        let response = simulator.simulate(&mut self.rng, recommended, fatigue);
        let reward = compute_reward(
            &self.config,
            recommended.work_minutes,
            response.actual_work,
            response.report,
            response.new_fatigue,
        );

        let config = &self.config;
        let state = self.state.as_mut().ok_or(PomodoroError::ResetRequired)?;
        state.total_work_today += response.actual_work;
        state.total_break_today += response.actual_break;
        state.fatigue = response.new_fatigue;
        state.current_step += 1;

        // Daily budget exhausted => truncated, cycle count exhausted => terminated
        state.truncated = state.total_work_today >= config.max_work_minutes_day
            || state.total_break_today >= config.max_break_minutes_day;
        state.terminated = state.current_step >= config.max_steps_per_episode;

        tracing::trace!(
            step = state.current_step,
            recommended_work = recommended.work_minutes,
            actual_work = response.actual_work,
            actual_break = response.actual_break,
            stopped_early = response.report.stopped_early,
            too_short = response.report.too_short,
            fatigue = state.fatigue,
            reward = reward.total(),
            "pomodoro step"
        );

        Ok(StepResult {
            observation: state.observation(),
            reward: reward.total(),
            terminated: state.terminated,
            truncated: state.truncated,
            info: PomodoroInfo {
                step: state.current_step,
                recommended_work: recommended.work_minutes,
                recommended_break: recommended.break_minutes,
                actual_work: response.actual_work,
                actual_break: response.actual_break,
                user_report: response.report,
                reward,
            },
        })
    }
}

impl<R: Rng + SeedableRng> Environment for PomodoroEnv<R> {
    type Observation = PomodoroObservation;
    type Action = PomodoroAction;
    type Info = PomodoroInfo;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, ResetInfo)> {
        if let Some(seed) = seed {
            self.rng = R::seed_from_u64(seed);
        }
        let observation = self.start_episode();

        tracing::debug!(?seed, fatigue = observation.fatigue, "pomodoro episode reset");

        Ok((observation, ResetInfo { seed }))
    }

    fn step(
        &mut self,
        action: Self::Action,
    ) -> Result<StepResult<Self::Observation, Self::Info>> {
        Ok(self.advance(action)?)
    }

    fn observation_space(&self) -> SpaceInfo {
        SpaceInfo::new(
            vec![self.config.min_fatigue, 0.0, 0.0],
            vec![
                self.config.max_fatigue,
                self.config.max_work_minutes_day,
                self.config.max_break_minutes_day,
            ],
        )
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo::new(
            vec![self.config.min_work, self.config.min_break],
            vec![self.config.max_work, self.config.max_break],
        )
    }

    fn render(&self) -> String {
        match &self.state {
            Some(state) => format!(
                "[PomodoroEnv] step={} fatigue={:.2} total_work={:.1}m total_break={:.1}m",
                state.current_step, state.fatigue, state.total_work_today, state.total_break_today
            ),
            None => "[PomodoroEnv] not reset".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env() -> PomodoroEnv {
        PomodoroEnv::with_seed(PomodoroConfig::default(), 0).unwrap()
    }

    fn typed_error(err: &anyhow::Error) -> &PomodoroError {
        err.downcast_ref::<PomodoroError>().expect("error should be a PomodoroError")
    }

    #[test]
    fn test_pomodoro_init() {
        let env = make_env();
        assert_eq!(env.phase(), EpisodePhase::Idle);
        assert!(env.state().is_none());
        assert_eq!(env.config().max_steps_per_episode, 50);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let config = PomodoroConfig::new().fatigue_range(3.0, 3.0);
        let err = PomodoroEnv::with_seed(config, 0).unwrap_err();
        assert!(matches!(err, PomodoroError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_pomodoro_reset() {
        let mut env = make_env();
        let (obs, info) = env.reset(Some(0)).unwrap();

        assert_eq!(info.seed, Some(0));
        assert!((1.0..=5.0).contains(&obs.fatigue));
        assert_eq!(obs.total_work_today, 0.0);
        assert_eq!(obs.total_break_today, 0.0);
        assert!(env.observation_space().contains(&obs.to_vec()));

        let state = env.state().unwrap();
        assert_eq!(state.current_step, 0);
        assert!(!state.terminated);
        assert!(!state.truncated);
        assert_eq!(env.phase(), EpisodePhase::Running);
    }

    #[test]
    fn test_reset_with_seed_is_reproducible() {
        let mut env = make_env();
        let (first, _) = env.reset(Some(123)).unwrap();
        env.step(PomodoroAction::new(30.0, 10.0)).unwrap();
        let (second, _) = env.reset(Some(123)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = make_env();
        let err = env.step(PomodoroAction::new(25.0, 5.0)).unwrap_err();
        assert!(matches!(typed_error(&err), PomodoroError::ResetRequired));
    }

    #[test]
    fn test_invalid_action_leaves_state_unchanged() {
        let mut env = make_env();
        env.reset(Some(0)).unwrap();
        env.step(PomodoroAction::new(25.0, 5.0)).unwrap();

        let before_state = env.state().cloned();
        let before_word_pos = env.rng.get_word_pos();

        let err = env.step(PomodoroAction::new(14.0, 5.0)).unwrap_err();
        assert!(matches!(typed_error(&err), PomodoroError::InvalidAction(_)));

        assert_eq!(env.state().cloned(), before_state);
        assert_eq!(env.rng.get_word_pos(), before_word_pos, "rejected action consumed entropy");
    }

    #[test]
    fn test_pomodoro_step_updates_totals() {
        let mut env = make_env();
        let (obs, _) = env.reset(Some(0)).unwrap();

        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();

        assert_eq!(result.observation.total_work_today, result.info.actual_work);
        assert_eq!(result.observation.total_break_today, result.info.actual_break);
        let expected =
            next_fatigue(obs.fatigue, result.info.actual_work, result.info.actual_break, 1.0, 5.0);
        assert_eq!(result.observation.fatigue, expected);
        assert_eq!(result.info.step, 1);
        assert_eq!(result.info.recommended_work, 25.0);
        assert_eq!(result.info.recommended_break, 5.0);
        assert_eq!(result.reward, result.info.reward.total());
    }

    #[test]
    fn test_pomodoro_termination() {
        let mut env = make_env();
        env.reset(Some(0)).unwrap();

        // Manually set steps to one short of the budget
        env.state.as_mut().unwrap().current_step = env.config.max_steps_per_episode - 1;

        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
        assert!(result.terminated, "Episode should terminate at max steps");
        assert!(!result.truncated, "Daily budgets are far from exhausted");
        assert_eq!(env.phase(), EpisodePhase::Ended);
    }

    #[test]
    fn test_pomodoro_truncation_on_work_budget() {
        let mut env = make_env();
        env.reset(Some(0)).unwrap();

        // Any cycle adds at least one minute of work
        env.state.as_mut().unwrap().total_work_today = env.config.max_work_minutes_day - 1.0;

        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
        assert!(result.truncated, "Episode should truncate once the work budget is used");
        assert!(!result.terminated);
    }

    #[test]
    fn test_pomodoro_truncation_on_break_budget() {
        let mut env = make_env();
        env.reset(Some(0)).unwrap();

        env.state.as_mut().unwrap().total_break_today = env.config.max_break_minutes_day;

        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
        assert!(result.truncated);
    }

    #[test]
    fn test_flags_are_recomputed_each_step() {
        let config = PomodoroConfig::new().max_steps_per_episode(1);
        let mut env = PomodoroEnv::with_seed(config, 3).unwrap();
        env.reset(None).unwrap();

        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
        assert!(result.terminated);

        // Stepping past the end keeps working and the flag stays derived from the counter
        let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
        assert!(result.terminated);
        assert_eq!(result.info.step, 2);

        env.reset(None).unwrap();
        assert_eq!(env.phase(), EpisodePhase::Running);
    }

    #[test]
    fn test_pomodoro_episode() {
        let mut env = make_env();
        env.reset(Some(0)).unwrap();

        let mut steps = 0;
        for _ in 0..1000 {
            let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
            steps += 1;
            if result.is_done() {
                break;
            }
        }

        assert!(steps > 0, "Episode should run at least one step");
        assert!(steps <= 50, "Episode should not exceed max_steps_per_episode");
    }

    #[test]
    fn test_pomodoro_spaces() {
        let env = make_env();

        let obs_space = env.observation_space();
        assert_eq!(obs_space.shape, vec![3]);
        assert_eq!(obs_space.low, vec![1.0, 0.0, 0.0]);
        assert_eq!(obs_space.high, vec![5.0, 480.0, 180.0]);

        let action_space = env.action_space();
        assert_eq!(action_space.shape, vec![2]);
        assert_eq!(action_space.low, vec![15.0, 5.0]);
        assert_eq!(action_space.high, vec![50.0, 20.0]);
    }

    #[test]
    fn test_render() {
        let mut env = make_env();
        assert_eq!(env.render(), "[PomodoroEnv] not reset");

        env.reset(Some(0)).unwrap();
        env.state = Some(EpisodeState {
            fatigue: 2.346,
            total_work_today: 50.04,
            total_break_today: 10.0,
            current_step: 2,
            terminated: false,
            truncated: false,
        });
        assert_eq!(
            env.render(),
            "[PomodoroEnv] step=2 fatigue=2.35 total_work=50.0m total_break=10.0m"
        );
    }
}
