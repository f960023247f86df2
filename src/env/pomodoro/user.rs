//! Stochastic user response model
//!
//! Given a recommendation and the current fatigue, the simulator draws the
//! user's preferred session lengths for this cycle, decides whether they
//! stop early or complain the session was too short, and samples how long
//! they actually worked and rested.
//!
//! # Model
//!
//! ```text
//! preferred_work  = max(5, work_base + N(0, variability))
//! preferred_break = max(1, break_base + N(0, max(1, variability / 3)))
//! fatigue_factor  = fatigue / max_fatigue
//!
//! recommended > preferred:
//!     p_stop  = clip(early_stop_sens * (1 + fatigue_factor * fatigue_infl)
//!                    + 0.9 * mismatch, 0, 0.95)
//! recommended < preferred:
//!     p_short = clip(too_short_sens * mismatch * (1 + 0.5 * U), 0, 0.95)
//! ```
//!
//! The random source is passed in by the caller; the simulator holds no
//! state of its own.

use std::cmp::Ordering;

use rand::Rng;

use super::action::PomodoroAction;
use super::config::{PomodoroConfig, UserProfile};
use super::reward::next_fatigue;
use super::types::UserReport;
use crate::utils::random::{normal, uniform};

/// Probability ceiling for both early stop and too-short reports
const MAX_REPORT_PROB: f64 = 0.95;

/// Weight of the relative length mismatch in the early-stop probability
const MISMATCH_STOP_WEIGHT: f64 = 0.9;

/// Shortest work session a user ever prefers (minutes)
const MIN_PREFERRED_WORK: f64 = 5.0;

/// Shortest break a user ever prefers (minutes)
const MIN_PREFERRED_BREAK: f64 = 1.0;

/// Smallest noise scale on the preferred break (minutes)
const MIN_BREAK_NOISE: f64 = 1.0;

/// Lowest fraction of the session completed before stopping early
const MIN_COMPLETED_FRACTION: f64 = 0.15;

/// Noise on actual work minutes when the user does not stop early
const WORK_NOISE: f64 = 2.0;

/// Maximum overrun of a work session (minutes)
const MAX_WORK_OVERRUN: f64 = 5.0;

/// Noise on actual break minutes
const BREAK_NOISE: f64 = 1.0;

/// Maximum overrun of a break (minutes)
const MAX_BREAK_OVERRUN: f64 = 3.0;

/// What the user did during one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserResponse {
    /// Work length the user wanted this cycle
    pub preferred_work: f64,
    /// Break length the user wanted this cycle
    pub preferred_break: f64,
    /// Work minutes actually done
    pub actual_work: f64,
    /// Break minutes actually taken
    pub actual_break: f64,
    /// The user's self-report
    pub report: UserReport,
    /// Fatigue after the cycle
    pub new_fatigue: f64,
}

/// Simulates a user described by a [`UserProfile`]
#[derive(Debug, Clone, Copy)]
pub struct UserSimulator<'a> {
    profile: &'a UserProfile,
    min_fatigue: f64,
    max_fatigue: f64,
}

impl<'a> UserSimulator<'a> {
    /// Borrow the profile and fatigue bounds from a configuration
    pub fn new(config: &'a PomodoroConfig) -> Self {
        Self {
            profile: &config.user_profile,
            min_fatigue: config.min_fatigue,
            max_fatigue: config.max_fatigue,
        }
    }

    /// Simulate one work/break cycle
    ///
    /// `recommended` must already be validated and clamped. Draws happen in
    /// a fixed order, so the response is a pure function of the arguments
    /// and the state of `rng`.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        recommended: PomodoroAction,
        fatigue: f64,
    ) -> UserResponse {
        let p = self.profile;
        let recommended_work = recommended.work_minutes;
        let recommended_break = recommended.break_minutes;

        let preferred_work =
            MIN_PREFERRED_WORK.max(normal(rng, p.preferred_work_base, p.variability));
        // Not used by the behaviour below, but always drawn
        let preferred_break = MIN_PREFERRED_BREAK.max(normal(
            rng,
            p.preferred_break_base,
            MIN_BREAK_NOISE.max(p.variability / 3.0),
        ));

        let fatigue_factor = fatigue / self.max_fatigue;

        let report = match recommended_work.partial_cmp(&preferred_work) {
            Some(Ordering::Greater) => {
                let length_mismatch = (recommended_work - preferred_work) / preferred_work;
                let early_stop_prob = (p.early_stop_sensitivity
                    * (1.0 + fatigue_factor * p.fatigue_influence)
                    + MISMATCH_STOP_WEIGHT * length_mismatch)
                    .clamp(0.0, MAX_REPORT_PROB);

                UserReport { stopped_early: uniform(rng) < early_stop_prob, too_short: false }
            }
            Some(Ordering::Less) => {
                let length_mismatch = (preferred_work - recommended_work) / preferred_work;
                let too_short_prob = (p.too_short_sensitivity
                    * length_mismatch
                    * (1.0 + 0.5 * uniform(rng)))
                .clamp(0.0, MAX_REPORT_PROB);

                UserReport { stopped_early: false, too_short: uniform(rng) < too_short_prob }
            }
            // Exact match with the drawn preference
            Some(Ordering::Equal) | None => UserReport::default(),
        };

        let actual_work = if report.stopped_early {
            // Tired users give up sooner
            let frac =
                MIN_COMPLETED_FRACTION.max(1.0 - 0.5 * fatigue_factor - 0.4 * uniform(rng));
            (recommended_work * frac).max(1.0)
        } else {
            normal(rng, recommended_work, WORK_NOISE)
                .clamp(1.0, recommended_work + MAX_WORK_OVERRUN)
        };

        let actual_break = normal(rng, recommended_break, BREAK_NOISE)
            .clamp(0.0, recommended_break + MAX_BREAK_OVERRUN);

        let new_fatigue =
            next_fatigue(fatigue, actual_work, actual_break, self.min_fatigue, self.max_fatigue);

        UserResponse {
            preferred_work,
            preferred_break,
            actual_work,
            actual_break,
            report,
            new_fatigue,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// A user whose preferences never fluctuate
    fn steady_config(profile: UserProfile) -> PomodoroConfig {
        PomodoroConfig::new().user_profile(UserProfile { variability: 0.0, ..profile })
    }

    /// Every uniform draw from this source is 0.0
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_exact_preference_sets_no_flags() {
        let config = steady_config(UserProfile::default());
        let sim = UserSimulator::new(&config);

        let response = sim.simulate(&mut zero_rng(), PomodoroAction::new(25.0, 5.0), 3.0);

        assert_eq!(response.preferred_work, 25.0);
        assert_eq!(response.report, UserReport::default());
        // Work noise saturates at the overrun ceiling with an all-zero source
        assert_eq!(response.actual_work, 30.0);
        assert_eq!(response.actual_break, 8.0);
    }

    #[test]
    fn test_too_long_session_stops_early() {
        let profile = UserProfile { early_stop_sensitivity: 0.5, ..UserProfile::default() };
        let config = steady_config(profile);
        let sim = UserSimulator::new(&config);

        let fatigue = 2.5;
        let response = sim.simulate(&mut zero_rng(), PomodoroAction::new(50.0, 10.0), fatigue);

        assert!(response.report.stopped_early);
        assert!(!response.report.too_short);

        // frac = max(0.15, 1 - 0.5 * 0.5 - 0.4 * 0.0) = 0.75
        assert!((response.actual_work - 37.5).abs() < 1e-12);
    }

    #[test]
    fn test_too_short_session_reported() {
        let profile = UserProfile { too_short_sensitivity: 1.0, ..UserProfile::default() };
        let config = steady_config(profile);
        let sim = UserSimulator::new(&config);

        let response = sim.simulate(&mut zero_rng(), PomodoroAction::new(15.0, 5.0), 1.0);

        assert!(response.report.too_short);
        assert!(!response.report.stopped_early);
        assert_eq!(response.actual_work, 20.0);
    }

    #[test]
    fn test_zero_sensitivity_never_reports_too_short() {
        let profile = UserProfile { too_short_sensitivity: 0.0, ..UserProfile::default() };
        let config = steady_config(profile);
        let sim = UserSimulator::new(&config);

        let response = sim.simulate(&mut zero_rng(), PomodoroAction::new(15.0, 5.0), 1.0);
        assert_eq!(response.report, UserReport::default());
    }

    #[test]
    fn test_response_ranges() {
        let config = PomodoroConfig::default();
        let sim = UserSimulator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for i in 0..2000 {
            let work = 15.0 + (i % 36) as f64;
            let brk = 5.0 + (i % 16) as f64;
            let fatigue = 1.0 + (i % 5) as f64;
            let response = sim.simulate(&mut rng, PomodoroAction::new(work, brk), fatigue);

            assert!(response.actual_work >= 1.0);
            assert!(response.actual_work <= work + 5.0);
            assert!(response.actual_break >= 0.0);
            assert!(response.actual_break <= brk + 3.0);
            assert!((1.0..=5.0).contains(&response.new_fatigue));
            assert!(!(response.report.stopped_early && response.report.too_short));
        }
    }

    #[test]
    fn test_same_entropy_same_response() {
        let config = PomodoroConfig::default();
        let sim = UserSimulator::new(&config);
        let action = PomodoroAction::new(32.0, 8.0);

        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(sim.simulate(&mut a, action, 2.0), sim.simulate(&mut b, action, 2.0));
        }
    }
}
