//! Fatigue update and reward
//!
//! Both functions are pure; the environment feeds them the simulated
//! user's behaviour.

use serde::{Deserialize, Serialize};

use super::config::PomodoroConfig;
use super::types::UserReport;

/// Fatigue gained per hour of work
const FATIGUE_PER_WORK_HOUR: f64 = 1.0;

/// Fatigue recovered per hour of break
const RECOVERY_PER_BREAK_HOUR: f64 = 0.6;

/// Reward split into its two additive parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Early-stop penalty, too-short penalty, or scaled adherence reward
    pub behaviour: f64,
    /// Non-positive penalty proportional to normalized fatigue
    pub fatigue: f64,
}

impl RewardBreakdown {
    /// Total scalar reward
    pub fn total(&self) -> f64 {
        self.behaviour + self.fatigue
    }
}

/// Fatigue after a cycle, clipped into `[min_fatigue, max_fatigue]`
pub fn next_fatigue(
    fatigue: f64,
    actual_work: f64,
    actual_break: f64,
    min_fatigue: f64,
    max_fatigue: f64,
) -> f64 {
    let change = (actual_work / 60.0) * FATIGUE_PER_WORK_HOUR
        - (actual_break / 60.0) * RECOVERY_PER_BREAK_HOUR;
    (fatigue + change).clamp(min_fatigue, max_fatigue)
}

/// Compute the reward for one cycle
///
/// Reward logic:
/// - stopped early: `early_stop_penalty`
/// - otherwise reported too short: `too_short_penalty`
/// - otherwise: `adherence_reward * min(1, actual_work / recommended_work)`
///
/// plus `-fatigue_penalty_weight * new_fatigue / max_fatigue` in every case.
pub fn compute_reward(
    config: &PomodoroConfig,
    recommended_work: f64,
    actual_work: f64,
    report: UserReport,
    new_fatigue: f64,
) -> RewardBreakdown {
    let behaviour = if report.stopped_early {
        config.early_stop_penalty
    } else if report.too_short {
        config.too_short_penalty
    } else {
        let adherence_ratio = (actual_work / recommended_work).min(1.0);
        config.adherence_reward * adherence_ratio
    };

    let fatigue = -config.fatigue_penalty_weight * (new_fatigue / config.max_fatigue);

    RewardBreakdown { behaviour, fatigue }
}
