//! Value types exchanged with the Pomodoro environment

use serde::{Deserialize, Serialize};

use super::reward::RewardBreakdown;

/// Observation: `[fatigue, total_work_today, total_break_today]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PomodoroObservation {
    /// Current fatigue level
    pub fatigue: f64,
    /// Minutes worked so far today
    pub total_work_today: f64,
    /// Minutes of break taken so far today
    pub total_break_today: f64,
}

impl PomodoroObservation {
    /// Flatten into the order used by the observation space
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.fatigue, self.total_work_today, self.total_break_today]
    }
}

/// What the simulated user reported about a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReport {
    /// The user stopped the work timer before it ran out
    pub stopped_early: bool,
    /// The user said the work session was too short
    pub too_short: bool,
}

/// Diagnostic record returned by every step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomodoroInfo {
    /// Cycle index after this step (1-based)
    pub step: usize,
    /// Work minutes recommended, after clamping
    pub recommended_work: f64,
    /// Break minutes recommended, after clamping
    pub recommended_break: f64,
    /// Work minutes actually done
    pub actual_work: f64,
    /// Break minutes actually taken
    pub actual_break: f64,
    /// The user's self-report
    pub user_report: UserReport,
    /// Reward split into its behaviour and fatigue parts
    pub reward: RewardBreakdown,
}
