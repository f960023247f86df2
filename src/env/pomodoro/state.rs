//! Episode state and phase tracking

use super::types::PomodoroObservation;

/// Where the environment is in its episode lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Never reset
    Idle,
    /// Between a reset and the step that ends the episode
    Running,
    /// The last step set `terminated` or `truncated`
    Ended,
}

/// Mutable per-episode state
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    /// Current fatigue, always within the configured fatigue bounds
    pub fatigue: f64,
    /// Minutes worked so far today
    pub total_work_today: f64,
    /// Minutes of break so far today
    pub total_break_today: f64,
    /// Number of steps taken this episode
    pub current_step: usize,
    /// Set when the step budget is exhausted
    pub terminated: bool,
    /// Set when a daily minutes budget is exhausted
    pub truncated: bool,
}

impl EpisodeState {
    /// Fresh state for the start of a day
    pub fn new(fatigue: f64) -> Self {
        Self {
            fatigue,
            total_work_today: 0.0,
            total_break_today: 0.0,
            current_step: 0,
            terminated: false,
            truncated: false,
        }
    }

    /// Current observation
    pub fn observation(&self) -> PomodoroObservation {
        PomodoroObservation {
            fatigue: self.fatigue,
            total_work_today: self.total_work_today,
            total_break_today: self.total_break_today,
        }
    }

    /// Phase implied by the end-of-episode flags
    pub fn phase(&self) -> EpisodePhase {
        if self.terminated || self.truncated {
            EpisodePhase::Ended
        } else {
            EpisodePhase::Running
        }
    }
}
