//! Action validation
//!
//! Actions outside the configured bounds are rejected rather than coerced.
//! Accepted actions are clamped afterwards, which only matters for values
//! sitting on a bound.

use serde::{Deserialize, Serialize};

use super::config::PomodoroConfig;
use crate::error::{PomodoroError, Result};

/// A recommended `(work, break)` pair in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PomodoroAction {
    /// Recommended work minutes
    pub work_minutes: f64,
    /// Recommended break minutes
    pub break_minutes: f64,
}

impl PomodoroAction {
    /// Create an action
    pub fn new(work_minutes: f64, break_minutes: f64) -> Self {
        Self { work_minutes, break_minutes }
    }
}

impl From<(f64, f64)> for PomodoroAction {
    fn from((work_minutes, break_minutes): (f64, f64)) -> Self {
        Self { work_minutes, break_minutes }
    }
}

impl TryFrom<&[f64]> for PomodoroAction {
    type Error = PomodoroError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [work_minutes, break_minutes] => Ok(Self::new(*work_minutes, *break_minutes)),
            _ => Err(PomodoroError::InvalidAction(format!(
                "expected 2 components [work, break], got {}",
                values.len()
            ))),
        }
    }
}

impl TryFrom<&[f32]> for PomodoroAction {
    type Error = PomodoroError;

    fn try_from(values: &[f32]) -> Result<Self> {
        let widened: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        Self::try_from(widened.as_slice())
    }
}

/// Check containment in `[min_work, max_work] × [min_break, max_break]`
/// and return the clamped recommendation
pub fn validate_action(action: PomodoroAction, config: &PomodoroConfig) -> Result<PomodoroAction> {
    let PomodoroAction { work_minutes, break_minutes } = action;

    if !work_minutes.is_finite() || !break_minutes.is_finite() {
        return Err(PomodoroError::InvalidAction(format!(
            "action [{work_minutes}, {break_minutes}] has non-finite components"
        )));
    }
    if !(config.min_work..=config.max_work).contains(&work_minutes) {
        return Err(PomodoroError::InvalidAction(format!(
            "work {} outside [{}, {}]",
            work_minutes, config.min_work, config.max_work
        )));
    }
    if !(config.min_break..=config.max_break).contains(&break_minutes) {
        return Err(PomodoroError::InvalidAction(format!(
            "break {} outside [{}, {}]",
            break_minutes, config.min_break, config.max_break
        )));
    }

    Ok(PomodoroAction {
        work_minutes: work_minutes.clamp(config.min_work, config.max_work),
        break_minutes: break_minutes.clamp(config.min_break, config.max_break),
    })
}
