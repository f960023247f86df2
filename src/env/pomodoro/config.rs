//! Pomodoro environment configuration
//!
//! Bounds, reward coefficients and the simulated user's profile. A
//! configuration is validated once when an environment is built and never
//! changes afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PomodoroError, Result};

/// Parameters of the simulated person
///
/// Preferences are in minutes; the sensitivities are dimensionless and
/// roughly in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Baseline preferred work length
    pub preferred_work_base: f64,

    /// Baseline preferred break length
    pub preferred_break_base: f64,

    /// Standard deviation of the preference noise
    pub variability: f64,

    /// Base tendency to stop a session that runs longer than preferred
    pub early_stop_sensitivity: f64,

    /// Tendency to report a session shorter than preferred as too short
    pub too_short_sensitivity: f64,

    /// How strongly fatigue amplifies early stopping
    pub fatigue_influence: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            preferred_work_base: 25.0,
            preferred_break_base: 5.0,
            variability: 4.0,
            early_stop_sensitivity: 0.12,
            too_short_sensitivity: 0.10,
            fatigue_influence: 0.7,
        }
    }
}

impl UserProfile {
    /// Validate profile parameters
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("preferred_work_base", self.preferred_work_base),
            ("preferred_break_base", self.preferred_break_base),
            ("variability", self.variability),
            ("early_stop_sensitivity", self.early_stop_sensitivity),
            ("too_short_sensitivity", self.too_short_sensitivity),
            ("fatigue_influence", self.fatigue_influence),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("user_profile.{name} must be finite")));
            }
        }
        if self.preferred_work_base <= 0.0 {
            return Err(invalid("user_profile.preferred_work_base must be positive"));
        }
        if self.preferred_break_base <= 0.0 {
            return Err(invalid("user_profile.preferred_break_base must be positive"));
        }
        if self.variability < 0.0 {
            return Err(invalid("user_profile.variability must be non-negative"));
        }
        if self.early_stop_sensitivity < 0.0 {
            return Err(invalid("user_profile.early_stop_sensitivity must be non-negative"));
        }
        if self.too_short_sensitivity < 0.0 {
            return Err(invalid("user_profile.too_short_sensitivity must be non-negative"));
        }
        if self.fatigue_influence < 0.0 {
            return Err(invalid("user_profile.fatigue_influence must be non-negative"));
        }
        Ok(())
    }
}

/// Pomodoro environment configuration
///
/// Defaults: work in `[15, 50]` minutes, break in `[5, 20]` minutes,
/// fatigue in `[1, 5]`, a daily budget of 8h work and 3h break, and 50
/// cycles per episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Lowest reachable fatigue
    pub min_fatigue: f64,

    /// Highest reachable fatigue
    pub max_fatigue: f64,

    /// Shortest work session that may be recommended
    pub min_work: f64,

    /// Longest work session that may be recommended
    pub max_work: f64,

    /// Shortest break that may be recommended
    pub min_break: f64,

    /// Longest break that may be recommended
    pub max_break: f64,

    /// Daily work budget; reaching it truncates the episode
    pub max_work_minutes_day: f64,

    /// Daily break budget; reaching it truncates the episode
    pub max_break_minutes_day: f64,

    /// Reward when the user stops a session early
    pub early_stop_penalty: f64,

    /// Reward when the user reports a session as too short
    pub too_short_penalty: f64,

    /// Reward scale for full adherence
    pub adherence_reward: f64,

    /// Weight of the normalized-fatigue penalty applied every step
    pub fatigue_penalty_weight: f64,

    /// Number of work/break cycles in a simulated day
    pub max_steps_per_episode: usize,

    /// Simulated user
    pub user_profile: UserProfile,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            min_fatigue: 1.0,
            max_fatigue: 5.0,
            min_work: 15.0,
            max_work: 50.0,
            min_break: 5.0,
            max_break: 20.0,
            max_work_minutes_day: 8.0 * 60.0,
            max_break_minutes_day: 3.0 * 60.0,
            early_stop_penalty: -2.0,
            too_short_penalty: -1.0,
            adherence_reward: 2.0,
            fatigue_penalty_weight: 1.5,
            max_steps_per_episode: 50,
            user_profile: UserProfile::default(),
        }
    }
}

impl PomodoroConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_fatigue", self.min_fatigue),
            ("max_fatigue", self.max_fatigue),
            ("min_work", self.min_work),
            ("max_work", self.max_work),
            ("min_break", self.min_break),
            ("max_break", self.max_break),
            ("max_work_minutes_day", self.max_work_minutes_day),
            ("max_break_minutes_day", self.max_break_minutes_day),
            ("early_stop_penalty", self.early_stop_penalty),
            ("too_short_penalty", self.too_short_penalty),
            ("adherence_reward", self.adherence_reward),
            ("fatigue_penalty_weight", self.fatigue_penalty_weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }

        if self.min_fatigue >= self.max_fatigue {
            return Err(invalid("min_fatigue must be < max_fatigue"));
        }
        if self.max_fatigue <= 0.0 {
            return Err(invalid("max_fatigue must be positive"));
        }
        if self.min_work >= self.max_work {
            return Err(invalid("min_work must be < max_work"));
        }
        if self.min_work <= 0.0 {
            return Err(invalid("min_work must be positive"));
        }
        if self.min_break >= self.max_break {
            return Err(invalid("min_break must be < max_break"));
        }
        if self.min_break < 0.0 {
            return Err(invalid("min_break must be non-negative"));
        }
        if self.max_work_minutes_day <= 0.0 {
            return Err(invalid("max_work_minutes_day must be positive"));
        }
        if self.max_break_minutes_day <= 0.0 {
            return Err(invalid("max_break_minutes_day must be positive"));
        }
        if self.early_stop_penalty > 0.0 {
            return Err(invalid("early_stop_penalty must be non-positive"));
        }
        if self.too_short_penalty > 0.0 {
            return Err(invalid("too_short_penalty must be non-positive"));
        }
        if self.adherence_reward < 0.0 {
            return Err(invalid("adherence_reward must be non-negative"));
        }
        if self.fatigue_penalty_weight < 0.0 {
            return Err(invalid("fatigue_penalty_weight must be non-negative"));
        }
        if self.max_steps_per_episode == 0 {
            return Err(invalid("max_steps_per_episode must be positive"));
        }

        self.user_profile.validate()
    }

    /// Set the fatigue range
    pub fn fatigue_range(mut self, min: f64, max: f64) -> Self {
        self.min_fatigue = min;
        self.max_fatigue = max;
        self
    }

    /// Set the recommendable work range (minutes)
    pub fn work_range(mut self, min: f64, max: f64) -> Self {
        self.min_work = min;
        self.max_work = max;
        self
    }

    /// Set the recommendable break range (minutes)
    pub fn break_range(mut self, min: f64, max: f64) -> Self {
        self.min_break = min;
        self.max_break = max;
        self
    }

    /// Set the daily work budget (minutes)
    pub fn max_work_minutes_day(mut self, minutes: f64) -> Self {
        self.max_work_minutes_day = minutes;
        self
    }

    /// Set the daily break budget (minutes)
    pub fn max_break_minutes_day(mut self, minutes: f64) -> Self {
        self.max_break_minutes_day = minutes;
        self
    }

    /// Set the early-stop penalty
    pub fn early_stop_penalty(mut self, penalty: f64) -> Self {
        self.early_stop_penalty = penalty;
        self
    }

    /// Set the too-short penalty
    pub fn too_short_penalty(mut self, penalty: f64) -> Self {
        self.too_short_penalty = penalty;
        self
    }

    /// Set the adherence reward
    pub fn adherence_reward(mut self, reward: f64) -> Self {
        self.adherence_reward = reward;
        self
    }

    /// Set the fatigue penalty weight
    pub fn fatigue_penalty_weight(mut self, weight: f64) -> Self {
        self.fatigue_penalty_weight = weight;
        self
    }

    /// Set the number of cycles per episode
    pub fn max_steps_per_episode(mut self, steps: usize) -> Self {
        self.max_steps_per_episode = steps;
        self
    }

    /// Set the simulated user's profile
    pub fn user_profile(mut self, profile: UserProfile) -> Self {
        self.user_profile = profile;
        self
    }
}

fn invalid(message: impl Into<String>) -> PomodoroError {
    PomodoroError::InvalidConfiguration(message.into())
}
