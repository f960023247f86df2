//! Error types for the Pomodoro environment

use thiserror::Error;

/// Errors raised while configuring or driving a [`PomodoroEnv`]
///
/// [`PomodoroEnv`]: crate::env::pomodoro::PomodoroEnv
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// A bound or coefficient violates its invariant
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The action is malformed or outside the action bounds
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// `step` was called before the first `reset`
    #[error("environment must be reset before it can be stepped")]
    ResetRequired,

    /// Reading a configuration file failed
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible Pomodoro operations
pub type Result<T> = std::result::Result<T, PomodoroError>;
