//! # Pomodoro RL
//!
//! A stochastic Pomodoro work/break environment for reinforcement learning
//!
//! The environment simulates one person's working day. An agent recommends
//! work and break lengths; a user model reacts by sticking to the plan,
//! stopping early, or complaining the session was too short, and the
//! environment rewards adherence while penalising accumulated fatigue.
//!
//! ## Quick Start
//!
//! ```rust
//! use pomodoro_rl::prelude::*;
//!
//! let mut env = PomodoroEnv::with_seed(PomodoroConfig::default(), 42).unwrap();
//! let (_obs, _info) = env.reset(None).unwrap();
//!
//! loop {
//!     let result = env.step(PomodoroAction::new(25.0, 5.0)).unwrap();
//!     if result.is_done() {
//!         break;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment traits and implementations
pub mod env;

/// Error types
pub mod error;

/// Utility functions and helpers
pub mod utils;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::env::pomodoro::{
        EpisodePhase, PomodoroAction, PomodoroConfig, PomodoroEnv, PomodoroInfo,
        PomodoroObservation, UserProfile, UserReport,
    };
    pub use crate::env::pool::EnvPool;
    pub use crate::env::{Environment, ResetInfo, SpaceInfo, StepResult};
    pub use crate::error::PomodoroError;
}

/// Current version of pomodoro-rl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
