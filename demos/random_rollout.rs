//! Random-policy rollouts of the Pomodoro environment
//!
//! Runs a few seeded episodes with uniformly sampled recommendations and
//! logs every cycle, which is a quick way to eyeball the user model.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example random_rollout
//! ```

use anyhow::Result;
use pomodoro_rl::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    const EPISODES: u64 = 5;
    const BASE_SEED: u64 = 0;

    let config = PomodoroConfig::default();
    let mut env = PomodoroEnv::with_seed(config, BASE_SEED)?;
    let action_space = env.action_space();
    let mut action_rng = ChaCha8Rng::seed_from_u64(BASE_SEED);

    tracing::info!("Environment: Pomodoro (random policy)");
    tracing::info!("  Action low: {:?}", action_space.low);
    tracing::info!("  Action high: {:?}", action_space.high);
    tracing::info!("  Episodes: {}", EPISODES);

    for episode in 0..EPISODES {
        let (obs, _) = env.reset(Some(BASE_SEED + episode))?;
        tracing::info!("Episode {} starts with fatigue {:.2}", episode, obs.fatigue);

        let mut episode_return = 0.0;
        let mut early_stops = 0;
        let mut too_short = 0;

        loop {
            let action = PomodoroAction::try_from(action_space.sample(&mut action_rng).as_slice())?;
            let result = env.step(action)?;

            episode_return += result.reward;
            early_stops += usize::from(result.info.user_report.stopped_early);
            too_short += usize::from(result.info.user_report.too_short);

            tracing::info!(
                "{} | work {:.1}->{:.1} break {:.1}->{:.1} reward {:.3}",
                env.render(),
                result.info.recommended_work,
                result.info.actual_work,
                result.info.recommended_break,
                result.info.actual_break,
                result.reward
            );

            if result.is_done() {
                let cause =
                    if result.truncated { "daily budget reached" } else { "cycle limit reached" };
                tracing::info!(
                    "Episode {} ended after {} cycles ({}): return {:.2}, early stops {}, too short {}",
                    episode,
                    result.info.step,
                    cause,
                    episode_return,
                    early_stops,
                    too_short
                );
                break;
            }
        }
    }

    Ok(())
}
