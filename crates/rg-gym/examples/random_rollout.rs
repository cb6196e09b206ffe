//! Random-policy rollout over a parallel environment
//!
//! Usage:
//!   cargo run --example random_rollout -p rg-gym -- [OPTIONS]

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rg_gym::{ACTION_LEN, GameConfig, ParallelConfig, ParallelRogueEnv};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
#[command(name = "random_rollout")]
#[command(about = "Drive rogue environments with uniformly random actions", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "8")]
    workers: usize,
    /// Parallel steps to run
    #[arg(short, long, default_value = "2000")]
    steps: usize,
    /// Seed for both the dungeons and the policy
    #[arg(long, default_value = "1")]
    seed: u64,
    #[arg(long, default_value = "500")]
    max_steps: usize,
    /// Game config JSON file; defaults apply when absent
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    let mut env = ParallelRogueEnv::new(ParallelConfig {
        configs: vec![game; args.workers],
        max_steps: args.max_steps,
        seed: Some(args.seed),
        ..ParallelConfig::default()
    })?;
    info!(workers = env.num_workers(), shape = ?env.observation_shape(), "environment ready");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut episodes = 0usize;
    let mut gold = 0.0f32;
    for step in 0..args.steps {
        let actions: Vec<usize> = (0..args.workers)
            .map(|_| rng.gen_range(0..ACTION_LEN))
            .collect();
        let result = env.step_indices(&actions)?;
        gold += result.rewards.iter().sum::<f32>();
        episodes += result.dones.iter().filter(|&&d| d).count();
        if (step + 1) % 500 == 0 {
            info!(step = step + 1, episodes, gold, "progress");
        }
    }

    let batch = env.encode_states()?;
    info!(episodes, gold, batch = ?batch.dim(), "done");
    Ok(())
}
