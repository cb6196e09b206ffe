//! rg-gym: reinforcement-learning environments over the rg-core engine
//!
//! [`RogueEnv`] drives one game: it decodes actions into command keys,
//! stops at the first death, and encodes snapshots into observation
//! tensors. [`ParallelRogueEnv`] steps a batch of them in lockstep with
//! automatic resets.

pub mod action;
pub mod encoding;
pub mod engine;
pub mod env;
pub mod error;
pub mod parallel;

pub use action::{ACTION_LEN, ACTION_MEANINGS, ACTIONS, Action};
pub use encoding::ImageSetting;
pub use engine::Engine;
pub use env::{BoxSpace, DEFAULT_MAX_STEPS, DiscreteSpace, RogueEnv, RogueEnvConfig, Step, StepInfo};
pub use error::{EnvError, EnvResult};
pub use parallel::{ParallelConfig, ParallelRogueEnv, ParallelStep};

pub use rg_core::{DungeonMode, GameConfig, GameState, PlayerState, StatusFlag};
