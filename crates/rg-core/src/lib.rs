//! rg-core: dungeon engine for the rogue gym environments
//!
//! This crate contains all game logic with no I/O dependencies: level
//! generation, game rules, snapshots, and the tensor renderers the
//! environments observe the game through.

pub mod action;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod monster;
pub mod player;
pub mod render;
pub mod state;
pub mod symbol;

mod consts;
mod gameloop;
mod rng;

pub use config::{DungeonConfig, EnemyConfig, GameConfig, PlayerConfig};
pub use consts::*;
pub use error::{GameError, GameResult};
pub use gameloop::GameState;
pub use player::{HungerState, Status, StatusFlag};
pub use render::DungeonMode;
pub use rng::{GameRng, gen_ranged_seed, gen_seed};
pub use state::PlayerState;
pub use symbol::{SYMBOLS, Symbol};
