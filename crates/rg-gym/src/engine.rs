//! The engine seam
//!
//! Environments only talk to the game through [`Engine`]. [`GameState`] is
//! the real implementation; tests plug in scripted ones.

use ndarray::Array3;
use rg_core::{DungeonMode, GameResult, GameState, PlayerState, StatusFlag};

/// What an environment needs from one game instance
pub trait Engine {
    /// Apply one command; `true` only for the command that ends the game
    fn react(&mut self, key: char) -> GameResult<bool>;
    /// Reinitialize, using a pending seed if there is one
    fn reset(&mut self) -> GameResult<()>;
    /// Seed for the next reset only
    fn set_seed(&mut self, seed: u64);
    fn snapshot(&self) -> PlayerState;
    /// (height, width)
    fn screen_size(&self) -> (usize, usize);
    fn dungeon_channels(&self) -> usize;
    /// Config JSON that rebuilds this instance
    fn dump_config(&self) -> GameResult<String>;
    /// Commands applied since construction
    fn dump_history(&self) -> String;
    fn render(
        &self,
        state: &PlayerState,
        mode: DungeonMode,
        flags: StatusFlag,
        with_history: bool,
    ) -> GameResult<Array3<f32>>;
}

impl Engine for GameState {
    fn react(&mut self, key: char) -> GameResult<bool> {
        GameState::react(self, key)
    }

    fn reset(&mut self) -> GameResult<()> {
        GameState::reset(self)
    }

    fn set_seed(&mut self, seed: u64) {
        GameState::set_seed(self, seed)
    }

    fn snapshot(&self) -> PlayerState {
        GameState::snapshot(self)
    }

    fn screen_size(&self) -> (usize, usize) {
        GameState::screen_size(self)
    }

    fn dungeon_channels(&self) -> usize {
        GameState::dungeon_channels(self)
    }

    fn dump_config(&self) -> GameResult<String> {
        GameState::dump_config(self)
    }

    fn dump_history(&self) -> String {
        GameState::dump_history(self)
    }

    fn render(
        &self,
        state: &PlayerState,
        mode: DungeonMode,
        flags: StatusFlag,
        with_history: bool,
    ) -> GameResult<Array3<f32>> {
        GameState::render(self, state, mode, flags, with_history)
    }
}
