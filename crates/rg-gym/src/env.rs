//! Single environment

use std::fmt;
use std::fs;
use std::path::Path;

use ndarray::Array3;
use rg_core::{DungeonMode, GameConfig, GameState, PlayerState, StatusFlag};
use tracing::{debug, trace};

use crate::action::{ACTION_LEN, ACTION_MEANINGS, Action};
use crate::encoding::ImageSetting;
use crate::engine::Engine;
use crate::error::{EnvError, EnvResult};

/// Default step budget per episode
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Discrete action space of `n` actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteSpace {
    pub n: usize,
}

/// Box observation space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpace {
    pub low: f32,
    pub high: f32,
    /// (channels, height, width)
    pub shape: [usize; 3],
}

/// Settings for a [`RogueEnv`]
#[derive(Debug, Clone, PartialEq)]
pub struct RogueEnvConfig {
    /// Overrides the game config's seed
    pub seed: Option<u64>,
    /// Game config; defaults apply when absent
    pub game: Option<GameConfig>,
    pub max_steps: usize,
    pub image_setting: ImageSetting,
}

impl Default for RogueEnvConfig {
    fn default() -> Self {
        Self {
            seed: None,
            game: None,
            max_steps: DEFAULT_MAX_STEPS,
            image_setting: ImageSetting::default(),
        }
    }
}

/// Extra step information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Commands applied by the call
    pub consumed: usize,
}

/// Result of one [`RogueEnv::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: PlayerState,
    /// Gold gained across the call
    pub reward: f32,
    /// The game ended during the call
    pub done: bool,
    pub info: StepInfo,
}

/// Gym-style environment over one game
pub struct RogueEnv<E = GameState> {
    engine: E,
    state: PlayerState,
    image_setting: ImageSetting,
    action_space: DiscreteSpace,
    observation_space: BoxSpace,
}

impl RogueEnv<GameState> {
    pub fn new(config: RogueEnvConfig) -> EnvResult<Self> {
        let game = config.game.unwrap_or_default();
        let engine = GameState::with_config(config.max_steps, config.seed, game)?;
        Ok(Self::from_engine(engine, config.image_setting))
    }

    /// Build from config JSON text, as read from a config file
    pub fn from_json(
        json: &str,
        seed: Option<u64>,
        max_steps: usize,
        image_setting: ImageSetting,
    ) -> EnvResult<Self> {
        let engine = GameState::new(max_steps, seed, Some(json))?;
        Ok(Self::from_engine(engine, image_setting))
    }
}

impl<E: Engine> RogueEnv<E> {
    /// Wrap an already built engine
    pub fn from_engine(engine: E, image_setting: ImageSetting) -> Self {
        let (height, width) = engine.screen_size();
        let channels = image_setting.dim(engine.dungeon_channels());
        let state = engine.snapshot();
        Self {
            engine,
            state,
            image_setting,
            action_space: DiscreteSpace { n: ACTION_LEN },
            observation_space: BoxSpace {
                low: 0.0,
                high: 1.0,
                shape: [channels, height, width],
            },
        }
    }

    pub fn action_space(&self) -> DiscreteSpace {
        self.action_space
    }

    pub fn observation_space(&self) -> BoxSpace {
        self.observation_space
    }

    pub fn image_setting(&self) -> &ImageSetting {
        &self.image_setting
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Snapshot taken after the last step or reset
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Apply an action
    ///
    /// Commands run one at a time and stop right after the one that ends
    /// the game. Commands already applied are not rolled back. A game that
    /// ended in an earlier call keeps taking commands and reports
    /// `done = false` until it is reset.
    pub fn step(&mut self, action: impl Into<Action>) -> EnvResult<Step> {
        let keys = action.into().decode()?;
        let gold_before = self.state.gold();

        let mut consumed = keys.len();
        let mut done = false;
        for (i, &key) in keys.iter().enumerate() {
            if self.engine.react(key)? {
                consumed = i + 1;
                done = true;
                break;
            }
        }

        self.state = self.engine.snapshot();
        let reward = self.state.gold() as f32 - gold_before as f32;
        trace!(consumed, done, reward, "step");
        Ok(Step {
            state: self.state.clone(),
            reward,
            done,
            info: StepInfo { consumed },
        })
    }

    /// Start a new episode and return its first snapshot
    pub fn reset(&mut self) -> EnvResult<PlayerState> {
        self.engine.reset()?;
        self.state = self.engine.snapshot();
        debug!("environment reset");
        Ok(self.state.clone())
    }

    /// Seed used by the next [`RogueEnv::reset`]
    pub fn seed(&mut self, seed: u64) {
        self.engine.set_seed(seed);
    }

    /// Encode a snapshot with the active setting, or `setting` if given
    pub fn encode(
        &self,
        state: &PlayerState,
        setting: Option<&ImageSetting>,
    ) -> EnvResult<Array3<f32>> {
        let setting = setting.unwrap_or(&self.image_setting);
        self.render(state, setting.dungeon, setting.status, setting.includes_history)
    }

    pub fn symbol_image(&self, state: &PlayerState, flags: StatusFlag) -> EnvResult<Array3<f32>> {
        self.render(state, DungeonMode::Symbolic, flags, false)
    }

    pub fn symbol_image_with_hist(
        &self,
        state: &PlayerState,
        flags: StatusFlag,
    ) -> EnvResult<Array3<f32>> {
        self.render(state, DungeonMode::Symbolic, flags, true)
    }

    pub fn gray_image(&self, state: &PlayerState, flags: StatusFlag) -> EnvResult<Array3<f32>> {
        self.render(state, DungeonMode::Grayscale, flags, false)
    }

    pub fn gray_image_with_hist(
        &self,
        state: &PlayerState,
        flags: StatusFlag,
    ) -> EnvResult<Array3<f32>> {
        self.render(state, DungeonMode::Grayscale, flags, true)
    }

    fn render(
        &self,
        state: &PlayerState,
        mode: DungeonMode,
        flags: StatusFlag,
        with_history: bool,
    ) -> EnvResult<Array3<f32>> {
        self.check_compatible(state)?;
        Ok(self.engine.render(state, mode, flags, with_history)?)
    }

    /// Reject snapshots that were not taken from a screen of this size
    fn check_compatible(&self, state: &PlayerState) -> EnvResult<()> {
        let (rows, cols) = self.engine.screen_size();
        let (found_rows, found_cols) = state.screen_size();
        let ragged = state.dungeon.iter().any(|r| r.chars().count() != cols);
        if (found_rows, found_cols) != (rows, cols) || ragged || state.history.dim() != (rows, cols)
        {
            return Err(EnvError::TypeMismatch {
                rows,
                cols,
                found_rows,
                found_cols,
            });
        }
        Ok(())
    }

    /// Raw values of the selected stats
    pub fn status_vec(&self, state: &PlayerState, flags: StatusFlag) -> Vec<i32> {
        state.status_vec(flags)
    }

    /// Dungeon rows of the cached snapshot
    pub fn get_dungeon(&self) -> &[String] {
        &self.state.dungeon
    }

    /// The engine's config, parsed
    pub fn get_config(&self) -> EnvResult<serde_json::Value> {
        let json = self.engine.dump_config()?;
        serde_json::from_str(&json).map_err(|e| EnvError::Engine(e.into()))
    }

    /// (height, width)
    pub fn screen_size(&self) -> (usize, usize) {
        self.engine.screen_size()
    }

    pub fn action_meanings(&self) -> &'static [(char, &'static str)] {
        &ACTION_MEANINGS
    }

    /// Write the engine's config JSON to `path`
    pub fn save_config(&self, path: impl AsRef<Path>) -> EnvResult<()> {
        fs::write(path, self.engine.dump_config()?)?;
        Ok(())
    }

    /// Write every command applied so far to `path`
    pub fn save_actions(&self, path: impl AsRef<Path>) -> EnvResult<()> {
        fs::write(path, self.engine.dump_history())?;
        Ok(())
    }
}

impl<E: Engine> fmt::Display for RogueEnv<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

impl<E> fmt::Debug for RogueEnv<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RogueEnv")
            .field("image_setting", &self.image_setting)
            .field("observation_space", &self.observation_space)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> RogueEnv {
        RogueEnv::new(RogueEnvConfig {
            seed: Some(1),
            ..RogueEnvConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_spaces() {
        let env = env();
        assert_eq!(env.action_space().n, 10);
        assert_eq!(env.observation_space().shape, [16 + 9, 24, 80]);
        assert_eq!(env.observation_space().low, 0.0);
        assert_eq!(env.observation_space().high, 1.0);
    }

    #[test]
    fn test_encode_matches_observation_space() {
        let env = env();
        let image = env.encode(env.state(), None).unwrap();
        let [c, h, w] = env.observation_space().shape;
        assert_eq!(image.dim(), (c, h, w));

        let setting = ImageSetting::new(DungeonMode::Grayscale, StatusFlag::EMPTY, true);
        assert_eq!(env.encode(env.state(), Some(&setting)).unwrap().dim(), (2, 24, 80));
    }

    #[test]
    fn test_foreign_snapshot_is_rejected() {
        let env = env();
        let mut other = env.state().clone();
        other.dungeon.pop();
        let err = env.encode(&other, None).unwrap_err();
        assert!(matches!(err, EnvError::TypeMismatch { found_rows: 23, .. }));
    }

    #[test]
    fn test_invalid_index_steps_nothing() {
        let mut env = env();
        let before = env.state().clone();
        assert!(matches!(env.step(10usize), Err(EnvError::InvalidAction(_))));
        assert_eq!(env.state(), &before);
        assert!(env.engine().dump_history().is_empty());
    }

    #[test]
    fn test_empty_command_string() {
        let mut env = env();
        let step = env.step("").unwrap();
        assert_eq!(step.info.consumed, 0);
        assert!(!step.done);
        assert_eq!(step.reward, 0.0);
    }
}
