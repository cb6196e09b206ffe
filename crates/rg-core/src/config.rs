//! Game configuration
//!
//! Built from JSON. Every field is optional in the JSON text; missing fields
//! take the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::monster::EnemyKind;
use crate::rng;
use crate::symbol::Symbol;
use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DUNGEON_LEVEL, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

const fn default_width() -> usize {
    DEFAULT_WIDTH
}

const fn default_height() -> usize {
    DEFAULT_HEIGHT
}

const fn default_hide_dungeon() -> bool {
    true
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Screen width in cells
    #[serde(default = "default_width")]
    pub width: usize,
    /// Screen height in cells
    #[serde(default = "default_height")]
    pub height: usize,
    /// RNG seed; a random one is drawn when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Half-open range the seed is drawn from when `seed` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_range: Option<[u64; 2]>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub dungeon: DungeonConfig,
    #[serde(default, skip_serializing_if = "is_default")]
    pub player: PlayerConfig,
    #[serde(default, skip_serializing_if = "is_default")]
    pub enemies: EnemyConfig,
    /// Render unseen cells as blank
    #[serde(default = "default_hide_dungeon")]
    pub hide_dungeon: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            seed_range: None,
            dungeon: DungeonConfig::default(),
            player: PlayerConfig::default(),
            enemies: EnemyConfig::default(),
            hide_dungeon: true,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check screen limits and dungeon parameters
    pub fn validate(&self) -> GameResult<()> {
        if self.width < MIN_WIDTH {
            return Err(GameError::InvalidSetting("screen width is too narrow".into()));
        }
        if self.width > MAX_WIDTH {
            return Err(GameError::InvalidSetting("screen width is too wide".into()));
        }
        if self.height < MIN_HEIGHT {
            return Err(GameError::InvalidSetting("screen height is too narrow".into()));
        }
        if self.height > MAX_HEIGHT {
            return Err(GameError::InvalidSetting("screen height is too wide".into()));
        }
        if let Some([lo, hi]) = self.seed_range {
            if hi <= lo {
                return Err(GameError::InvalidSetting(format!(
                    "seed_range [{lo}, {hi}) is empty"
                )));
            }
        }
        self.dungeon.validate(self.width, self.height)?;
        self.player.validate()?;
        for &c in &self.enemies.builtin {
            if EnemyKind::from_letter(c).is_none() {
                return Err(GameError::InvalidSetting(format!("unknown enemy {c:?}")));
            }
        }
        Ok(())
    }

    /// Seed to build a game with, when none is given explicitly
    pub fn choose_seed(&self) -> u64 {
        match (self.seed, self.seed_range) {
            (Some(seed), _) => seed,
            (None, Some([lo, hi])) => rng::gen_ranged_seed(lo, hi),
            (None, None) => rng::gen_seed(),
        }
    }

    /// Whether every reset should reuse the same seed
    pub fn has_fixed_seed(&self) -> bool {
        self.seed.is_some()
    }

    /// Highest symbol that can appear on screen
    pub fn symbol_max(&self) -> Symbol {
        self.enemies
            .builtin
            .iter()
            .filter_map(|&c| Symbol::from_tile(c))
            .max()
            .unwrap_or_else(Symbol::max_item)
    }
}

/// Dungeon generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub min_rooms: usize,
    pub max_rooms: usize,
    /// Largest room interior width
    pub room_width: usize,
    /// Largest room interior height
    pub room_height: usize,
    /// One door in `secret_door_rate` is secret (0 disables)
    pub secret_door_rate: u32,
    /// Percent chance of a gold pile per room
    pub gold_rate: u32,
    /// Percent chance of a food ration per room
    pub food_rate: u32,
    /// Percent chance of a hidden trap per room
    pub trap_rate: u32,
    /// Last level with downstairs
    pub max_level: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            min_rooms: 5,
            max_rooms: 9,
            room_width: 14,
            room_height: 5,
            secret_door_rate: 8,
            gold_rate: 50,
            food_rate: 15,
            trap_rate: 10,
            max_level: MAX_DUNGEON_LEVEL,
        }
    }
}

impl DungeonConfig {
    /// Most rooms a level may ask for
    pub const MAX_ROOMS: usize = 32;

    fn validate(&self, width: usize, height: usize) -> GameResult<()> {
        if self.min_rooms < 2 || self.min_rooms > self.max_rooms || self.max_rooms > Self::MAX_ROOMS
        {
            return Err(GameError::InvalidSetting(format!(
                "room count range {}..={} is invalid",
                self.min_rooms, self.max_rooms
            )));
        }
        if self.room_width < 3 || self.room_height < 2 {
            return Err(GameError::InvalidSetting("rooms must be at least 3x2".into()));
        }
        // a room plus its walls and the outer ring has to fit on screen
        if self.room_width > width.saturating_sub(4)
            || self.room_height > height.saturating_sub(4)
        {
            return Err(GameError::InvalidSetting(format!(
                "rooms up to {}x{} do not fit a {width}x{height} screen",
                self.room_width, self.room_height
            )));
        }
        if self.max_level == 0 || self.max_level > MAX_DUNGEON_LEVEL {
            return Err(GameError::InvalidSetting(format!(
                "max_level must be within 1..={MAX_DUNGEON_LEVEL}"
            )));
        }
        if self.gold_rate > 100 || self.food_rate > 100 || self.trap_rate > 100 {
            return Err(GameError::InvalidSetting("rates are percentages".into()));
        }
        Ok(())
    }
}

/// Starting player stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hp: i32,
    pub strength: i32,
    pub armor: i32,
    /// Starting nutrition; the player starves when it reaches zero
    pub nutrition: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hp: 12,
            strength: 16,
            armor: 4,
            nutrition: crate::HUNGER_TIME,
        }
    }
}

impl PlayerConfig {
    fn validate(&self) -> GameResult<()> {
        if self.hp <= 0 || self.strength <= 0 || self.nutrition <= 0 {
            return Err(GameError::InvalidSetting(
                "player hp, strength and nutrition must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Which enemies may appear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Letters of the builtin enemies to spawn; empty means no enemies
    pub builtin: Vec<char>,
    /// Percent chance of an enemy per room
    pub appear_rate: u32,
}
