//! Player system
//!
//! Contains the player struct, hunger, and the observable status.

mod hunger;
mod status;

pub use hunger::HungerState;
pub use status::{Status, StatusFlag};

use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::rng::GameRng;
use crate::{EXP_LEVELS, HUNGER_TIME, MAX_PLAYER_LEVEL, REGEN_INTERVAL, STOMACH_SIZE};

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub hp: i32,
    pub hp_max: i32,
    pub strength: i32,
    pub strength_max: i32,
    /// Displayed armor, higher is better
    pub armor: i32,
    pub level: u32,
    pub exp: u32,
    pub gold: u32,
    pub nutrition: i32,
}

impl Player {
    pub fn new(config: &PlayerConfig, x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            hp: config.hp,
            hp_max: config.hp,
            strength: config.strength,
            strength_max: config.strength,
            armor: config.armor,
            level: 1,
            exp: 0,
            gold: 0,
            nutrition: config.nutrition,
        }
    }

    /// Armor class used by to-hit rolls, lower is better
    pub fn armor_class(&self) -> i32 {
        10 - self.armor
    }

    pub fn hunger(&self) -> HungerState {
        HungerState::from_nutrition(self.nutrition)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0 || self.hunger() == HungerState::Starved
    }

    /// Damage bonus from strength
    pub fn damage_bonus(&self) -> i32 {
        match self.strength {
            ..=5 => -1,
            6..=15 => 0,
            16 => 1,
            17 => 2,
            _ => 3,
        }
    }

    /// Advance one turn: burn nutrition and regenerate
    pub fn tick(&mut self, turn: u64) {
        self.nutrition -= 1;
        if turn % REGEN_INTERVAL == 0 && self.hp < self.hp_max {
            self.hp += 1;
        }
    }

    pub fn eat(&mut self) {
        self.nutrition = (self.nutrition + HUNGER_TIME).min(STOMACH_SIZE);
    }

    /// Add experience and raise the level for every threshold passed
    ///
    /// Returns the number of levels gained.
    pub fn gain_exp(&mut self, exp: u32, rng: &mut GameRng) -> u32 {
        self.exp = self.exp.saturating_add(exp);
        let mut gained = 0;
        while self.level < MAX_PLAYER_LEVEL && self.exp >= EXP_LEVELS[self.level as usize - 1] {
            self.level += 1;
            let bonus = rng.rnd(10) as i32;
            self.hp_max += bonus;
            self.hp += bonus;
            gained += 1;
        }
        gained
    }

    /// Status line values; gold and depth come from the caller
    pub fn status(&self, dungeon_level: u32) -> Status {
        Status {
            dungeon_level,
            hp_current: self.hp,
            hp_max: self.hp_max,
            str_current: self.strength,
            str_max: self.strength_max,
            defense: self.armor,
            player_level: self.level,
            exp: self.exp,
            hunger: self.hunger(),
            gold: self.gold,
        }
    }
}
