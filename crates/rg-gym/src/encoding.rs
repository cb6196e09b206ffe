//! Observation encoding settings

use rg_core::{DungeonMode, StatusFlag};
use serde::{Deserialize, Serialize};

/// How snapshots become observation tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSetting {
    pub dungeon: DungeonMode,
    pub status: StatusFlag,
    /// Append a channel marking cells the player has stood on
    pub includes_history: bool,
}

impl Default for ImageSetting {
    fn default() -> Self {
        Self {
            dungeon: DungeonMode::Symbolic,
            status: StatusFlag::FULL,
            includes_history: false,
        }
    }
}

impl ImageSetting {
    pub fn new(dungeon: DungeonMode, status: StatusFlag, includes_history: bool) -> Self {
        Self {
            dungeon,
            status,
            includes_history,
        }
    }

    /// Channel count of every tensor this setting produces
    pub fn dim(&self, dungeon_channels: usize) -> usize {
        self.dungeon.channels(dungeon_channels)
            + self.status.count_one()
            + usize::from(self.includes_history)
    }
}
