//! Snapshots of a running game

use std::fmt;

use ndarray::Array2;

use crate::player::{Status, StatusFlag};

/// Immutable view of the game taken after a command
///
/// Owns all of its data, so it stays valid while the game moves on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Screen rows, top to bottom
    pub dungeon: Vec<String>,
    pub status: Status,
    /// Cells the player has stood on this level, indexed `[y, x]`
    pub history: Array2<bool>,
    /// Player position as (x, y)
    pub position: (usize, usize),
}

impl PlayerState {
    pub fn new(
        dungeon: Vec<String>,
        status: Status,
        history: Array2<bool>,
        position: (usize, usize),
    ) -> Self {
        Self {
            dungeon,
            status,
            history,
            position,
        }
    }

    pub fn gold(&self) -> u32 {
        self.status.gold
    }

    /// (rows, columns) of the dungeon view
    pub fn screen_size(&self) -> (usize, usize) {
        let width = self.dungeon.first().map_or(0, |row| row.chars().count());
        (self.dungeon.len(), width)
    }

    /// Raw values of the selected stats in flag order
    pub fn status_vec(&self, flags: StatusFlag) -> Vec<i32> {
        self.status.to_vec(flags)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.dungeon {
            writeln!(f, "{row}")?;
        }
        write!(f, "{}", self.status)
    }
}
