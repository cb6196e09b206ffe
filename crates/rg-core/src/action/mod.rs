//! Player action system
//!
//! Maps command keys to commands and implements each of them.

pub mod level_change;
pub mod movement;
pub mod search;

pub use movement::can_step;

use strum::{Display, EnumIter};

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    GoDown,
    Search,
}

impl Command {
    /// Parse a command key
    ///
    /// Vertical moves follow this keymap: `j` goes up, `k` goes down.
    pub const fn from_key(key: char) -> Option<Self> {
        let cmd = match key {
            'h' => Command::Move(Direction::West),
            'j' => Command::Move(Direction::North),
            'k' => Command::Move(Direction::South),
            'l' => Command::Move(Direction::East),
            'y' => Command::Move(Direction::NorthWest),
            'u' => Command::Move(Direction::NorthEast),
            'b' => Command::Move(Direction::SouthWest),
            'n' => Command::Move(Direction::SouthEast),
            '>' => Command::GoDown,
            's' => Command::Search,
            _ => return None,
        };
        Some(cmd)
    }

    pub const fn key(&self) -> char {
        match self {
            Command::Move(Direction::West) => 'h',
            Command::Move(Direction::North) => 'j',
            Command::Move(Direction::South) => 'k',
            Command::Move(Direction::East) => 'l',
            Command::Move(Direction::NorthWest) => 'y',
            Command::Move(Direction::NorthEast) => 'u',
            Command::Move(Direction::SouthWest) => 'b',
            Command::Move(Direction::SouthEast) => 'n',
            Command::GoDown => '>',
            Command::Search => 's',
        }
    }
}

/// Movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub const fn is_diagonal(&self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Action completed
    Success,
    /// Nothing happened; the turn still passes
    Failed(String),
    /// Player died
    Died(String),
}
