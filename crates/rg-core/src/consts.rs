//! Core game constants
//!
//! Screen limits, stat caps used by the renderers, and the rogue
//! experience table.

/// Screen dimensions
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;
pub const MIN_WIDTH: usize = 32;
pub const MIN_HEIGHT: usize = 16;
pub const MAX_WIDTH: usize = DEFAULT_WIDTH * 2;
pub const MAX_HEIGHT: usize = DEFAULT_HEIGHT * 2;

/// Deepest level reachable by the stairs
pub const MAX_DUNGEON_LEVEL: u32 = 26;

/// Stat caps (normalization denominators for the status channels)
pub const MAX_HP: i32 = 250;
pub const MAX_STRENGTH: i32 = 31;
pub const MAX_ARMOR: i32 = 10;
pub const MAX_PLAYER_LEVEL: u32 = 21;

/// Nutrition
pub const STOMACH_SIZE: i32 = 2000;
pub const HUNGER_TIME: i32 = 1300;
pub const HUNGRY_THRESHOLD: i32 = 300;
pub const WEAK_THRESHOLD: i32 = 150;

/// Turns between natural hp regeneration ticks
pub const REGEN_INTERVAL: u64 = 10;

/// Experience needed to reach level `i + 2`
pub const EXP_LEVELS: [u32; 20] = [
    10,
    20,
    40,
    80,
    160,
    320,
    640,
    1300,
    2600,
    5200,     // level 11
    13000,
    26000,
    50000,
    100000,
    200000,
    400000,
    800000,
    2000000,
    4000000,
    8000000, // level 21
];
