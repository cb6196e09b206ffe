//! Dungeon system
//!
//! Contains level structure, cells, rooms, and the level generator.

mod cell;
mod corridor;
mod generation;
mod level;
mod room;

pub use cell::{Cell, CellType};
pub use corridor::{ConnectivityTracker, dig_corridor, generate_corridors};
pub use generation::generate_level;
pub use level::{Item, ItemKind, Level, Trap, TrapType};
pub use room::Room;
