//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Stone = 0,
    VWall = 1,
    HWall = 2,
    Floor = 3,
    Corridor = 4,
    Door = 5,
    SecretDoor = 6,
    Stairs = 7,
}

impl CellType {
    /// Check if this is a wall type
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::VWall | CellType::HWall)
    }

    /// Check if this is a door (found or not)
    pub const fn is_door(&self) -> bool {
        matches!(self, CellType::Door | CellType::SecretDoor)
    }

    /// Check if the player can stand here
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            CellType::Floor | CellType::Corridor | CellType::Door | CellType::Stairs
        )
    }
}

/// A single map cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Actual terrain type
    pub typ: CellType,
    /// Lies on a horizontal wall line (secret doors draw as `-` there)
    pub horizontal: bool,
    /// Has been seen by player
    pub seen: bool,
    /// Player has stood here on this level
    pub visited: bool,
}

impl Cell {
    /// Create a new stone cell
    pub const fn stone() -> Self {
        Self {
            typ: CellType::Stone,
            horizontal: false,
            seen: false,
            visited: false,
        }
    }

    /// Get the display character for the terrain alone
    pub const fn symbol(&self) -> char {
        match self.typ {
            CellType::Stone => ' ',
            CellType::VWall => '|',
            CellType::HWall => '-',
            CellType::Floor => '.',
            CellType::Corridor => '#',
            CellType::Door => '+',
            // looks like the wall it hides in
            CellType::SecretDoor => {
                if self.horizontal {
                    '-'
                } else {
                    '|'
                }
            }
            CellType::Stairs => '%',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_passable_types() {
        let passable: Vec<_> = CellType::iter().filter(|t| t.is_passable()).collect();
        assert_eq!(
            passable,
            vec![CellType::Floor, CellType::Corridor, CellType::Door, CellType::Stairs]
        );
    }

    #[test]
    fn test_secret_door_looks_like_wall() {
        let mut cell = Cell::stone();
        cell.typ = CellType::SecretDoor;
        cell.horizontal = true;
        assert_eq!(cell.symbol(), '-');
        cell.horizontal = false;
        assert_eq!(cell.symbol(), '|');
        assert!(!cell.typ.is_passable());
        assert!(cell.typ.is_door());
    }
}
