//! Level structure

use serde::{Deserialize, Serialize};

use super::{Cell, CellType, Room};
use crate::monster::Enemy;

/// Things lying on the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Gold(u32),
    Food,
}

impl ItemKind {
    pub const fn symbol(&self) -> char {
        match self {
            ItemKind::Gold(_) => '*',
            ItemKind::Food => ':',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub x: usize,
    pub y: usize,
    pub kind: ItemKind,
}

/// Trap types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapType {
    /// Shoots an arrow at whoever steps on it
    Arrow,
    /// Drops the player to the next level
    TrapDoor,
}

/// Trap on the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub x: usize,
    pub y: usize,
    pub trap_type: TrapType,
    pub seen: bool,
}

/// One dungeon level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Depth, starting at 1
    pub depth: u32,
    pub width: usize,
    pub height: usize,
    /// Indexed as `cells[x][y]`
    pub cells: Vec<Vec<Cell>>,
    pub rooms: Vec<Room>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
    pub enemies: Vec<Enemy>,
    pub stairs: Option<(usize, usize)>,
}

impl Level {
    /// Create an all-stone level
    pub fn new(depth: u32, width: usize, height: usize) -> Self {
        Self {
            depth,
            width,
            height,
            cells: vec![vec![Cell::stone(); height]; width],
            rooms: Vec::new(),
            items: Vec::new(),
            traps: Vec::new(),
            enemies: Vec::new(),
            stairs: None,
        }
    }

    pub fn is_valid_pos(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[x][y]
    }

    /// Room whose interior or walls contain (x, y)
    pub fn room_at(&self, x: usize, y: usize) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains_with_walls(x, y))
    }

    pub fn item_at(&self, x: usize, y: usize) -> Option<usize> {
        self.items.iter().position(|i| i.x == x && i.y == y)
    }

    pub fn trap_at(&self, x: usize, y: usize) -> Option<usize> {
        self.traps.iter().position(|t| t.x == x && t.y == y)
    }

    pub fn enemy_at(&self, x: usize, y: usize) -> Option<usize> {
        self.enemies.iter().position(|e| e.x == x && e.y == y)
    }

    /// Nothing but plain floor at (x, y)
    pub fn is_free_floor(&self, x: usize, y: usize) -> bool {
        self.cells[x][y].typ == CellType::Floor
            && self.item_at(x, y).is_none()
            && self.trap_at(x, y).is_none()
            && self.enemy_at(x, y).is_none()
    }

    /// Mark what the player sees from (x, y)
    ///
    /// Rooms are lit: standing inside one (or in its doorway) reveals the
    /// whole room. The eight neighbours are always revealed.
    pub fn update_visibility(&mut self, x: usize, y: usize) {
        self.cells[x][y].visited = true;
        if let Some(idx) = self.room_at(x, y) {
            let room = self.rooms[idx];
            for cx in room.x - 1..=room.x + room.width {
                for cy in room.y - 1..=room.y + room.height {
                    self.cells[cx][cy].seen = true;
                }
            }
        }
        for (nx, ny) in self.neighbours(x, y) {
            self.cells[nx][ny].seen = true;
        }
        self.cells[x][y].seen = true;
    }

    /// In-bounds 8-neighbourhood of (x, y)
    pub fn neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if self.is_valid_pos(nx, ny) {
                    out.push((nx as usize, ny as usize));
                }
            }
        }
        out
    }

    /// Whether an enemy at (ex, ey) is in view of a player at (px, py)
    pub fn can_see(&self, px: usize, py: usize, ex: usize, ey: usize) -> bool {
        if px.abs_diff(ex) <= 1 && py.abs_diff(ey) <= 1 {
            return true;
        }
        match (self.room_at(px, py), self.room_at(ex, ey)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Character drawn at (x, y), ignoring the player
    pub fn tile_at(&self, x: usize, y: usize, player: (usize, usize), hide: bool) -> char {
        if let Some(i) = self.enemy_at(x, y) {
            if self.can_see(player.0, player.1, x, y) {
                return self.enemies[i].kind.letter();
            }
        }
        let cell = &self.cells[x][y];
        if hide && !cell.seen {
            return ' ';
        }
        if let Some(i) = self.item_at(x, y) {
            return self.items[i].kind.symbol();
        }
        if let Some(i) = self.trap_at(x, y) {
            if self.traps[i].seen {
                return '^';
            }
        }
        cell.symbol()
    }
}
