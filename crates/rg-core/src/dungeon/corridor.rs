//! Corridor generation
//!
//! Rooms are joined in four phases:
//! 1. Connect adjacent rooms (room[i] to room[i+1])
//! 2. Connect rooms two steps apart if not already connected
//! 3. Ensure all rooms are reachable from room 0
//! 4. Add random extra corridors for variety

use std::collections::VecDeque;

use tracing::trace;

use crate::rng::GameRng;

use super::room::Room;
use super::{CellType, Level};

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class (rooms in same class are connected)
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    /// Check if two rooms are connected (in same equivalence class)
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        if a >= self.classes.len() || b >= self.classes.len() {
            return false;
        }
        self.classes[a] == self.classes[b]
    }

    /// Merge equivalence classes when rooms are connected
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }
        let old_class = self.classes[b];
        let new_class = self.classes[a];
        for eq in &mut self.classes {
            if *eq == old_class {
                *eq = new_class;
            }
        }
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        match self.classes.first() {
            Some(&first) => self.classes.iter().all(|&c| c == first),
            None => true,
        }
    }
}

/// Pick a door on the wall of `room` facing `target`
///
/// Returns the door cell and the stone cell just outside it.
fn find_door_position(
    room: &Room,
    target: &Room,
    rng: &mut GameRng,
) -> ((usize, usize), (usize, usize)) {
    let (rx, ry) = room.center();
    let (tx, ty) = target.center();

    if tx.abs_diff(rx) > ty.abs_diff(ry) {
        let y = room.y + rng.range(0, room.height);
        if tx > rx {
            let x = room.x + room.width;
            ((x, y), (x + 1, y))
        } else {
            let x = room.x - 1;
            ((x, y), (x - 1, y))
        }
    } else {
        let x = room.x + rng.range(0, room.width);
        if ty > ry {
            let y = room.y + room.height;
            ((x, y), (x, y + 1))
        } else {
            let y = room.y - 1;
            ((x, y), (x, y - 1))
        }
    }
}

/// Dig a corridor between two stone cells
///
/// Breadth-first search over stone and existing corridor, visiting
/// neighbours in a shuffled order so corridors bend. Returns false when no
/// route exists.
pub fn dig_corridor(
    level: &mut Level,
    start: (usize, usize),
    end: (usize, usize),
    rng: &mut GameRng,
) -> bool {
    let diggable = |t: CellType| matches!(t, CellType::Stone | CellType::Corridor);
    if !diggable(level.cell(start.0, start.1).typ) || !diggable(level.cell(end.0, end.1).typ) {
        return false;
    }

    let idx = |x: usize, y: usize| x * level.height + y;
    let mut prev: Vec<Option<usize>> = vec![None; level.width * level.height];
    let mut seen = vec![false; level.width * level.height];
    let mut queue = VecDeque::new();
    seen[idx(start.0, start.1)] = true;
    queue.push_back(start);

    let mut dirs = [(1i64, 0i64), (-1, 0), (0, 1), (0, -1)];
    let mut found = false;
    while let Some((x, y)) = queue.pop_front() {
        if (x, y) == end {
            found = true;
            break;
        }
        for i in (1..dirs.len()).rev() {
            let j = rng.range(0, i + 1);
            dirs.swap(i, j);
        }
        for (dx, dy) in dirs {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if !level.is_valid_pos(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if seen[idx(nx, ny)] || !diggable(level.cell(nx, ny).typ) {
                continue;
            }
            seen[idx(nx, ny)] = true;
            prev[idx(nx, ny)] = Some(idx(x, y));
            queue.push_back((nx, ny));
        }
    }
    if !found {
        return false;
    }

    let mut cur = idx(end.0, end.1);
    loop {
        let (x, y) = (cur / level.height, cur % level.height);
        level.cell_mut(x, y).typ = CellType::Corridor;
        match prev[cur] {
            Some(p) => cur = p,
            None => break,
        }
    }
    true
}

/// Turn a wall cell into a door (secret with probability 1/`secret_rate`)
fn place_door(level: &mut Level, x: usize, y: usize, secret_rate: u32, rng: &mut GameRng) {
    let cell = level.cell_mut(x, y);
    if cell.typ.is_door() {
        return;
    }
    cell.horizontal = cell.typ == CellType::HWall;
    cell.typ = if secret_rate > 0 && rng.one_in(secret_rate) {
        CellType::SecretDoor
    } else {
        CellType::Door
    };
}

/// Join two rooms with a corridor
fn join_rooms(
    level: &mut Level,
    a: usize,
    b: usize,
    tracker: &mut ConnectivityTracker,
    secret_rate: u32,
    rng: &mut GameRng,
) {
    if a >= level.rooms.len() || b >= level.rooms.len() || a == b {
        return;
    }
    let (room_a, room_b) = (level.rooms[a], level.rooms[b]);
    let (door_a, out_a) = find_door_position(&room_a, &room_b, rng);
    let (door_b, out_b) = find_door_position(&room_b, &room_a, rng);

    if !dig_corridor(level, out_a, out_b, rng) {
        trace!(a, b, "no corridor route between rooms");
        return;
    }
    place_door(level, door_a.0, door_a.1, secret_rate, rng);
    place_door(level, door_b.0, door_b.1, secret_rate, rng);
    tracker.merge(a, b);
}

/// Generate corridors using the 4-phase algorithm
///
/// Returns false if some room could not be connected.
pub fn generate_corridors(level: &mut Level, secret_rate: u32, rng: &mut GameRng) -> bool {
    let n = level.rooms.len();
    if n < 2 {
        return true;
    }
    let mut tracker = ConnectivityTracker::new(n);

    for i in 0..n - 1 {
        join_rooms(level, i, i + 1, &mut tracker, secret_rate, rng);
    }

    for i in 0..n.saturating_sub(2) {
        if !tracker.are_connected(i, i + 2) {
            join_rooms(level, i, i + 2, &mut tracker, secret_rate, rng);
        }
    }

    // every pair gets at most one attempt here
    for a in 0..n {
        for b in a + 1..n {
            if !tracker.are_connected(a, b) {
                join_rooms(level, a, b, &mut tracker, secret_rate, rng);
            }
        }
    }

    if n > 2 {
        let extra = rng.rn2(n as u32 / 2 + 1);
        for _ in 0..extra {
            let a = rng.range(0, n);
            let b = rng.range(0, n);
            if a != b {
                join_rooms(level, a, b, &mut tracker, secret_rate, rng);
            }
        }
    }

    tracker.all_connected()
}
