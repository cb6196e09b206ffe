//! Level generation
//!
//! Places rooms, connects them with corridors, and scatters gold, food,
//! traps, enemies and the downstairs. Everything is drawn from the game
//! RNG, so a seed fully determines the level.

use tracing::{debug, warn};

use super::room::Room;
use super::{CellType, Item, ItemKind, Level, Trap, TrapType, generate_corridors};
use crate::config::{DungeonConfig, GameConfig};
use crate::error::{GameError, GameResult};
use crate::monster::{Enemy, EnemyKind};
use crate::rng::GameRng;

/// Placement attempts per wanted room
const ROOM_TRIES: usize = 8;
/// Interiors at least this far apart leave two stone cells between walls
const ROOM_MARGIN: usize = 4;

/// Generate level `depth` and the player's starting position on it
pub fn generate_level(
    depth: u32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> GameResult<(Level, (usize, usize))> {
    let mut level = Level::new(depth, config.width, config.height);

    let rooms = place_rooms(config, rng);
    if rooms.len() < 2 {
        return Err(GameError::Generation(format!(
            "only {} room(s) fit on a {}x{} screen",
            rooms.len(),
            config.width,
            config.height
        )));
    }
    for room in &rooms {
        carve_room(&mut level, room);
    }
    level.rooms = rooms;

    if !generate_corridors(&mut level, config.dungeon.secret_door_rate, rng) {
        warn!(depth, "some rooms are unreachable");
    }

    fill_rooms(&mut level, config, rng);

    if depth < config.dungeon.max_level {
        let room = rng.range(0, level.rooms.len());
        if let Some((x, y)) = free_point(&level, room, rng) {
            level.cell_mut(x, y).typ = CellType::Stairs;
            level.stairs = Some((x, y));
        }
    }

    let start = rng.range(0, level.rooms.len());
    let player = (0..level.rooms.len())
        .map(|i| (start + i) % level.rooms.len())
        .find_map(|room| free_point(&level, room, rng))
        .ok_or_else(|| GameError::Generation("no free floor for the player".into()))?;

    debug!(
        seed = rng.seed(),
        depth,
        rooms = level.rooms.len(),
        items = level.items.len(),
        enemies = level.enemies.len(),
        "generated level"
    );
    Ok((level, player))
}

fn place_rooms(config: &GameConfig, rng: &mut GameRng) -> Vec<Room> {
    let dungeon = &config.dungeon;
    let wanted = rng.range(dungeon.min_rooms, dungeon.max_rooms.saturating_add(1));
    let mut rooms: Vec<Room> = Vec::with_capacity(wanted.min(DungeonConfig::MAX_ROOMS));

    for _ in 0..wanted.saturating_mul(ROOM_TRIES) {
        if rooms.len() >= wanted {
            break;
        }
        let width = rng.range(3, dungeon.room_width.saturating_add(1));
        let height = rng.range(2, dungeon.room_height.saturating_add(1));

        // walls stay off the outermost ring so doors always have an outside
        let max_x = config.width.saturating_sub(width + 1);
        let max_y = config.height.saturating_sub(height + 1);
        if max_x <= 2 || max_y <= 2 {
            continue;
        }
        let room = Room::new(rng.range(2, max_x), rng.range(2, max_y), width, height);

        if rooms.iter().any(|r| room.overlaps(r, ROOM_MARGIN)) {
            continue;
        }
        rooms.push(room);
    }

    rooms.sort_by_key(|r| (r.x, r.y));
    rooms
}

fn carve_room(level: &mut Level, room: &Room) {
    for x in room.x - 1..=room.x + room.width {
        for y in room.y - 1..=room.y + room.height {
            let on_v = x == room.x - 1 || x == room.x + room.width;
            let on_h = y == room.y - 1 || y == room.y + room.height;
            level.cell_mut(x, y).typ = if on_h {
                // corners too
                CellType::HWall
            } else if on_v {
                CellType::VWall
            } else {
                CellType::Floor
            };
        }
    }
}

fn fill_rooms(level: &mut Level, config: &GameConfig, rng: &mut GameRng) {
    let dungeon = &config.dungeon;
    let depth = level.depth;
    let enemies: Vec<EnemyKind> = config
        .enemies
        .builtin
        .iter()
        .filter_map(|&c| EnemyKind::from_letter(c))
        .collect();

    for room in 0..level.rooms.len() {
        if rng.percent(dungeon.gold_rate) {
            if let Some((x, y)) = free_point(level, room, rng) {
                let amount = rng.rnd(50 + 10 * depth) + 2;
                level.items.push(Item {
                    x,
                    y,
                    kind: ItemKind::Gold(amount),
                });
            }
        }

        if rng.percent(dungeon.food_rate) {
            if let Some((x, y)) = free_point(level, room, rng) {
                level.items.push(Item {
                    x,
                    y,
                    kind: ItemKind::Food,
                });
            }
        }

        if rng.percent(dungeon.trap_rate) {
            if let Some((x, y)) = free_point(level, room, rng) {
                let trap_type = if depth < dungeon.max_level && rng.one_in(2) {
                    TrapType::TrapDoor
                } else {
                    TrapType::Arrow
                };
                level.traps.push(Trap {
                    x,
                    y,
                    trap_type,
                    seen: false,
                });
            }
        }

        if !enemies.is_empty() && rng.percent(config.enemies.appear_rate) {
            let kind = enemies[rng.range(0, enemies.len())];
            if let Some((x, y)) = free_point(level, room, rng) {
                level.enemies.push(Enemy::new(kind, x, y, rng));
            }
        }
    }
}

/// Random unoccupied floor cell in room `idx`
fn free_point(level: &Level, idx: usize, rng: &mut GameRng) -> Option<(usize, usize)> {
    let room = level.rooms[idx];
    for _ in 0..16 {
        let (x, y) = room.random_point(rng);
        if level.is_free_floor(x, y) {
            return Some((x, y));
        }
    }
    room.points().find(|&(x, y)| level.is_free_floor(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64) -> (Level, (usize, usize)) {
        let mut rng = GameRng::new(seed);
        generate_level(1, &GameConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_same_seed_same_level() {
        let (a, pa) = generate(11);
        let (b, pb) = generate(11);
        assert_eq!(pa, pb);
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.items, b.items);
        assert_eq!(a.rooms, b.rooms);
    }

    #[test]
    fn test_player_starts_on_floor() {
        for seed in 0..20 {
            let (level, (x, y)) = generate(seed);
            assert_eq!(level.cell(x, y).typ, CellType::Floor);
            assert!(level.rooms.len() >= 2);
        }
    }

    #[test]
    fn test_stairs_only_above_max_level() {
        let mut config = GameConfig::default();
        let mut rng = GameRng::new(3);
        let (level, _) = generate_level(1, &config, &mut rng).unwrap();
        let (sx, sy) = level.stairs.unwrap();
        assert_eq!(level.cell(sx, sy).typ, CellType::Stairs);

        config.dungeon.max_level = 1;
        let mut rng = GameRng::new(3);
        let (level, _) = generate_level(1, &config, &mut rng).unwrap();
        assert!(level.stairs.is_none());
        assert!(level.traps.iter().all(|t| t.trap_type == TrapType::Arrow));
    }

    #[test]
    fn test_rooms_do_not_touch_border() {
        for seed in 0..20 {
            let (level, _) = generate(seed);
            for x in 0..level.width {
                assert!(!level.cell(x, 0).typ.is_wall());
                assert!(!level.cell(x, level.height - 1).typ.is_wall());
            }
            for y in 0..level.height {
                assert!(!level.cell(0, y).typ.is_wall());
                assert!(!level.cell(level.width - 1, y).typ.is_wall());
            }
        }
    }

    #[test]
    fn test_enemies_need_config() {
        let (level, _) = generate(5);
        assert!(level.enemies.is_empty());

        let mut config = GameConfig::default();
        config.enemies.builtin = vec!['B', 'S'];
        config.enemies.appear_rate = 100;
        let mut rng = GameRng::new(5);
        let (level, _) = generate_level(1, &config, &mut rng).unwrap();
        assert!(!level.enemies.is_empty());
        for e in &level.enemies {
            assert!(matches!(e.kind.letter(), 'B' | 'S'));
        }
    }

    #[test]
    fn test_oversized_rooms_fail_cleanly() {
        let mut config = GameConfig::default();
        config.dungeon.room_width = 200;
        config.dungeon.room_height = 200;
        config.dungeon.min_rooms = 2;
        config.dungeon.max_rooms = 2;
        let mut rng = GameRng::new(1);
        // most sampled rooms are larger than the screen
        let huge = generate_level(1, &config, &mut rng);
        if let Err(err) = huge {
            assert!(matches!(err, GameError::Generation(_)));
        }
    }
}
