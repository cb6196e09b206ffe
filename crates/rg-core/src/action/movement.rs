//! Player movement and melee

use tracing::trace;

use super::{ActionResult, Direction};
use crate::dungeon::{CellType, ItemKind, Level, TrapType};
use crate::error::GameResult;
use crate::gameloop::GameState;
use crate::monster::swing;

/// Whether anything may step from `from` to the adjacent cell `to`
///
/// Doors cannot be entered or left diagonally.
pub fn can_step(level: &Level, from: (usize, usize), to: (usize, usize)) -> bool {
    if !level.cell(to.0, to.1).typ.is_passable() {
        return false;
    }
    let diagonal = from.0 != to.0 && from.1 != to.1;
    if diagonal
        && (level.cell(from.0, from.1).typ == CellType::Door
            || level.cell(to.0, to.1).typ == CellType::Door)
    {
        return false;
    }
    true
}

/// Move one step, or attack whatever stands in the way
pub fn domove(state: &mut GameState, dir: Direction) -> GameResult<ActionResult> {
    let (dx, dy) = dir.delta();
    let nx = state.player.x as i64 + dx;
    let ny = state.player.y as i64 + dy;
    if !state.level.is_valid_pos(nx, ny) {
        return Ok(ActionResult::Failed("edge of the map".into()));
    }
    let (nx, ny) = (nx as usize, ny as usize);
    let from = (state.player.x, state.player.y);

    if let Some(idx) = state.level.enemy_at(nx, ny) {
        if !can_step(&state.level, from, (nx, ny)) {
            return Ok(ActionResult::Failed("can't reach".into()));
        }
        return Ok(attack(state, idx));
    }

    if !can_step(&state.level, from, (nx, ny)) {
        return Ok(ActionResult::Failed("blocked".into()));
    }
    state.player.x = nx;
    state.player.y = ny;
    pick_up(state);
    spring_trap(state)
}

/// Melee the enemy at `idx`
fn attack(state: &mut GameState, idx: usize) -> ActionResult {
    let player_level = state.player.level as i32;
    let enemy = &mut state.level.enemies[idx];
    enemy.awake = true;
    let stats = enemy.kind.stats();
    if !swing(&mut state.rng, player_level, stats.armor, 1) {
        return ActionResult::Failed(format!("missed the {}", enemy.kind));
    }
    let damage = (state.rng.dice(2, 4) as i32 + state.player.damage_bonus()).max(1);
    enemy.hp -= damage;
    if enemy.hp > 0 {
        return ActionResult::Success;
    }
    let killed = state.level.enemies.remove(idx);
    let gained = state.player.gain_exp(stats.exp, &mut state.rng);
    trace!(enemy = %killed.kind, exp = stats.exp, gained, "defeated");
    ActionResult::Success
}

/// Collect gold or eat food lying under the player
fn pick_up(state: &mut GameState) {
    let Some(idx) = state.level.item_at(state.player.x, state.player.y) else {
        return;
    };
    let item = state.level.items.remove(idx);
    match item.kind {
        ItemKind::Gold(amount) => {
            state.player.gold += amount;
            trace!(amount, total = state.player.gold, "picked up gold");
        }
        ItemKind::Food => {
            state.player.eat();
            trace!(nutrition = state.player.nutrition, "ate food");
        }
    }
}

/// Trigger a trap under the player, hidden or not
fn spring_trap(state: &mut GameState) -> GameResult<ActionResult> {
    let Some(idx) = state.level.trap_at(state.player.x, state.player.y) else {
        return Ok(ActionResult::Success);
    };
    state.level.traps[idx].seen = true;
    match state.level.traps[idx].trap_type {
        TrapType::Arrow => {
            let damage = state.rng.rnd(6) as i32;
            state.player.hp -= damage;
            trace!(damage, hp = state.player.hp, "arrow trap");
            if state.player.hp <= 0 {
                return Ok(ActionResult::Died("killed by an arrow".into()));
            }
            Ok(ActionResult::Success)
        }
        TrapType::TrapDoor => {
            let depth = state.level.depth + 1;
            trace!(depth, "fell through a trap door");
            state.enter_level(depth)?;
            Ok(ActionResult::Success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Cell, Room};

    fn corridor_level() -> Level {
        let mut level = Level::new(1, 10, 10);
        level.rooms.push(Room::new(2, 2, 3, 3));
        for x in 1..5 {
            for y in 1..5 {
                level.cells[x][y] = Cell {
                    typ: CellType::Floor,
                    ..Cell::stone()
                };
            }
        }
        level.cells[5][3].typ = CellType::Door;
        level.cells[6][3].typ = CellType::Corridor;
        level.cells[6][4].typ = CellType::Corridor;
        level
    }

    #[test]
    fn test_can_step_onto_floor() {
        let level = corridor_level();
        assert!(can_step(&level, (2, 2), (3, 3)));
        assert!(!can_step(&level, (4, 4), (5, 5)));
    }

    #[test]
    fn test_no_diagonal_through_doors() {
        let level = corridor_level();
        assert!(can_step(&level, (4, 3), (5, 3)));
        assert!(!can_step(&level, (4, 2), (5, 3)));
        assert!(!can_step(&level, (5, 3), (6, 4)));
        assert!(can_step(&level, (5, 3), (6, 3)));
    }
}
