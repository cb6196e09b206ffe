//! Searching for secret doors and hidden traps

use tracing::trace;

use super::ActionResult;
use crate::dungeon::CellType;
use crate::gameloop::GameState;

/// One chance in this many to find each adjacent secret door
const SECRET_DOOR_ODDS: u32 = 3;
/// One chance in this many to find each adjacent hidden trap
const HIDDEN_TRAP_ODDS: u32 = 2;

/// The 's' command: search the eight adjacent cells
pub fn dosearch(state: &mut GameState) -> ActionResult {
    let mut found = 0;
    for (x, y) in state.level.neighbours(state.player.x, state.player.y) {
        if state.level.cell(x, y).typ == CellType::SecretDoor
            && state.rng.one_in(SECRET_DOOR_ODDS)
        {
            let cell = state.level.cell_mut(x, y);
            cell.typ = CellType::Door;
            cell.seen = true;
            found += 1;
        }
        if let Some(idx) = state.level.trap_at(x, y) {
            if !state.level.traps[idx].seen && state.rng.one_in(HIDDEN_TRAP_ODDS) {
                state.level.traps[idx].seen = true;
                found += 1;
            }
        }
    }
    if found == 0 {
        return ActionResult::Failed("found nothing".into());
    }
    trace!(found, "search");
    ActionResult::Success
}
