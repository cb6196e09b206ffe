//! Going down the stairs

use super::ActionResult;
use crate::error::GameResult;
use crate::gameloop::GameState;

/// The '>' command
pub fn go_down(state: &mut GameState) -> GameResult<ActionResult> {
    if state.level.stairs != Some((state.player.x, state.player.y)) {
        return Ok(ActionResult::Failed("no stairs here".into()));
    }
    let depth = state.level.depth + 1;
    state.enter_level(depth)?;
    Ok(ActionResult::Success)
}
