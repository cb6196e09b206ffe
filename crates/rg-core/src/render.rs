//! Tensor renderers
//!
//! Turn a [`PlayerState`] into a `(channels, height, width)` image. Dungeon
//! channels come first, then one constant channel per selected status flag
//! in bit order, then the optional history channel.

use ndarray::{Array3, Axis, Zip};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::{GameError, GameResult};
use crate::player::StatusFlag;
use crate::state::PlayerState;
use crate::symbol::Symbol;

/// How dungeon tiles become channels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DungeonMode {
    /// One one-hot channel per non-blank symbol
    #[default]
    Symbolic,
    /// A single channel holding symbol index / symbol max
    Grayscale,
}

impl DungeonMode {
    /// Channels used by the dungeon part of the image
    pub const fn channels(&self, dungeon_channels: usize) -> usize {
        match self {
            DungeonMode::Symbolic => dungeon_channels,
            DungeonMode::Grayscale => 1,
        }
    }
}

/// Render `state` with symbols up to `symbol_max`
pub fn render(
    state: &PlayerState,
    symbol_max: Symbol,
    mode: DungeonMode,
    flags: StatusFlag,
    with_history: bool,
) -> GameResult<Array3<f32>> {
    let (height, width) = state.screen_size();
    let dungeon = mode.channels(symbol_max.index());
    let status = flags.count_one();
    let channels = dungeon + status + usize::from(with_history);
    let mut image = Array3::<f32>::zeros((channels, height, width));

    for (y, row) in state.dungeon.iter().enumerate() {
        for (x, tile) in row.chars().take(width).enumerate() {
            let symbol = Symbol::from_tile(tile).ok_or(GameError::UnknownTile(tile))?;
            if symbol > symbol_max {
                return Err(GameError::UnknownTile(tile));
            }
            let Some(channel) = symbol.channel() else {
                continue;
            };
            match mode {
                DungeonMode::Symbolic => image[[channel, y, x]] = 1.0,
                DungeonMode::Grayscale => {
                    image[[0, y, x]] = symbol.index() as f32 / symbol_max.index() as f32
                }
            }
        }
    }

    for (i, flag) in flags.selected().enumerate() {
        let value = state.status.normalized(flag);
        image.index_axis_mut(Axis(0), dungeon + i).fill(value);
    }

    if with_history {
        if state.history.dim() != (height, width) {
            return Err(GameError::InvalidSetting(format!(
                "history is {:?}, screen is {:?}",
                state.history.dim(),
                (height, width)
            )));
        }
        Zip::from(image.index_axis_mut(Axis(0), channels - 1))
            .and(&state.history)
            .for_each(|out, &visited| {
                if visited {
                    *out = 1.0;
                }
            });
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Status;
    use ndarray::Array2;

    fn state() -> PlayerState {
        let dungeon = vec![" -+- ".to_string(), " |@* ".to_string()];
        let mut history = Array2::from_elem((2, 5), false);
        history[[1, 2]] = true;
        let status = Status {
            dungeon_level: 13,
            hp_current: 6,
            hp_max: 12,
            ..Status::default()
        };
        PlayerState::new(dungeon, status, history, (2, 1))
    }

    #[test]
    fn test_symbolic_one_hot() {
        let max = Symbol::max_item();
        let image = render(&state(), max, DungeonMode::Symbolic, StatusFlag::EMPTY, false).unwrap();
        assert_eq!(image.dim(), (16, 2, 5));
        let at = Symbol::from_tile('@').unwrap().channel().unwrap();
        let wall = Symbol::from_tile('-').unwrap().channel().unwrap();
        assert_eq!(image[[at, 1, 2]], 1.0);
        assert_eq!(image[[wall, 0, 1]], 1.0);
        assert_eq!(image[[wall, 1, 1]], 1.0);
        // blank cells have no channel
        assert_eq!(image.index_axis(Axis(1), 0).index_axis(Axis(1), 0).sum(), 0.0);
        // every non-blank cell is hot in exactly one channel
        assert_eq!(image.sum(), 6.0);
    }

    #[test]
    fn test_grayscale_with_status_and_history() {
        let max = Symbol::max_item();
        let flags = StatusFlag::DUNGEON_LEVEL | StatusFlag::HP_CURRENT;
        let image = render(&state(), max, DungeonMode::Grayscale, flags, true).unwrap();
        assert_eq!(image.dim(), (4, 2, 5));
        let at = Symbol::from_tile('@').unwrap().index() as f32 / 16.0;
        assert_eq!(image[[0, 1, 2]], at);
        assert_eq!(image[[0, 0, 0]], 0.0);
        assert_eq!(image[[1, 0, 0]], 0.5);
        assert_eq!(image[[2, 1, 4]], 0.5);
        assert_eq!(image[[3, 1, 2]], 1.0);
        assert_eq!(image.index_axis(Axis(0), 3).sum(), 1.0);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        for mode in [DungeonMode::Symbolic, DungeonMode::Grayscale] {
            let image = render(&state(), Symbol::max_item(), mode, StatusFlag::FULL, true).unwrap();
            assert!(image.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_enemy_above_symbol_max_is_rejected() {
        let mut s = state();
        s.dungeon[0] = " -K- ".to_string();
        let err = render(&s, Symbol::max_item(), DungeonMode::Symbolic, StatusFlag::EMPTY, false)
            .unwrap_err();
        assert!(matches!(err, GameError::UnknownTile('K')));
        let max = Symbol::from_tile('K').unwrap();
        let image = render(&s, max, DungeonMode::Symbolic, StatusFlag::EMPTY, false).unwrap();
        assert_eq!(image.dim().0, max.index());
    }
}
