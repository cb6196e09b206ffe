//! Engine-level integration tests

use proptest::prelude::*;
use rg_core::{DungeonMode, GameConfig, GameError, GameState, StatusFlag, Symbol};

const KEYS: &[char] = &['h', 'j', 'k', 'l', 'y', 'u', 'b', 'n', '>', 's'];

fn play(seed: u64, keys: &[char]) -> Vec<rg_core::PlayerState> {
    let mut game = GameState::new(500, Some(seed), None).unwrap();
    let mut states = vec![game.snapshot()];
    for &key in keys {
        game.react(key).unwrap();
        states.push(game.snapshot());
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_same_game(seed in 0u64..1000, keys in prop::collection::vec(prop::sample::select(KEYS), 0..60)) {
        prop_assert_eq!(play(seed, &keys), play(seed, &keys));
    }

    #[test]
    fn snapshot_matches_screen(seed in 0u64..1000) {
        let game = GameState::new(10, Some(seed), None).unwrap();
        let state = game.snapshot();
        prop_assert_eq!(state.screen_size(), game.screen_size());
        prop_assert_eq!(state.history.dim(), game.screen_size());
        for row in &state.dungeon {
            for tile in row.chars() {
                prop_assert!(Symbol::from_tile(tile).is_some());
            }
        }
    }
}

#[test]
fn hidden_dungeon_starts_mostly_blank() {
    let game = GameState::new(10, Some(7), None).unwrap();
    let state = game.snapshot();
    let blank = state.dungeon.iter().flat_map(|r| r.chars()).filter(|&c| c == ' ').count();
    assert!(blank > 24 * 80 / 2);

    let shown = GameState::new(10, Some(7), Some(r#"{"hide_dungeon": false}"#)).unwrap();
    let visible = shown.snapshot();
    let blank_shown = visible.dungeon.iter().flat_map(|r| r.chars()).filter(|&c| c == ' ').count();
    assert!(blank_shown < blank);
}

#[test]
fn invalid_config_is_rejected() {
    let err = GameState::new(10, None, Some(r#"{"height": 4}"#)).unwrap_err();
    assert!(matches!(err, GameError::InvalidSetting(_)));
    let err = GameState::new(10, None, Some("[1, 2")).unwrap_err();
    assert!(matches!(err, GameError::Json(_)));
    let huge = r#"{"seed": 1, "dungeon": {"max_rooms": 18446744073709551615}}"#;
    let err = GameState::new(10, None, Some(huge)).unwrap_err();
    assert!(matches!(err, GameError::InvalidSetting(_)));
    let mut config = GameConfig::default();
    config.dungeon.room_width = usize::MAX;
    let err = GameState::with_config(10, Some(1), config).unwrap_err();
    assert!(matches!(err, GameError::InvalidSetting(_)));
}

#[test]
fn dumped_config_rebuilds_the_same_game() {
    let game = GameState::new(10, None, Some(r#"{"seed_range": [5, 50]}"#)).unwrap();
    let dumped = game.dump_config().unwrap();
    let again = GameState::new(10, None, Some(&dumped)).unwrap();
    assert_eq!(again.seed(), game.seed());
    assert_eq!(again.snapshot(), game.snapshot());
}

#[test]
fn enemies_widen_the_symbol_table() {
    let json = r#"{"seed": 2, "enemies": {"builtin": ["Z", "B"], "appear_rate": 50}}"#;
    let game = GameState::new(10, None, Some(json)).unwrap();
    assert_eq!(game.dungeon_channels(), Symbol::from_tile('Z').unwrap().index());
    assert_eq!(game.dungeon_channels(), 42);
    let config = GameConfig::default();
    assert_eq!(config.symbol_max().index(), 16);

    let image = game
        .render(&game.snapshot(), DungeonMode::Symbolic, StatusFlag::EMPTY, false)
        .unwrap();
    assert_eq!(image.dim(), (42, 24, 80));
}

#[test]
fn play_until_the_budget_runs_out() {
    let mut game = GameState::new(40, Some(3), None).unwrap();
    let mut over = false;
    for (i, key) in "hjklyubns>".chars().cycle().take(40).enumerate() {
        over = game.react(key).unwrap();
        if over {
            assert!(game.player.is_dead() || i == 39);
            break;
        }
    }
    assert!(over);
}
