//! Main game loop
//!
//! [`GameState`] is one running game: it owns the level, the player and the
//! RNG stream, applies one command per call to [`GameState::react`], and
//! rebuilds itself on [`GameState::reset`].

use ndarray::{Array2, Array3};
use tracing::{debug, trace};

use crate::action::level_change::go_down;
use crate::action::movement::domove;
use crate::action::search::dosearch;
use crate::action::{ActionResult, Command};
use crate::config::GameConfig;
use crate::dungeon::{Level, generate_level};
use crate::error::{GameError, GameResult};
use crate::monster::enemies_act;
use crate::player::{Player, StatusFlag};
use crate::render::{self, DungeonMode};
use crate::rng::GameRng;
use crate::state::PlayerState;

/// One game instance
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: GameRng,
    pub level: Level,
    pub player: Player,
    /// Turns since the game began
    pub turns: u64,
    /// Commands accepted since the last reset
    steps: usize,
    max_steps: usize,
    /// Death or budget exhaustion already reported since the last reset
    ended: bool,
    /// Seed of the current game
    seed: u64,
    /// Reuse `seed` on reset instead of drawing a new one
    fixed_seed: bool,
    /// Seed for the next reset, set by [`GameState::set_seed`]
    pending_seed: Option<u64>,
    /// Every command accepted since construction
    history: String,
}

impl GameState {
    /// Build a game
    ///
    /// An explicit `seed` wins over the config's own seed; without either a
    /// seed is drawn from the config's seed range or at random.
    pub fn new(max_steps: usize, seed: Option<u64>, config_json: Option<&str>) -> GameResult<Self> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(json)?,
            None => GameConfig::default(),
        };
        Self::with_config(max_steps, seed, config)
    }

    /// Build a game from an already parsed config
    pub fn with_config(max_steps: usize, seed: Option<u64>, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let fixed_seed = seed.is_some() || config.has_fixed_seed();
        let seed = seed.unwrap_or_else(|| config.choose_seed());
        let mut rng = GameRng::new(seed);
        let (level, (x, y)) = generate_level(1, &config, &mut rng)?;
        let player = Player::new(&config.player, x, y);

        let mut state = Self {
            config,
            rng,
            level,
            player,
            turns: 0,
            steps: 0,
            max_steps,
            ended: false,
            seed,
            fixed_seed,
            pending_seed: None,
            history: String::new(),
        };
        state.level.update_visibility(x, y);
        debug!(seed, max_steps, "new game");
        Ok(state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Player died or the step budget ran out since the last reset
    pub fn is_over(&self) -> bool {
        self.ended
    }

    /// Apply one command key and report whether it ended the game
    ///
    /// Only the command that kills the player or uses up the step budget
    /// returns `true`. Commands after that still apply and return `false`
    /// until the next reset.
    pub fn react(&mut self, key: char) -> GameResult<bool> {
        let command = Command::from_key(key).ok_or(GameError::InvalidCommand(key))?;
        let result = match command {
            Command::Move(dir) => domove(self, dir)?,
            Command::GoDown => go_down(self)?,
            Command::Search => dosearch(self),
        };
        trace!(key = %key, step = self.steps, ?result, "command");

        self.end_turn(&result);
        self.steps += 1;
        self.history.push(key);
        if self.ended {
            return Ok(false);
        }
        self.ended = self.player.is_dead() || self.steps >= self.max_steps;
        Ok(self.ended)
    }

    /// Everything that happens after the player's action
    fn end_turn(&mut self, result: &ActionResult) {
        self.turns += 1;
        self.player.tick(self.turns);
        if !matches!(result, ActionResult::Died(_)) && !self.player.is_dead() {
            enemies_act(&mut self.level, &mut self.player, &mut self.rng);
        }
        if self.player.is_dead() && !self.ended {
            debug!(
                turns = self.turns,
                hp = self.player.hp,
                nutrition = self.player.nutrition,
                "player died"
            );
        }
        self.level.update_visibility(self.player.x, self.player.y);
    }

    /// Replace the current level with a fresh one at `depth`
    ///
    /// The new level is drawn from the same RNG stream.
    pub fn enter_level(&mut self, depth: u32) -> GameResult<()> {
        let (level, (x, y)) = generate_level(depth, &self.config, &mut self.rng)?;
        self.level = level;
        self.player.x = x;
        self.player.y = y;
        self.level.update_visibility(x, y);
        debug!(depth, "entered level");
        Ok(())
    }

    /// Seed for the next reset only
    pub fn set_seed(&mut self, seed: u64) {
        self.pending_seed = Some(seed);
    }

    /// Start over
    ///
    /// Uses the pending seed if one was set, the current seed if it is
    /// fixed, and a freshly drawn one otherwise.
    pub fn reset(&mut self) -> GameResult<()> {
        let seed = match self.pending_seed.take() {
            Some(seed) => {
                self.fixed_seed = true;
                seed
            }
            None if self.fixed_seed => self.seed,
            None => self.config.choose_seed(),
        };
        let mut rng = GameRng::new(seed);
        let (level, (x, y)) = generate_level(1, &self.config, &mut rng)?;
        self.rng = rng;
        self.level = level;
        self.player = Player::new(&self.config.player, x, y);
        self.level.update_visibility(x, y);
        self.seed = seed;
        self.turns = 0;
        self.steps = 0;
        self.ended = false;
        debug!(seed, "reset");
        Ok(())
    }

    /// Current screen, status and history
    pub fn snapshot(&self) -> PlayerState {
        let player = (self.player.x, self.player.y);
        let hide = self.config.hide_dungeon;
        let dungeon = (0..self.level.height)
            .map(|y| {
                (0..self.level.width)
                    .map(|x| {
                        if (x, y) == player {
                            '@'
                        } else {
                            self.level.tile_at(x, y, player, hide)
                        }
                    })
                    .collect()
            })
            .collect();
        let history = Array2::from_shape_fn((self.level.height, self.level.width), |(y, x)| {
            self.level.cell(x, y).visited
        });
        PlayerState::new(
            dungeon,
            self.player.status(self.level.depth),
            history,
            player,
        )
    }

    /// (height, width) of the screen
    pub fn screen_size(&self) -> (usize, usize) {
        (self.config.height, self.config.width)
    }

    /// Number of symbolic dungeon channels
    pub fn dungeon_channels(&self) -> usize {
        self.config.symbol_max().index()
    }

    /// Config JSON with the current seed filled in
    pub fn dump_config(&self) -> GameResult<String> {
        let config = GameConfig {
            seed: Some(self.seed),
            ..self.config.clone()
        };
        config.to_json()
    }

    /// Every command accepted since construction
    pub fn dump_history(&self) -> String {
        self.history.clone()
    }

    /// Render a snapshot with this game's symbol table
    pub fn render(
        &self,
        state: &PlayerState,
        mode: DungeonMode,
        flags: StatusFlag,
        with_history: bool,
    ) -> GameResult<Array3<f32>> {
        render::render(state, self.config.symbol_max(), mode, flags, with_history)
    }
}
