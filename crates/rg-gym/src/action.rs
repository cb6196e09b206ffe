//! Actions and the fixed action table

use crate::error::{EnvError, EnvResult};

/// Command key for each action index
pub const ACTIONS: [char; 10] = ['h', 'j', 'k', 'l', 'n', 'b', 'u', 'y', '>', 's'];

pub const ACTION_LEN: usize = ACTIONS.len();

/// Key to meaning, in action order
///
/// `y` carries the same label as `b` even though the engine moves it
/// up-left. The label is kept as is for compatibility with existing logs.
pub const ACTION_MEANINGS: [(char, &str); ACTION_LEN] = [
    ('h', "MOVE_LEFT"),
    ('j', "MOVE_UP"),
    ('k', "MOVE_DOWN"),
    ('l', "MOVE_RIGHT"),
    ('n', "MOVE_RIGHTDOWN"),
    ('b', "MOVE_LEFTDOWN"),
    ('u', "MOVE_RIGHTUP"),
    ('y', "MOVE_LEFTDOWN"),
    ('>', "DOWNSTAIR"),
    ('s', "SEARCH"),
];

/// What the agent asks the environment to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Index into [`ACTIONS`]
    ByIndex(usize),
    /// Raw command keys, applied in order
    ByCommands(String),
}

impl Action {
    /// Turn the action into the command keys to apply
    pub fn decode(&self) -> EnvResult<Vec<char>> {
        match self {
            Action::ByIndex(i) => ACTIONS
                .get(*i)
                .map(|&c| vec![c])
                .ok_or_else(|| {
                    EnvError::InvalidAction(format!(
                        "action index {i} is out of range 0..{ACTION_LEN}"
                    ))
                }),
            Action::ByCommands(keys) => keys
                .chars()
                .map(|c| {
                    if is_command(c) {
                        Ok(c)
                    } else {
                        Err(EnvError::InvalidAction(format!("unknown command key {c:?}")))
                    }
                })
                .collect(),
        }
    }
}

impl From<usize> for Action {
    fn from(i: usize) -> Self {
        Action::ByIndex(i)
    }
}

impl From<&str> for Action {
    fn from(keys: &str) -> Self {
        Action::ByCommands(keys.to_string())
    }
}

impl From<String> for Action {
    fn from(keys: String) -> Self {
        Action::ByCommands(keys)
    }
}

/// Whether `c` is in the command alphabet
pub fn is_command(c: char) -> bool {
    ACTIONS.contains(&c)
}

/// Label of a command key
pub fn meaning(key: char) -> Option<&'static str> {
    ACTION_MEANINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, m)| *m)
}
