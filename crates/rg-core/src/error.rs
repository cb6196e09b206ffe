//! Engine errors
//!
//! Every fallible engine operation returns [`GameResult`]. The environments
//! surface these unchanged.

use thiserror::Error;

/// Errors raised by the engine
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid game configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Unknown command key {0:?}")]
    InvalidCommand(char),

    #[error("Tile {0:?} is not in the symbol table")]
    UnknownTile(char),

    #[error("Level generation failed: {0}")]
    Generation(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::InvalidSetting("screen width is too narrow".to_string());
        assert!(err.to_string().contains("too narrow"));

        let err = GameError::InvalidCommand('Q');
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: GameError = parse.unwrap_err().into();
        assert!(matches!(err, GameError::Json(_)));
    }
}
