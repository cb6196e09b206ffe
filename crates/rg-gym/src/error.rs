//! Environment errors
//!
//! Every error is fatal to the call that raised it. Engine errors pass
//! through unchanged.

use rg_core::GameError;
use thiserror::Error;

/// Errors raised by the environments
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Snapshot is {found_rows}x{found_cols} but the screen is {rows}x{cols}")]
    TypeMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error(transparent)]
    Engine(#[from] GameError),

    #[error("Expected one command per worker ({expected}), got {found}")]
    WorkerCountMismatch { expected: usize, found: usize },

    #[error("Worker {index} observes {found:?}, worker 0 observes {expected:?}")]
    ObservationShape {
        index: usize,
        expected: [usize; 3],
        found: [usize; 3],
    },

    #[error("Worker {index} failed: {source}")]
    Worker {
        index: usize,
        #[source]
        source: Box<EnvError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EnvResult<T> = Result<T, EnvError>;
