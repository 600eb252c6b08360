//! Error types for htmlblocks library.
//!
//! Block conversion itself never fails: unknown structure always falls back
//! to a text block. Errors only arise at the edges, when reading input or
//! serializing output.

use std::io;
use thiserror::Error;

/// Result type alias for htmlblocks operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around HTML conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
