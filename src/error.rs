//! Error types shared by the loader, the grouper and the layout engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which physical dimension of a record a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

/// The rule a record broke when it was checked for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("{0} is missing")]
    MissingDimension(Dimension),
    #[error("{0} is not an integer")]
    NonInteger(Dimension),
    #[error("{0} must be strictly positive")]
    NonPositive(Dimension),
    #[error("{0} is too large")]
    OutOfRange(Dimension),
    #[error("shelf is missing")]
    MissingShelf,
}

#[derive(Debug, Error)]
pub enum Error {
    /// A record failed validation while grouping or laying out. No partial
    /// result is produced.
    #[error("record {index} ({shelfmark:?}) cannot be laid out: {reason}")]
    InvalidRecord {
        index: usize,
        shelfmark: String,
        #[source]
        reason: InvalidReason,
    },

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read catalogue '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
