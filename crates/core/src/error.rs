// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Per-record failures while normalizing raw history entries.
///
/// These never abort a batch — the offending record is skipped and the
/// rest of the history is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing or non-numeric timestamp")]
    InvalidTimestamp,
}

/// Errors loading the domain→category table at startup.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("cannot read category table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed category table {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl CategoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}
