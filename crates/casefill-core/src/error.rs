//! Error types for the casefill-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the casefill library.
#[derive(Error, Debug)]
pub enum CasefillError {
    /// Case record load/persist error.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading and writing case records.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The record file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The record is valid JSON but not an object.
    #[error("{0} does not contain a JSON object")]
    NotAnObject(PathBuf),

    /// The record could not be written back.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the casefill library.
pub type Result<T> = std::result::Result<T, CasefillError>;
