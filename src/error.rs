//! Error types for stash operations.
//!
//! Uses `thiserror` for ergonomic error definitions. Errors propagate to the
//! immediate caller unmodified; there is no retry or fallback layer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cache, sequence, and validator operations.
#[derive(Error, Debug)]
pub enum StashError {
    #[error("Failed to read cache file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache file {path} is not valid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache file {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Failed to serialize cache: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("No record for user '{user_id}'")]
    UserNotFound { user_id: String },

    #[error("Cannot take the maximum of an empty sequence")]
    EmptySequence,

    #[error("Invalid age '{input}': {source}")]
    InvalidAge {
        input: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Result type alias for stash operations.
pub type StashResult<T> = Result<T, StashError>;
