//! Core error types for rouser-core.
//!
//! Each area of the library has its own error enum; [`CoreError`] wraps them
//! for callers that work across areas.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rouser-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Alarm store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Durable storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Playback errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Alarm store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The given alarm id is not in the store.
    #[error("No alarm with id {id}")]
    NotFound { id: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Malformed time of day.
    #[error("Invalid time of day {hour}:{minute:02} (hour must be 0-23, minute 0-59)")]
    InvalidTime { hour: u32, minute: u32 },
}

/// Playback errors.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// A session cannot start from a queue with no tracks.
    #[error("Cannot start playback from an empty queue")]
    EmptyQueue,
}

/// Durable storage errors.
///
/// Load/save are retried once internally; these surface only after the
/// retry also failed. In-memory state stays authoritative.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the alarm document failed
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the alarm document failed
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document did not parse
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the alarm set failed
    #[error("Failed to encode alarm set: {0}")]
    EncodeFailed(#[source] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
