//! Error types for streamcheck
//!
//! Centralized error handling using thiserror.
//!
//! An INVALID verdict is not an error: malformed input is the normal, successful
//! outcome of a scan and is reported through [`crate::result::PolicyResult`].
//! Errors cover configuration faults, ingestion I/O faults, and lifecycle
//! misuse only.

use crate::policy::PolicyTag;
use thiserror::Error;

/// All error types that can occur in streamcheck
#[derive(Debug, Error)]
pub enum CheckError {
    /// Bad constructor arguments (empty source, empty policy list, wrong mode)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No factory registered for a configured policy tag
    #[error("no policy registered for tag: {0}")]
    UnknownPolicy(PolicyTag),

    /// Failure reading the source; fatal to the current validation run
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation run is already in flight on this instance
    #[error("a validation run is already in progress on this instance")]
    InProgress,

    /// The instance has been stopped and accepts no further operations
    #[error("instance has been stopped")]
    Stopped,
}

/// Result type alias for streamcheck operations
pub type Result<T> = std::result::Result<T, CheckError>;
