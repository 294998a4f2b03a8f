//! Error types for srcsync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for srcsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A root directory argument is unusable; aborts the run before any file is touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration (rules file, flags)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading, checksumming or writing a single file failed
    #[error("Could not check or copy {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Wrap an IO error with the path it happened on
    pub fn copy_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::CopyFailed {
            path: path.into(),
            source,
        }
    }

    /// Check if this error aborts the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::InvalidArgument(_) | SyncError::Config(_))
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SyncError::CopyFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}
