//! Configuration management

mod cli;
mod rules;

pub use cli::Cli;
pub use rules::{SyncRules, DEFAULT_BINARY_EXTENSIONS, DEFAULT_IGNORE_FILES};

use crate::types::SyncError;
use std::path::PathBuf;

/// Default age threshold for the new-file scout
pub const DEFAULT_SCOUT_DAYS: u32 = 30;

/// Global configuration for srcsync
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory (read only)
    pub source: PathBuf,

    /// Destination directory (files overwritten in place)
    pub destination: PathBuf,

    /// Ignore set and binary extension set
    pub rules: SyncRules,

    /// Run the new-file scout after synchronizing
    pub scout: bool,

    /// Scout only reports files modified within this many days
    pub scout_days: u32,

    /// Detect and compare, but write nothing
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            rules: SyncRules::default(),
            scout: false,
            scout_days: DEFAULT_SCOUT_DAYS,
            dry_run: false,
        }
    }
}

impl Config {
    /// Validate configuration
    ///
    /// Both roots must be existing directories and must differ.
    pub fn validate(&self) -> Result<(), SyncError> {
        if !self.source.is_dir() {
            return Err(SyncError::InvalidArgument(format!(
                "Source dir {} is not a directory!",
                self.source.display()
            )));
        }

        if !self.destination.is_dir() {
            return Err(SyncError::InvalidArgument(format!(
                "Dest dir {} is not a directory!",
                self.destination.display()
            )));
        }

        if self.source == self.destination {
            return Err(SyncError::InvalidArgument(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
