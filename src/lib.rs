//! # srcsync - One-way source tree synchronizer
//!
//! Refreshes every file of an existing destination tree from the file at the
//! same relative path in a source tree. Text is re-encoded as UTF-8 with LF
//! line endings and only written when the result differs; files with a binary
//! extension are copied byte-for-byte. An optional scout lists recent source
//! files the destination may be missing.

pub mod charset;
pub mod commands;
pub mod config;
pub mod executor;
pub mod hash;
pub mod logging;
pub mod scanner;
pub mod scout;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, SyncRules};
pub use executor::{synchronize, Synchronizer};
pub use scout::{scout, NewFileScout};
pub use types::{SyncError, SyncEvent, SyncReport, TransferMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
