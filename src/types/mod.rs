//! Core type definitions for srcsync

mod error;
mod event;
mod report;

pub use error::SyncError;
pub use event::{SyncCallback, SyncEvent, TransferMode};
pub use report::SyncReport;
