//! SyncEvent - Per-file notices emitted by the synchronizer

use super::{SyncError, SyncReport};
use std::path::PathBuf;

/// How a destination file was (or would be) refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Byte-for-byte copy, no normalization
    Binary,

    /// Decoded, line endings normalized, re-encoded as UTF-8
    Text,
}

/// Events emitted while synchronizing a destination tree.
///
/// Notices are advisory: the walk never changes course because of how a
/// callback handles them.
#[derive(Debug)]
pub enum SyncEvent {
    /// Destination walk finished; `total` files will be visited.
    Started { total: usize },

    /// Processing of one destination file begins.
    FileStart {
        index: usize,
        total: usize,
        path: PathBuf,
    },

    /// Destination file was overwritten (or would be, in dry-run mode).
    Updated {
        path: PathBuf,
        mode: TransferMode,
        dry_run: bool,
    },

    /// Destination file has no source counterpart and was left untouched.
    MissingSource { dest: PathBuf, source: PathBuf },

    /// No charset candidate could decode the source file.
    ///
    /// `tried` is zero when detection produced no candidates at all.
    EncodingUndetected { source: PathBuf, tried: usize },

    /// One charset candidate failed; the next one is tried.
    UnsupportedCharset {
        source: PathBuf,
        charset: String,
        reason: String,
    },

    /// Reading, checksumming or writing failed for one file.
    CopyFailed { path: PathBuf, error: SyncError },

    /// Walk completed.
    Complete { report: SyncReport },
}

impl SyncEvent {
    /// Short label used in summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            SyncEvent::Started { .. } => "Started",
            SyncEvent::FileStart { .. } => "FileStart",
            SyncEvent::Updated { .. } => "Updated",
            SyncEvent::MissingSource { .. } => "MissingSource",
            SyncEvent::EncodingUndetected { .. } => "EncodingUndetected",
            SyncEvent::UnsupportedCharset { .. } => "UnsupportedCharset",
            SyncEvent::CopyFailed { .. } => "CopyFailed",
            SyncEvent::Complete { .. } => "Complete",
        }
    }

    /// Whether this event is a per-file warning
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SyncEvent::MissingSource { .. }
                | SyncEvent::EncodingUndetected { .. }
                | SyncEvent::UnsupportedCharset { .. }
                | SyncEvent::CopyFailed { .. }
        )
    }
}

/// Callback used to receive sync events.
pub type SyncCallback = dyn Fn(&SyncEvent) + Send + Sync;
