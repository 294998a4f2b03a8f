//! SyncReport - Counters for a single synchronizer run

/// Outcome counters for one synchronizer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Destination files found by the walk (ignored ones included)
    pub files_seen: usize,

    /// Files skipped because their name is in the ignore set
    pub ignored: usize,

    /// Destination files overwritten (or planned, in dry-run mode)
    pub updated: usize,

    /// Text files whose normalized content already matched
    pub unchanged: usize,

    /// Destination files without a source counterpart
    pub missing_source: usize,

    /// Source files no charset candidate could decode
    pub undetected: usize,

    /// Files that failed with an IO error
    pub failed: usize,
}

impl SyncReport {
    /// Number of per-file warnings raised during the run
    pub fn warnings(&self) -> usize {
        self.missing_source + self.undetected + self.failed
    }

    /// True when nothing needed to be written
    pub fn is_clean(&self) -> bool {
        self.updated == 0 && self.warnings() == 0
    }
}
