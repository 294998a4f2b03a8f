//! New-file scout
//!
//! After a sync, lists source files that look like they belong in the
//! destination set but are not there yet: their name is unknown to the
//! destination, they changed recently, and they live in a directory that
//! already has synced files. Output is advisory; nothing is written.
//!
//! Destination files are matched by file name only. Two files with the same
//! name in different directories are indistinguishable, so a new
//! `b/util.rs` is not reported when the destination already has `a/util.rs`.

use crate::config::SyncRules;
use crate::scanner::{list_files, FileWalk};
use crate::types::SyncError;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Finds source files that may need to be added to the destination tree
#[derive(Debug, Clone)]
pub struct NewFileScout {
    source_root: PathBuf,
    dest_root: PathBuf,
    age_days: u32,
    rules: SyncRules,
    now: SystemTime,
}

impl NewFileScout {
    /// Scout with the default ignore set, measured against the current time
    pub fn new(source_root: &Path, dest_root: &Path, age_days: u32) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            dest_root: dest_root.to_path_buf(),
            age_days,
            rules: SyncRules::default(),
            now: SystemTime::now(),
        }
    }

    /// Use a different ignore set
    pub fn with_rules(mut self, rules: SyncRules) -> Self {
        self.rules = rules;
        self
    }

    /// Measure file age against `now` instead of the wall clock
    pub fn with_reference_time(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Index the destination tree and return a lazy iterator over candidates
    ///
    /// Candidates come out in source walk order. The iterator is single-use;
    /// call `candidates` again for a fresh walk.
    pub fn candidates(&self) -> Result<ScoutCandidates, SyncError> {
        let source_root = absolutize(&self.source_root, "Source")?;
        let dest_root = absolutize(&self.dest_root, "Dest")?;

        let mut dest_names: HashSet<OsString> = HashSet::new();
        let mut synced_dirs: HashSet<PathBuf> = HashSet::new();
        for dest_file in list_files(&dest_root) {
            let Some(name) = dest_file.file_name() else {
                continue;
            };
            dest_names.insert(name.to_os_string());

            if self.rules.is_ignored(name) {
                continue;
            }
            if let Some(dir) = dest_file
                .parent()
                .and_then(|parent| parent.strip_prefix(&dest_root).ok())
            {
                synced_dirs.insert(dir.to_path_buf());
            }
        }

        tracing::debug!(
            names = dest_names.len(),
            dirs = synced_dirs.len(),
            days = self.age_days,
            "indexed destination for scout"
        );

        // Thresholds reaching past the earliest representable date accept everything.
        let cutoff = DateTime::<Utc>::from(self.now)
            .checked_sub_signed(Duration::days(i64::from(self.age_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Ok(ScoutCandidates {
            walk: FileWalk::new(&source_root),
            source_root,
            dest_names,
            synced_dirs,
            cutoff,
            rules: self.rules.clone(),
        })
    }
}

/// Lazy, order-preserving sequence of scout candidates
pub struct ScoutCandidates {
    walk: FileWalk,
    source_root: PathBuf,
    dest_names: HashSet<OsString>,
    synced_dirs: HashSet<PathBuf>,
    cutoff: DateTime<Utc>,
    rules: SyncRules,
}

impl ScoutCandidates {
    fn is_candidate(&self, source_file: &Path) -> bool {
        let Some(name) = source_file.file_name() else {
            return false;
        };
        if self.rules.is_ignored(name) || self.dest_names.contains(name) {
            return false;
        }
        if !self.is_young(source_file) {
            return false;
        }

        source_file
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.source_root).ok())
            .is_some_and(|dir| self.synced_dirs.contains(dir))
    }

    fn is_young(&self, source_file: &Path) -> bool {
        match std::fs::metadata(source_file).and_then(|m| m.modified()) {
            Ok(mtime) => DateTime::<Utc>::from(mtime) > self.cutoff,
            Err(e) => {
                tracing::warn!(
                    "Failed to read modification time for {}: {}. File will be skipped.",
                    source_file.display(),
                    e
                );
                false
            }
        }
    }
}

impl Iterator for ScoutCandidates {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.walk.next() {
            if self.is_candidate(&path) {
                return Some(path);
            }
        }
        None
    }
}

/// Candidates under `source_root` missing from `dest_root`, modified within
/// `age_days`
///
/// # Example
/// ```no_run
/// use srcsync::scout::scout;
/// use std::path::Path;
///
/// let found: Vec<_> = scout(Path::new("upstream"), Path::new("vendored"), 30)?.collect();
/// println!("Found {} potentially new files.", found.len());
/// # Ok::<(), srcsync::SyncError>(())
/// ```
pub fn scout(
    source_root: &Path,
    dest_root: &Path,
    age_days: u32,
) -> Result<ScoutCandidates, SyncError> {
    NewFileScout::new(source_root, dest_root, age_days).candidates()
}

fn absolutize(root: &Path, label: &str) -> Result<PathBuf, SyncError> {
    if !root.is_dir() {
        return Err(SyncError::InvalidArgument(format!(
            "{} dir {} is not a directory!",
            label,
            root.display()
        )));
    }
    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}
