//! Synchronizer: refreshes every destination file from its source counterpart

pub mod copy;
mod text;

pub use copy::{copy_file_atomic, write_file_atomic};
pub use text::{normalize_with_candidates, Normalized};

use crate::charset::detect_charsets;
use crate::config::{Config, SyncRules};
use crate::hash::file_matches;
use crate::scanner::{list_files, translate_path};
use crate::types::{SyncCallback, SyncError, SyncEvent, SyncReport, TransferMode};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Ignored,
    Updated,
    Unchanged,
    MissingSource,
    Undetected,
}

/// One-way synchronizer from a source tree onto an existing destination tree
///
/// Only files already present in the destination are touched; the source is
/// never written.
///
/// # Example
/// ```no_run
/// use srcsync::config::SyncRules;
/// use srcsync::executor::Synchronizer;
/// use std::path::Path;
///
/// let report = Synchronizer::new(SyncRules::default())
///     .synchronize(Path::new("upstream"), Path::new("vendored"), None)?;
/// println!("{} updated", report.updated);
/// # Ok::<(), srcsync::SyncError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synchronizer {
    rules: SyncRules,
    dry_run: bool,
}

impl Synchronizer {
    /// Create a synchronizer with the given ignore/binary rules
    pub fn new(rules: SyncRules) -> Self {
        Self {
            rules,
            dry_run: false,
        }
    }

    /// Build from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rules.clone()).with_dry_run(config.dry_run)
    }

    /// Detect and compare only; never write
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Rules in effect
    pub fn rules(&self) -> &SyncRules {
        &self.rules
    }

    /// Synchronize every file under `dest_root` from `source_root`
    ///
    /// Fails with [`SyncError::InvalidArgument`] before touching anything if
    /// either root is not a directory. Per-file problems are reported through
    /// `on_event`, counted in the returned report, and never abort the walk.
    pub fn synchronize(
        &self,
        source_root: &Path,
        dest_root: &Path,
        on_event: Option<&SyncCallback>,
    ) -> Result<SyncReport, SyncError> {
        ensure_directory("Source", source_root)?;
        ensure_directory("Dest", dest_root)?;

        let dest_files = list_files(dest_root);
        let total = dest_files.len();
        tracing::info!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            files = total,
            "Syncing sources"
        );
        emit_event(on_event, SyncEvent::Started { total });

        let mut report = SyncReport {
            files_seen: total,
            ..Default::default()
        };

        for (idx, dest_file) in dest_files.into_iter().enumerate() {
            emit_event(
                on_event,
                SyncEvent::FileStart {
                    index: idx + 1,
                    total,
                    path: dest_file.clone(),
                },
            );

            match self.sync_file(&dest_file, source_root, dest_root, on_event) {
                Ok(FileOutcome::Ignored) => report.ignored += 1,
                Ok(FileOutcome::Updated) => report.updated += 1,
                Ok(FileOutcome::Unchanged) => report.unchanged += 1,
                Ok(FileOutcome::MissingSource) => report.missing_source += 1,
                Ok(FileOutcome::Undetected) => report.undetected += 1,
                Err(error) => {
                    report.failed += 1;
                    tracing::debug!(path = %dest_file.display(), %error, "file failed");
                    let path = error
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dest_file.clone());
                    emit_event(on_event, SyncEvent::CopyFailed { path, error });
                }
            }
        }

        emit_event(
            on_event,
            SyncEvent::Complete {
                report: report.clone(),
            },
        );

        Ok(report)
    }

    fn sync_file(
        &self,
        dest_file: &Path,
        source_root: &Path,
        dest_root: &Path,
        on_event: Option<&SyncCallback>,
    ) -> Result<FileOutcome, SyncError> {
        let is_ignored = dest_file
            .file_name()
            .is_some_and(|name| self.rules.is_ignored(name));
        if is_ignored {
            tracing::trace!(path = %dest_file.display(), "ignored");
            return Ok(FileOutcome::Ignored);
        }

        let source_file = translate_path(dest_file, dest_root, source_root).ok_or_else(|| {
            SyncError::copy_failed(
                dest_file,
                std::io::Error::other("path is not inside the destination root"),
            )
        })?;

        if !source_file.exists() {
            emit_event(
                on_event,
                SyncEvent::MissingSource {
                    dest: dest_file.to_path_buf(),
                    source: source_file,
                },
            );
            return Ok(FileOutcome::MissingSource);
        }

        if self.rules.is_binary(&source_file) {
            self.sync_binary(&source_file, dest_file, on_event)
        } else {
            self.sync_text(&source_file, dest_file, on_event)
        }
    }

    fn sync_binary(
        &self,
        source_file: &Path,
        dest_file: &Path,
        on_event: Option<&SyncCallback>,
    ) -> Result<FileOutcome, SyncError> {
        if !self.dry_run {
            let bytes = copy_file_atomic(source_file, dest_file)?;
            tracing::debug!(path = %dest_file.display(), bytes, "binary copied");
        }
        emit_updated(on_event, dest_file, TransferMode::Binary, self.dry_run);
        Ok(FileOutcome::Updated)
    }

    fn sync_text(
        &self,
        source_file: &Path,
        dest_file: &Path,
        on_event: Option<&SyncCallback>,
    ) -> Result<FileOutcome, SyncError> {
        let bytes = fs::read(source_file).map_err(|e| SyncError::copy_failed(source_file, e))?;
        let candidates = detect_charsets(&bytes);
        tracing::trace!(path = %source_file.display(), ?candidates, "charset candidates");

        let normalized = normalize_with_candidates(&bytes, &candidates, |candidate, err| {
            emit_event(
                on_event,
                SyncEvent::UnsupportedCharset {
                    source: source_file.to_path_buf(),
                    charset: candidate.name.clone(),
                    reason: err.to_string(),
                },
            );
        });

        // `content` is the scratch buffer; it lives only inside this match.
        match normalized {
            Normalized::NoCandidates => {
                emit_event(
                    on_event,
                    SyncEvent::EncodingUndetected {
                        source: source_file.to_path_buf(),
                        tried: 0,
                    },
                );
                Ok(FileOutcome::Undetected)
            }
            Normalized::Exhausted { tried } => {
                emit_event(
                    on_event,
                    SyncEvent::EncodingUndetected {
                        source: source_file.to_path_buf(),
                        tried,
                    },
                );
                Ok(FileOutcome::Undetected)
            }
            Normalized::Text { charset, content } => {
                if file_matches(dest_file, &content)? {
                    tracing::trace!(path = %dest_file.display(), %charset, "unchanged");
                    return Ok(FileOutcome::Unchanged);
                }
                if !self.dry_run {
                    write_file_atomic(dest_file, &content)?;
                }
                tracing::debug!(path = %dest_file.display(), %charset, "text updated");
                emit_updated(on_event, dest_file, TransferMode::Text, self.dry_run);
                Ok(FileOutcome::Updated)
            }
        }
    }
}

/// Synchronize with default settings and no event sink
pub fn synchronize(
    source_root: &Path,
    dest_root: &Path,
    rules: SyncRules,
) -> Result<SyncReport, SyncError> {
    Synchronizer::new(rules).synchronize(source_root, dest_root, None)
}

fn ensure_directory(label: &str, path: &Path) -> Result<(), SyncError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SyncError::InvalidArgument(format!(
            "{} dir {} is not a directory!",
            label,
            path.display()
        )))
    }
}

fn emit_updated(on_event: Option<&SyncCallback>, path: &Path, mode: TransferMode, dry_run: bool) {
    emit_event(
        on_event,
        SyncEvent::Updated {
            path: PathBuf::from(path),
            mode,
            dry_run,
        },
    );
}

fn emit_event(on_event: Option<&SyncCallback>, event: SyncEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
