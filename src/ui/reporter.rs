//! Progress and notice reporting for sync runs

use crate::types::{SyncEvent, SyncReport, TransferMode};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Severity of a console notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A human-readable line derived from a [`SyncEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn info(text: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            text,
        }
    }

    fn warning(text: String) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text,
        }
    }
}

/// Turn a per-file event into a console line
///
/// Progress and lifecycle events (`Started`, `FileStart`, `Complete`) have no
/// line of their own.
pub fn format_notice(event: &SyncEvent) -> Option<Notice> {
    match event {
        SyncEvent::Updated {
            path,
            mode,
            dry_run,
        } => {
            let verb = if *dry_run { "Would update" } else { "Updated" };
            let suffix = match mode {
                TransferMode::Binary => " (binary)",
                TransferMode::Text => "",
            };
            Some(Notice::info(format!("{} {}{}", verb, path.display(), suffix)))
        }
        SyncEvent::MissingSource { source, .. } => Some(Notice::warning(format!(
            "{} no longer exists. Cannot update dest file! Check the reason manually.",
            source.display()
        ))),
        SyncEvent::EncodingUndetected { source, tried } => {
            let detail = if *tried > 0 {
                format!(" ({} charset candidate(s) failed)", tried)
            } else {
                String::new()
            };
            Some(Notice::warning(format!(
                "Could not detect encoding of source file {}{}",
                source.display(),
                detail
            )))
        }
        SyncEvent::UnsupportedCharset {
            source,
            charset,
            reason,
        } => Some(Notice::warning(format!(
            "{} failed for {}: {}",
            charset,
            source.display(),
            reason
        ))),
        SyncEvent::CopyFailed { path, error } => Some(Notice::warning(format!(
            "Could not check or copy source file {}: {}",
            path.display(),
            error
        ))),
        SyncEvent::Started { .. } | SyncEvent::FileStart { .. } | SyncEvent::Complete { .. } => {
            None
        }
    }
}

/// Progress bar plus notice printer for one sync run
pub struct ConsoleReporter {
    bar: ProgressBar,
    warnings: Vec<(&'static str, PathBuf)>,
}

impl ConsoleReporter {
    /// Reporter drawing a progress bar on stderr when it is a terminal
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self::with_bar(bar)
    }

    /// Reporter without a progress bar; notices are still printed
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            warnings: Vec::new(),
        }
    }

    /// Handle one event from the synchronizer
    pub fn handle(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Started { total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
                self.bar.set_message("Starting sync...".to_string());
            }
            SyncEvent::FileStart { index, path, .. } => {
                self.bar.set_position(index.saturating_sub(1) as u64);
                self.bar.set_message(path.display().to_string());
            }
            SyncEvent::Complete { report } => {
                self.bar.set_position(report.files_seen as u64);
                self.bar.finish_and_clear();
            }
            _ => {}
        }

        if event.is_warning() {
            if let Some(path) = warning_path(event) {
                self.warnings.push((event.label(), path));
            }
        }

        if let Some(notice) = format_notice(event) {
            // suspend() prints even when the bar is hidden, unlike println().
            self.bar.suspend(|| match notice.level {
                NoticeLevel::Info => println!("{}", notice.text),
                NoticeLevel::Warning => {
                    eprintln!("{} {}", style("⚠").yellow(), notice.text)
                }
            });
        }
    }

    /// Number of warnings seen so far
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Warnings grouped by kind, at most three paths per group
    pub fn warning_summary(&self) -> Option<String> {
        if self.warnings.is_empty() {
            return None;
        }

        let mut groups: BTreeMap<&'static str, Vec<&PathBuf>> = BTreeMap::new();
        for (kind, path) in &self.warnings {
            groups.entry(*kind).or_default().push(path);
        }

        let mut lines = Vec::new();
        lines.push("Warning summary:".to_string());
        for (kind, paths) in groups {
            lines.push(format!("  {} ({}):", kind, paths.len()));
            for path in paths.iter().take(3) {
                lines.push(format!("    - {}", path.display()));
            }
            if paths.len() > 3 {
                lines.push(format!("    - ... {} more", paths.len() - 3));
            }
        }
        Some(lines.join("\n"))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line run summary
pub fn format_report(report: &SyncReport, dry_run: bool) -> String {
    let updated_label = if dry_run { "to update" } else { "updated" };
    format!(
        "Sync done: {} {}, {} unchanged, {} missing source, {} undetected encoding, {} failed, {} ignored",
        report.updated,
        updated_label,
        report.unchanged,
        report.missing_source,
        report.undetected,
        report.failed,
        report.ignored
    )
}

fn warning_path(event: &SyncEvent) -> Option<PathBuf> {
    match event {
        SyncEvent::MissingSource { dest, .. } => Some(dest.clone()),
        SyncEvent::EncodingUndetected { source, .. } => Some(source.clone()),
        SyncEvent::UnsupportedCharset { source, .. } => Some(source.clone()),
        SyncEvent::CopyFailed { path, .. } => Some(path.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SyncError;

    #[test]
    fn test_updated_notice() {
        let notice = format_notice(&SyncEvent::Updated {
            path: PathBuf::from("/dest/a/b.txt"),
            mode: TransferMode::Text,
            dry_run: false,
        })
        .unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.text, "Updated /dest/a/b.txt");
    }

    #[test]
    fn test_dry_run_binary_notice() {
        let notice = format_notice(&SyncEvent::Updated {
            path: PathBuf::from("logo.png"),
            mode: TransferMode::Binary,
            dry_run: true,
        })
        .unwrap();
        assert_eq!(notice.text, "Would update logo.png (binary)");
    }

    #[test]
    fn test_missing_source_notice_names_source() {
        let notice = format_notice(&SyncEvent::MissingSource {
            dest: PathBuf::from("/dest/gone.txt"),
            source: PathBuf::from("/src/gone.txt"),
        })
        .unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.text.starts_with("/src/gone.txt no longer exists"));
    }

    #[test]
    fn test_undetected_notice_mentions_attempts() {
        let none = format_notice(&SyncEvent::EncodingUndetected {
            source: PathBuf::from("blob"),
            tried: 0,
        })
        .unwrap();
        let some = format_notice(&SyncEvent::EncodingUndetected {
            source: PathBuf::from("blob"),
            tried: 2,
        })
        .unwrap();
        assert!(!none.text.contains("failed"));
        assert!(some.text.contains("2 charset candidate(s) failed"));
    }

    #[test]
    fn test_lifecycle_events_have_no_notice() {
        assert!(format_notice(&SyncEvent::Started { total: 1 }).is_none());
        assert!(format_notice(&SyncEvent::Complete {
            report: SyncReport::default()
        })
        .is_none());
    }

    #[test]
    fn test_reporter_tracks_progress_and_warnings() {
        let mut reporter = ConsoleReporter::hidden();
        reporter.handle(&SyncEvent::Started { total: 5 });
        reporter.handle(&SyncEvent::FileStart {
            index: 3,
            total: 5,
            path: PathBuf::from("c.txt"),
        });
        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.length(), Some(5));

        for name in ["a", "b", "c", "d"] {
            reporter.handle(&SyncEvent::MissingSource {
                dest: PathBuf::from(format!("/dest/{name}.txt")),
                source: PathBuf::from(format!("/src/{name}.txt")),
            });
        }
        reporter.handle(&SyncEvent::CopyFailed {
            path: PathBuf::from("/dest/e.bin"),
            error: SyncError::copy_failed(
                "/dest/e.bin",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
        });

        assert_eq!(reporter.warning_count(), 5);
        let summary = reporter.warning_summary().unwrap();
        assert!(summary.contains("MissingSource (4):"));
        assert!(summary.contains("CopyFailed (1):"));
        assert!(summary.contains("... 1 more"));
    }

    #[test]
    fn test_no_summary_without_warnings() {
        assert!(ConsoleReporter::hidden().warning_summary().is_none());
    }

    #[test]
    fn test_format_report() {
        let report = SyncReport {
            files_seen: 4,
            updated: 2,
            unchanged: 1,
            ignored: 1,
            ..Default::default()
        };
        let line = format_report(&report, false);
        assert!(line.contains("2 updated"));
        assert!(line.contains("1 ignored"));
        assert!(format_report(&report, true).contains("2 to update"));
    }
}
