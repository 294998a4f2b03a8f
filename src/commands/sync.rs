//! Main sync command

use crate::executor::Synchronizer;
use crate::scout::NewFileScout;
use crate::types::{SyncError, SyncEvent, SyncReport};
use crate::ui::{format_report, ConsoleReporter};
use crate::Config;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// What a run produced, for callers that want more than console output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Synchronizer counters
    pub report: SyncReport,

    /// Scout candidates, when the scout was requested
    pub scout_candidates: Option<Vec<PathBuf>>,
}

/// Run the sync operation, then the scout if requested
///
/// Only fatal errors (unusable roots) are returned; per-file problems are
/// printed and counted in the report.
pub fn run(config: Config) -> Result<RunSummary, SyncError> {
    config.validate()?;

    println!(
        "Syncing sources from {} to {}",
        config.source.display(),
        config.destination.display()
    );
    if config.dry_run {
        println!("Dry-run mode: no files will be written.");
    }

    let reporter = Arc::new(Mutex::new(ConsoleReporter::new()));
    let progress_cb = {
        let reporter = Arc::clone(&reporter);
        move |event: &SyncEvent| {
            if let Ok(mut progress) = reporter.lock() {
                progress.handle(event);
            }
        }
    };

    let report = Synchronizer::from_config(&config).synchronize(
        &config.source,
        &config.destination,
        Some(&progress_cb),
    )?;

    println!("{}", format_report(&report, config.dry_run));
    if let Ok(progress) = reporter.lock() {
        if let Some(summary) = progress.warning_summary() {
            println!("{}", summary);
        }
    }

    let scout_candidates = if config.scout {
        println!();
        println!("Src-Sync done. Now checking for potentially new and relevant files.");
        let found: Vec<PathBuf> =
            NewFileScout::new(&config.source, &config.destination, config.scout_days)
                .with_rules(config.rules.clone())
                .candidates()?
                .collect();
        println!("{}", format_scout_result(&found));
        Some(found)
    } else {
        None
    };

    Ok(RunSummary {
        report,
        scout_candidates,
    })
}

fn format_scout_result(found: &[PathBuf]) -> String {
    let mut lines = Vec::with_capacity(found.len() + 1);
    lines.push(format!("Found {} potentially new files.", found.len()));
    lines.extend(found.iter().map(|path| path.display().to_string()));
    lines.join("\n")
}
