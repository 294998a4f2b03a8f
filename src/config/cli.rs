//! Command-line arguments

use super::{Config, SyncRules, DEFAULT_SCOUT_DAYS};
use crate::types::SyncError;
use clap::{ArgAction, Parser};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Overwrite destination files with their source counterparts, normalizing
/// text to UTF-8 with LF line endings.
#[derive(Debug, Clone, Parser)]
#[command(name = "srcsync", version, about, long_about = None)]
pub struct Cli {
    /// Source directory (prompted for when omitted)
    #[arg(value_name = "SOURCE_DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory (prompted for when omitted)
    #[arg(value_name = "DEST_DIR")]
    pub destination: Option<PathBuf>,

    /// After syncing, list recent source files that may belong in the destination
    #[arg(short = 'n', long = "scout")]
    pub scout: bool,

    /// Age threshold in days for --scout
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_SCOUT_DAYS)]
    pub scout_days: u32,

    /// Additional file name to ignore (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Additional binary file suffix, e.g. `.woff` (repeatable)
    #[arg(long = "binary-ext", value_name = "EXT")]
    pub binary_ext: Vec<String>,

    /// TOML file replacing the default ignore/binary sets
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Show what would be updated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// True when either directory still has to be asked for
    pub fn needs_prompt(&self) -> bool {
        self.source.is_none() || self.destination.is_none()
    }

    /// Ask for missing directories (and the scout flag) line by line
    pub fn prompt_missing<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<()> {
        if self.source.is_none() {
            writeln!(output, "Please specify source dir")?;
            self.source = Some(PathBuf::from(read_answer(input)?));
        }
        if self.destination.is_none() {
            writeln!(output, "Please specify dest dir")?;
            self.destination = Some(PathBuf::from(read_answer(input)?));
        }
        if !self.scout {
            writeln!(output, "Would you like to check for new files? Type (y/n)")?;
            self.scout = read_answer(input)?.eq_ignore_ascii_case("y");
        }
        output.flush()
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let source = cli.source.ok_or_else(|| {
            SyncError::InvalidArgument("Missing source directory".to_string())
        })?;
        let destination = cli.destination.ok_or_else(|| {
            SyncError::InvalidArgument("Missing destination directory".to_string())
        })?;

        let mut rules = match &cli.rules {
            Some(path) => SyncRules::load(path)?,
            None => SyncRules::default(),
        };
        for name in cli.ignore {
            rules = rules.with_ignore(name);
        }
        for extension in cli.binary_ext {
            rules = rules.with_binary_extension(extension);
        }

        let config = Config {
            source,
            destination,
            rules,
            scout: cli.scout,
            scout_days: cli.scout_days,
            dry_run: cli.dry_run,
        };
        config.validate()?;
        Ok(config)
    }
}
