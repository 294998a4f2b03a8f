use anyhow::Context;
use clap::Parser;
use srcsync::config::Cli;
use srcsync::Config;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = srcsync::logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to sync: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: Cli) -> anyhow::Result<()> {
    if cli.needs_prompt() {
        let stdin = io::stdin();
        cli.prompt_missing(&mut stdin.lock(), &mut io::stdout())
            .context("Failed to read answers from standard input")?;
    }

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;
    tracing::debug!(?config, "configuration validated");

    srcsync::commands::sync::run(config)?;
    Ok(())
}
