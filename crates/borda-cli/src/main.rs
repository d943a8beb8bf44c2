//! Borda CLI binary entrypoint.
//!
//! This is the main entry point for the `borda` command-line tool.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use borda_cli::cli::{Cli, Commands};
use borda_cli::commands::{EstimateCommand, InitConfigCommand, PlayCommand};
use borda_cli::output::OutputFormat;

/// Log directive used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "borda=info";

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Estimate(args) => {
            EstimateCommand::new()
                .execute(&mut stdout, &format, &args)
                .with_context(|| format!("estimate failed for {}", args.scenario.display()))?;
        }
        Commands::Play(args) => {
            PlayCommand::new()
                .execute(&mut stdout, &format, &args)
                .with_context(|| format!("replay failed for {}", args.scenario.display()))?;
        }
        Commands::InitConfig(args) => {
            InitConfigCommand::new()
                .execute(&mut stdout, &format, &args)
                .context("init-config failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use borda_cli::cli::Format;

    #[test]
    fn cli_parses_estimate() {
        let cli = Cli::parse_from(["borda", "estimate", "--scenario", "s.json"]);
        assert!(matches!(cli.command, Commands::Estimate(_)));
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["borda", "--format", "json", "estimate", "-s", "s.json"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn run_estimate_missing_scenario_fails() {
        let cli = Cli::parse_from(["borda", "estimate", "--scenario", "/nonexistent/s.json"]);
        let err = run(cli).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/s.json"));
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
