//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default number of turns replayed by `borda play`.
pub const DEFAULT_ROUNDS: usize = 20;

/// Borda - a negotiating agent that learns from a ranking of bids.
#[derive(Parser, Debug, Clone)]
#[command(name = "borda")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, global = true, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate a utility function from a scenario's ranking.
    Estimate(EstimateArgs),

    /// Replay a scenario's counterpart offers against the agent.
    Play(PlayArgs),

    /// Write the default agent configuration.
    InitConfig(InitConfigArgs),
}

/// Arguments for the estimate command.
#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Scenario file (JSON with domain, ranking and counterpart offers).
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Agent configuration file (TOML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the play command.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Scenario file (JSON with domain, ranking and counterpart offers).
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Agent configuration file (TOML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of turns, spread evenly over normalized time [0, 1].
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,
}

/// Arguments for the init-config command.
#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    /// Where to write the configuration.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}
