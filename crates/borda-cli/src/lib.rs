//! # borda-cli
//!
//! Command-line harness for the borda negotiation agent.
//!
//! Provides commands for:
//! - Estimating a utility function from a ranked scenario
//! - Replaying scripted counterpart offers against the agent
//! - Writing a default agent configuration
//!
//! The harness drives the agent through its [`NegotiationParty`](borda_agent::NegotiationParty)
//! hooks the same way a negotiation protocol would, one turn at a time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod scenario;

pub use cli::{Cli, Commands, EstimateArgs, Format, InitConfigArgs, PlayArgs};
pub use error::CliError;
pub use output::OutputFormat;
pub use scenario::Scenario;
