//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`estimate`] - Utility estimation from a ranking
//! - [`play`] - Replay of scripted counterpart offers
//! - [`init_config`] - Default configuration scaffolding

pub mod estimate;
pub mod init_config;
pub mod play;

pub use estimate::EstimateCommand;
pub use init_config::InitConfigCommand;
pub use play::PlayCommand;

use std::path::Path;

use borda_agent::AgentConfig;

use crate::error::CliError;

/// Loads the agent config from `path`, or the defaults when absent.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AgentConfig, CliError> {
    match path {
        Some(path) => Ok(AgentConfig::from_file(path)?),
        None => Ok(AgentConfig::default()),
    }
}
