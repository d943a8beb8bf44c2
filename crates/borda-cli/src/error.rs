//! CLI error types.

use std::path::PathBuf;

use borda_agent::{AgentError, ConfigError};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    ScenarioRead {
        /// Scenario path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Scenario file is not a valid scenario.
    #[error("invalid scenario {path}: {source}")]
    ScenarioParse {
        /// Scenario path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Agent configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The agent failed to initialize or act.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_invalid_argument() {
        let err = CliError::InvalidArgument("rounds must be at least 1".into());
        assert_eq!(err.to_string(), "invalid argument: rounds must be at least 1");
    }

    #[test]
    fn cli_error_display_scenario_read() {
        let err = CliError::ScenarioRead {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read scenario missing.json: file not found"
        );
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn cli_error_from_config_error() {
        let err = CliError::from(ConfigError::Invalid("bad".into()));
        assert_eq!(err.to_string(), "configuration error: invalid config: bad");
    }
}
