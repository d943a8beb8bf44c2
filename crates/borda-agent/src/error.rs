//! Error types for borda-agent.

use thiserror::Error;

use crate::config::ConfigError;
use crate::estimator::EstimationError;
use crate::policy::PolicyError;

/// Errors that can occur in agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Utility estimation failed during initialization.
    #[error("initialization failed: {0}")]
    Estimation(#[from] EstimationError),

    /// The policy could not choose an action.
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),
}
