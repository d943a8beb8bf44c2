//! Estimate command implementation.
//!
//! Learns a utility function from the scenario's ranking and prints the
//! issue weights and value evaluations.

use std::io::Write;

use borda_agent::{AgentError, UtilityEstimator, UtilityReport};
use tracing::debug;

use super::load_config;
use crate::cli::EstimateArgs;
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::scenario::Scenario;

/// Estimate command executor.
#[derive(Debug, Default)]
pub struct EstimateCommand;

impl EstimateCommand {
    /// Create a new estimate command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the estimate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario or config cannot be loaded, the
    /// ranking does not fit the domain, or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &EstimateArgs,
    ) -> Result<(), CliError> {
        let report = self.report(args)?;
        format.write(writer, &report)?;
        Ok(())
    }

    /// Build the utility report for a scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or estimation fails.
    pub fn report(&self, args: &EstimateArgs) -> Result<UtilityReport, CliError> {
        let scenario = Scenario::from_file(&args.scenario)?;
        let config = load_config(args.config.as_deref())?;
        debug!(scenario = %args.scenario.display(), rule = ?config.weighting, "estimating");

        let utility = UtilityEstimator::new(config.weighting)
            .estimate(&scenario.domain, &scenario.ranking)
            .map_err(AgentError::from)?;
        Ok(utility.report())
    }
}
