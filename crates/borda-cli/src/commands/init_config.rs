//! Init-config command implementation.

use std::io::Write;

use borda_agent::AgentConfig;
use tracing::info;

use crate::cli::InitConfigArgs;
use crate::error::CliError;
use crate::output::{ConfigWritten, OutputFormat};

/// Init-config command executor.
#[derive(Debug, Default)]
pub struct InitConfigCommand;

impl InitConfigCommand {
    /// Create a new init-config command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Write the default agent configuration to `args.output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists without `--force`, or if
    /// rendering or writing fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &InitConfigArgs,
    ) -> Result<(), CliError> {
        if args.output.exists() && !args.force {
            return Err(CliError::InvalidArgument(format!(
                "{} already exists, pass --force to overwrite",
                args.output.display()
            )));
        }

        let rendered = AgentConfig::default().to_toml()?;
        std::fs::write(&args.output, rendered)?;
        info!(path = %args.output.display(), "wrote default agent config");

        format.write(
            writer,
            &ConfigWritten {
                path: args.output.clone(),
            },
        )
    }
}
