//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;
use std::path::PathBuf;

use borda_agent::{SessionId, UtilityReport};
use borda_core::{Action, Bid};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

impl TableDisplay for UtilityReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Estimated Utility: {}", self.domain)?;
        writeln!(writer, "══════════════════════════════════")?;
        for issue in &self.issues {
            writeln!(
                writer,
                "Issue {} {:<24}  weight {:.4}",
                issue.number,
                truncate(&issue.name, 24),
                issue.weight
            )?;
            for value in &issue.values {
                writeln!(
                    writer,
                    "  {:<28}  {:.4}",
                    truncate(value.value.as_str(), 28),
                    value.evaluation
                )?;
            }
        }
        writeln!(writer)?;
        writeln!(writer, "Best bid: {}", format_bid(&self.best_bid))?;
        Ok(())
    }
}

/// One replayed turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    /// Zero-based turn index.
    pub round: usize,
    /// Normalized time of the turn.
    pub time: f64,
    /// Counterpart offer delivered before the agent acted.
    pub counterpart_offer: Option<Bid>,
    /// The agent's action.
    pub action: Action,
    /// The agent's utility for the bid in its action.
    pub utility: Option<f64>,
}

/// Result of a replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct PlayTranscript {
    /// The agent's description.
    pub agent: String,
    /// Session identifier.
    pub session: SessionId,
    /// Domain name.
    pub domain: String,
    /// Turns in order.
    pub turns: Vec<TurnRecord>,
    /// The accepted bid, if the agent accepted.
    pub agreement: Option<Bid>,
}

impl TableDisplay for PlayTranscript {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{} on {}", self.agent, self.domain)?;
        writeln!(writer, "Session: {}", self.session)?;
        writeln!(writer)?;

        writeln!(
            writer,
            "{:>5}  {:>6}  {:<32}  {:<8}  {:<32}  {:>7}",
            "ROUND", "TIME", "RECEIVED", "ACTION", "BID", "UTILITY"
        )?;
        writeln!(writer, "{}", "─".repeat(100))?;
        for turn in &self.turns {
            let received = turn
                .counterpart_offer
                .as_ref()
                .map_or_else(|| "-".to_string(), format_bid);
            let bid = turn.action.bid().map_or_else(|| "-".to_string(), format_bid);
            let utility = turn
                .utility
                .map_or_else(|| "-".to_string(), |u| format!("{u:.4}"));
            writeln!(
                writer,
                "{:>5}  {:>6.3}  {:<32}  {:<8}  {:<32}  {:>7}",
                turn.round,
                turn.time,
                truncate(&received, 32),
                turn.action.kind().to_string(),
                truncate(&bid, 32),
                utility
            )?;
        }
        writeln!(writer)?;

        match &self.agreement {
            Some(bid) => writeln!(writer, "Agreement: {}", format_bid(bid))?,
            None => writeln!(writer, "No agreement after {} turn(s)", self.turns.len())?,
        }
        Ok(())
    }
}

/// Confirmation that a config file was written.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigWritten {
    /// Where the config was written.
    pub path: PathBuf,
}

impl TableDisplay for ConfigWritten {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Wrote default agent config to {}", self.path.display())?;
        Ok(())
    }
}

/// Formats a bid as `issue=value` pairs.
fn format_bid(bid: &Bid) -> String {
    bid.iter()
        .map(|(issue, value)| format!("{issue}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
