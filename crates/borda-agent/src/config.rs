//! Agent configuration.
//!
//! Configuration for the borda agent, including:
//! - Phase boundary and utility thresholds
//! - Issue weight normalization rule
//! - Sampling bound
//! - Optional RNG seed for reproducible sessions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::estimator::WeightNormalization;
use crate::sampler::{ExhaustionPolicy, SamplingPolicy, DEFAULT_MAX_ATTEMPTS};

/// Default label returned by the agent's description.
pub const DEFAULT_DESCRIPTION: &str = "Borda Ranking Agent";

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The TOML could not be parsed.
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rejection sampling settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Retry until a bid qualifies, with no attempt limit.
    pub unbounded: bool,
    /// Draws allowed per sample when bounded.
    pub max_attempts: u64,
    /// Outcome when the bound is hit.
    pub on_exhaustion: ExhaustionPolicy,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            unbounded: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_exhaustion: ExhaustionPolicy::Fail,
        }
    }
}

impl SamplingConfig {
    /// Returns the sampling policy these settings describe.
    #[must_use]
    pub const fn policy(&self) -> SamplingPolicy {
        if self.unbounded {
            SamplingPolicy::Unbounded
        } else {
            SamplingPolicy::Bounded {
                max_attempts: self.max_attempts,
                on_exhaustion: self.on_exhaustion,
            }
        }
    }
}

/// Main agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Human-readable agent label.
    pub description: String,
    /// Normalized time at which the agent stops insisting on its best bid.
    pub phase_boundary: f64,
    /// An incoming offer must score above this to be accepted.
    pub acceptance_threshold: f64,
    /// Minimum utility of the agent's own late-phase offers.
    pub offer_threshold: f64,
    /// Issue weight rule used by the estimator.
    pub weighting: WeightNormalization,
    /// RNG seed; a fresh entropy seed is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Sampling bound.
    pub sampling: SamplingConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            phase_boundary: 0.5,
            acceptance_threshold: 0.7,
            offer_threshold: 0.7,
            weighting: WeightNormalization::default(),
            seed: None,
            sampling: SamplingConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render this configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold lies outside [0, 1] or the
    /// sampling bound is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("phase_boundary", self.phase_boundary),
            ("acceptance_threshold", self.acceptance_threshold),
            ("offer_threshold", self.offer_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }

        if self.description.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "description cannot be empty".to_string(),
            ));
        }

        if !self.sampling.unbounded && self.sampling.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "sampling.max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    #[test]
    fn default_config_is_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.phase_boundary, 0.5);
        assert_eq!(config.acceptance_threshold, 0.7);
        assert_eq!(config.offer_threshold, 0.7);
        assert_eq!(config.sampling.policy(), SamplingPolicy::default());
    }

    #[test]
    fn from_toml_fills_defaults() {
        let config = AgentConfig::from_toml("seed = 42\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.description, DEFAULT_DESCRIPTION);
        assert_eq!(config.weighting, WeightNormalization::MaxValue);
    }

    #[test]
    fn from_toml_reads_sampling_table() {
        let toml = r#"
weighting = "spread"

[sampling]
max_attempts = 500
on_exhaustion = "best_sample"
"#;
        let config = AgentConfig::from_toml(toml).unwrap();
        assert_eq!(config.weighting, WeightNormalization::Spread);
        assert_eq!(
            config.sampling.policy(),
            SamplingPolicy::Bounded {
                max_attempts: 500,
                on_exhaustion: ExhaustionPolicy::BestSample,
            }
        );
    }

    #[test]
    fn unbounded_sampling_ignores_max_attempts() {
        let config = AgentConfig::from_toml("[sampling]\nunbounded = true\nmax_attempts = 0\n").unwrap();
        assert_eq!(config.sampling.policy(), SamplingPolicy::Unbounded);
    }

    #[test_case("phase_boundary = 1.5" ; "phase boundary above one")]
    #[test_case("acceptance_threshold = -0.1" ; "negative acceptance threshold")]
    #[test_case("offer_threshold = 2.0" ; "offer threshold above one")]
    #[test_case("description = \"  \"" ; "blank description")]
    #[test_case("[sampling]\nmax_attempts = 0" ; "zero attempts")]
    fn from_toml_rejects_invalid(toml: &str) {
        let result = AgentConfig::from_toml(toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "{toml}");
    }

    #[test]
    fn from_toml_rejects_malformed() {
        let result = AgentConfig::from_toml("phase_boundary = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn to_toml_round_trips() {
        let config = AgentConfig {
            seed: Some(9),
            ..AgentConfig::default()
        };
        let rendered = config.to_toml().unwrap();
        assert_eq!(AgentConfig::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "offer_threshold = 0.8").unwrap();
        let config = AgentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.offer_threshold, 0.8);
    }

    #[test]
    fn from_file_missing_path() {
        let result = AgentConfig::from_file("/nonexistent/borda.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
