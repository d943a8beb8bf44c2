//! Scenario files.
//!
//! A scenario bundles everything the harness needs for one run:
//!
//! ```json
//! {
//!   "domain": { "name": "party", "issues": [{ "number": 1, "name": "food", "values": ["chips", "cake"] }] },
//!   "ranking": [{ "1": "chips" }, { "1": "cake" }],
//!   "counterpart_offers": [{ "1": "chips" }]
//! }
//! ```
//!
//! The ranking runs from least to most preferred.

use std::path::Path;

use borda_core::{Bid, BidRanking, Domain};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// One negotiation scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// The negotiation domain.
    pub domain: Domain,
    /// This agent's ordinal ranking of example bids.
    pub ranking: BidRanking,
    /// Scripted offers from the other side, in turn order.
    #[serde(default)]
    pub counterpart_offers: Vec<Bid>,
}

impl Scenario {
    /// Loads a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CliError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
