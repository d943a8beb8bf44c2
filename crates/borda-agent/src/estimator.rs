//! Utility estimation from an ordinal bid ranking.
//!
//! The estimator turns "bid A is preferred to bid B" information into a
//! cardinal [`UtilityFunction`] using rank-weighted co-occurrence scores:
//!
//! 1. Every issue value starts at 0 (a uniform prior).
//! 2. The ranking is walked from least to most preferred. The bid at rank
//!    `k` adds `k` points to each value it picks, so values that show up in
//!    preferred bids collect more points (a Borda count).
//! 3. Each issue's scores are divided by that issue's maximum score, and
//!    issue weights are derived by a [`WeightNormalization`] rule.

use std::collections::BTreeMap;

use borda_core::{BidRanking, CoreError, Domain, IssueNumber, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utility::UtilityFunction;

/// Errors that abort utility estimation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    /// The ranking holds no bids to learn from.
    #[error("insufficient data: ranking is empty")]
    InsufficientData,

    /// A ranked bid does not fit the domain catalog.
    #[error("invalid agreement at rank {rank}: {source}")]
    InvalidAgreement {
        /// Zero-based rank of the offending bid.
        rank: usize,
        /// What is wrong with it.
        source: CoreError,
    },
}

/// Rule deriving issue weights from accumulated value scores.
///
/// Every rule is deterministic. When the raw quantity is 0 for every issue
/// (for instance a single-bid ranking) all rules fall back to equal weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum WeightNormalization {
    /// Weight proportional to the issue's highest raw score.
    #[default]
    MaxValue,
    /// Weight proportional to the gap between the issue's highest and lowest raw score.
    Spread,
    /// Every issue weighs `1 / n`.
    Uniform,
}

impl WeightNormalization {
    /// Raw, unnormalized weight of an issue with the given scores.
    fn raw_weight(self, scores: &BTreeMap<Value, f64>) -> f64 {
        let max = scores.values().copied().fold(0.0_f64, f64::max);
        let min = scores.values().copied().fold(max, f64::min);
        match self {
            Self::MaxValue => max,
            Self::Spread => max - min,
            Self::Uniform => 1.0,
        }
    }
}

/// Builds a [`UtilityFunction`] from a [`BidRanking`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtilityEstimator {
    normalization: WeightNormalization,
}

impl UtilityEstimator {
    /// Creates an estimator using the given weight rule.
    #[must_use]
    pub const fn new(normalization: WeightNormalization) -> Self {
        Self { normalization }
    }

    /// Returns the weight rule in use.
    #[must_use]
    pub const fn normalization(&self) -> WeightNormalization {
        self.normalization
    }

    /// Estimates a utility function for `domain` from `ranking`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::InsufficientData`] for an empty ranking and
    /// [`EstimationError::InvalidAgreement`] if any ranked bid does not
    /// assign a permitted value to every issue.
    pub fn estimate(
        &self,
        domain: &Domain,
        ranking: &BidRanking,
    ) -> Result<UtilityFunction, EstimationError> {
        if ranking.is_empty() {
            return Err(EstimationError::InsufficientData);
        }
        for (rank, bid) in ranking.iter().enumerate() {
            bid.validate(domain)
                .map_err(|source| EstimationError::InvalidAgreement { rank, source })?;
        }

        let scores = accumulate(domain, ranking);
        let (weights, evaluations) = self.normalize(domain, scores);

        for issue in domain.issues() {
            debug!(
                issue = issue.name(),
                number = %issue.number(),
                weight = weights.get(&issue.number()).copied().unwrap_or(0.0),
                "estimated issue weight"
            );
        }
        info!(
            domain = domain.name(),
            bids = ranking.len(),
            rule = ?self.normalization,
            "estimated utility function from ranking"
        );

        Ok(UtilityFunction::from_normalized(
            domain.clone(),
            weights,
            evaluations,
        ))
    }

    fn normalize(
        &self,
        domain: &Domain,
        scores: BTreeMap<IssueNumber, BTreeMap<Value, f64>>,
    ) -> (
        BTreeMap<IssueNumber, f64>,
        BTreeMap<IssueNumber, BTreeMap<Value, f64>>,
    ) {
        let raw: BTreeMap<IssueNumber, f64> = scores
            .iter()
            .map(|(issue, values)| (*issue, self.normalization.raw_weight(values)))
            .collect();
        let total: f64 = raw.values().sum();
        let weights = if total > 0.0 && total.is_finite() {
            raw.into_iter().map(|(issue, w)| (issue, w / total)).collect()
        } else {
            let equal = 1.0 / domain.issue_count() as f64;
            raw.into_keys().map(|issue| (issue, equal)).collect()
        };

        let evaluations = scores
            .into_iter()
            .map(|(issue, values)| {
                let max = values.values().copied().fold(0.0_f64, f64::max);
                let scaled = values
                    .into_iter()
                    .map(|(value, score)| {
                        // An issue nobody scored is one the ranking is indifferent about.
                        let eval = if max > 0.0 { score / max } else { 1.0 };
                        (value, eval)
                    })
                    .collect();
                (issue, scaled)
            })
            .collect();

        (weights, evaluations)
    }
}

/// Borda-style score accumulation over a validated ranking.
fn accumulate(domain: &Domain, ranking: &BidRanking) -> BTreeMap<IssueNumber, BTreeMap<Value, f64>> {
    let mut scores: BTreeMap<IssueNumber, BTreeMap<Value, f64>> = domain
        .issues()
        .iter()
        .map(|issue| {
            let prior = issue.values().iter().map(|v| (v.clone(), 0.0)).collect();
            (issue.number(), prior)
        })
        .collect();

    let mut points = 0.0;
    for bid in ranking {
        for (issue, value) in bid.iter() {
            if let Some(score) = scores.get_mut(&issue).and_then(|s| s.get_mut(value)) {
                *score += points;
            }
        }
        points += 1.0;
    }
    scores
}
