//! Additive utility functions over a discrete domain.
//!
//! A [`UtilityFunction`] scores a bid as the weighted sum of per-issue
//! value evaluations:
//!
//! ```text
//! u(bid) = Σ weight(issue) × evaluation(issue, bid[issue])
//! ```
//!
//! Weights sum to 1 and every issue's best value evaluates to 1, so the
//! best bid scores exactly 1 and every bid scores in [0, 1].

use std::collections::BTreeMap;

use borda_core::{Bid, CoreError, Domain, IssueNumber, Value};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tolerance used when checking normalization invariants.
pub const TOLERANCE: f64 = 1e-9;

/// Errors raised while building or querying a utility function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UtilityError {
    /// The bid cannot be scored against this domain.
    #[error("cannot evaluate bid: {0}")]
    Evaluation(#[from] CoreError),

    /// An issue of the domain has no weight.
    #[error("issue {0} has no weight")]
    MissingWeight(IssueNumber),

    /// A weight is negative or not finite.
    #[error("issue {issue} has invalid weight {weight}")]
    InvalidWeight {
        /// Issue carrying the weight.
        issue: IssueNumber,
        /// The rejected weight.
        weight: f64,
    },

    /// Weights do not sum to 1.
    #[error("issue weights sum to {0}, expected 1")]
    WeightSum(f64),

    /// An issue value has no evaluation or one outside [0, 1].
    #[error("issue {issue} value '{value}' has invalid evaluation")]
    InvalidEvaluation {
        /// Issue holding the value.
        issue: IssueNumber,
        /// The value.
        value: Value,
    },

    /// The best value of an issue does not evaluate to 1.
    #[error("issue {issue} maximum evaluation is {max}, expected 1")]
    NotNormalized {
        /// The issue.
        issue: IssueNumber,
        /// Its maximum evaluation.
        max: f64,
    },
}

/// Immutable additive utility function over one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityFunction {
    domain: Domain,
    weights: BTreeMap<IssueNumber, f64>,
    evaluations: BTreeMap<IssueNumber, BTreeMap<Value, f64>>,
    best: Bid,
}

impl UtilityFunction {
    /// Builds a utility function from explicit weights and evaluations.
    ///
    /// # Errors
    ///
    /// Returns an error unless every issue has a non-negative weight, the
    /// weights sum to 1, every value has an evaluation in [0, 1] and each
    /// issue's maximum evaluation is 1.
    pub fn from_parts(
        domain: Domain,
        weights: BTreeMap<IssueNumber, f64>,
        evaluations: BTreeMap<IssueNumber, BTreeMap<Value, f64>>,
    ) -> Result<Self, UtilityError> {
        let mut sum = 0.0;
        for issue in domain.issues() {
            let number = issue.number();
            let weight = *weights
                .get(&number)
                .ok_or(UtilityError::MissingWeight(number))?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(UtilityError::InvalidWeight {
                    issue: number,
                    weight,
                });
            }
            sum += weight;

            let table = evaluations.get(&number);
            let mut max = 0.0_f64;
            for value in issue.values() {
                let eval = table
                    .and_then(|t| t.get(value))
                    .copied()
                    .filter(|e| (0.0..=1.0 + TOLERANCE).contains(e))
                    .ok_or_else(|| UtilityError::InvalidEvaluation {
                        issue: number,
                        value: value.clone(),
                    })?;
                max = max.max(eval);
            }
            if (max - 1.0).abs() > TOLERANCE {
                return Err(UtilityError::NotNormalized { issue: number, max });
            }
        }
        if (sum - 1.0).abs() > TOLERANCE {
            return Err(UtilityError::WeightSum(sum));
        }
        Ok(Self::from_normalized(domain, weights, evaluations))
    }

    /// Builds a utility function whose invariants the caller already holds.
    pub(crate) fn from_normalized(
        domain: Domain,
        weights: BTreeMap<IssueNumber, f64>,
        evaluations: BTreeMap<IssueNumber, BTreeMap<Value, f64>>,
    ) -> Self {
        let best = best_bid(&domain, &evaluations);
        Self {
            domain,
            weights,
            evaluations,
            best,
        }
    }

    /// Returns the domain this function scores.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the weight of `issue`.
    #[must_use]
    pub fn weight(&self, issue: IssueNumber) -> Option<f64> {
        self.weights.get(&issue).copied()
    }

    /// Returns the evaluation of `value` for `issue`.
    #[must_use]
    pub fn evaluation(&self, issue: IssueNumber, value: &Value) -> Option<f64> {
        self.evaluations.get(&issue)?.get(value).copied()
    }

    /// Scores a bid.
    ///
    /// # Errors
    ///
    /// Returns [`UtilityError::Evaluation`] if the bid does not assign a
    /// permitted value to every issue of the domain.
    pub fn utility(&self, bid: &Bid) -> Result<f64, UtilityError> {
        bid.validate(&self.domain)?;
        let total = bid
            .iter()
            .map(|(issue, value)| {
                let weight = self.weight(issue).unwrap_or(0.0);
                let eval = self.evaluation(issue, value).unwrap_or(0.0);
                weight * eval
            })
            .sum();
        Ok(total)
    }

    /// Scores a bid, treating any evaluation failure as utility 0.
    ///
    /// Failures are logged at `warn` level; they are never propagated.
    #[must_use]
    pub fn utility_or_zero(&self, bid: &Bid) -> f64 {
        match self.utility(bid) {
            Ok(utility) => utility,
            Err(e) => {
                warn!(error = %e, "utility lookup failed, scoring bid as 0");
                0.0
            }
        }
    }

    /// The bid with maximum utility.
    ///
    /// Each issue takes its highest-evaluated value; ties go to the value
    /// listed first in the domain catalog.
    #[must_use]
    pub const fn max_utility_bid(&self) -> &Bid {
        &self.best
    }

    /// Utility of [`Self::max_utility_bid`].
    #[must_use]
    pub fn max_utility(&self) -> f64 {
        self.utility_or_zero(&self.best)
    }

    /// Returns a serializable view of weights and evaluations.
    #[must_use]
    pub fn report(&self) -> UtilityReport {
        let issues = self
            .domain
            .issues()
            .iter()
            .map(|issue| IssueReport {
                number: issue.number(),
                name: issue.name().to_string(),
                weight: self.weight(issue.number()).unwrap_or(0.0),
                values: issue
                    .values()
                    .iter()
                    .map(|value| ValueReport {
                        value: value.clone(),
                        evaluation: self.evaluation(issue.number(), value).unwrap_or(0.0),
                    })
                    .collect(),
            })
            .collect();
        UtilityReport {
            domain: self.domain.name().to_string(),
            issues,
            best_bid: self.best.clone(),
        }
    }
}

fn best_bid(domain: &Domain, evaluations: &BTreeMap<IssueNumber, BTreeMap<Value, f64>>) -> Bid {
    let values = domain
        .issues()
        .iter()
        .filter_map(|issue| {
            let table = evaluations.get(&issue.number());
            let mut best: Option<(&Value, f64)> = None;
            for value in issue.values() {
                let eval = table.and_then(|t| t.get(value)).copied().unwrap_or(0.0);
                if best.is_none_or(|(_, top)| eval > top) {
                    best = Some((value, eval));
                }
            }
            best.map(|(value, _)| (issue.number(), value.clone()))
        })
        .collect();
    Bid::from_values(values)
}

/// Serializable snapshot of a [`UtilityFunction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityReport {
    /// Domain name.
    pub domain: String,
    /// Per-issue weights and evaluations, in catalog order.
    pub issues: Vec<IssueReport>,
    /// The maximum-utility bid.
    pub best_bid: Bid,
}

/// Weight and value evaluations of one issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    /// Issue number.
    pub number: IssueNumber,
    /// Issue name.
    pub name: String,
    /// Issue weight.
    pub weight: f64,
    /// Value evaluations in catalog order.
    pub values: Vec<ValueReport>,
}

/// Evaluation of one issue value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueReport {
    /// The value.
    pub value: Value,
    /// Its evaluation in [0, 1].
    pub evaluation: f64,
}
