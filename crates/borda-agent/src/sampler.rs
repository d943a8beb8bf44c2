//! Rejection sampling of bids that clear a utility threshold.
//!
//! Bids are drawn uniformly from the full agreement space (one independent
//! uniform choice per issue) until one scores at least the threshold. How
//! long to keep drawing is set by [`SamplingPolicy`].

use borda_core::{Bid, Domain};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utility::{UtilityFunction, TOLERANCE};

/// Default number of draws for [`SamplingPolicy::Bounded`].
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// What a bounded sampler does when it runs out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ExhaustionPolicy {
    /// Report [`SamplingError::Exhausted`].
    #[default]
    Fail,
    /// Return the best bid seen, marked as not qualified.
    BestSample,
}

/// How many draws the sampler may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// Draw until a bid qualifies. Only an unreachable threshold stops it.
    Unbounded,
    /// Give up after `max_attempts` draws.
    Bounded {
        /// Maximum number of draws.
        max_attempts: u64,
        /// Outcome when no draw qualifies.
        on_exhaustion: ExhaustionPolicy,
    },
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::Bounded {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_exhaustion: ExhaustionPolicy::Fail,
        }
    }
}

/// Errors from sampling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplingError {
    /// Not even the best bid reaches the threshold.
    #[error("threshold {threshold} is above the maximum utility {max_utility}")]
    Unreachable {
        /// Requested threshold.
        threshold: f64,
        /// Utility of the best bid.
        max_utility: f64,
    },

    /// No draw qualified within the attempt bound.
    #[error("no bid reached utility {threshold} in {attempts} attempts (best {best_utility})")]
    Exhausted {
        /// Draws made.
        attempts: u64,
        /// Requested threshold.
        threshold: f64,
        /// Best utility seen.
        best_utility: f64,
    },
}

/// A sampled bid with its utility.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledBid {
    /// The bid.
    pub bid: Bid,
    /// Its estimated utility.
    pub utility: f64,
    /// Draws it took.
    pub attempts: u64,
    /// False only for a best-of-N fallback below the threshold.
    pub qualified: bool,
}

/// Draws a bid uniformly at random from `domain`.
pub fn random_bid<R: Rng + ?Sized>(domain: &Domain, rng: &mut R) -> Bid {
    // Validated domains have at least one value per issue, so `choose` always hits.
    Bid::new(domain.issues().iter().filter_map(|issue| {
        issue
            .values()
            .choose(&mut *rng)
            .map(|value| (issue.number().get(), value.clone()))
    }))
}

/// Rejection sampler over a utility function's domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BidSampler {
    policy: SamplingPolicy,
}

impl BidSampler {
    /// Creates a sampler with the given policy.
    #[must_use]
    pub const fn new(policy: SamplingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the sampling policy.
    #[must_use]
    pub const fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// Samples a bid with utility of at least `threshold`, less [`TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::Unreachable`] when the maximum utility is
    /// below `threshold`, and [`SamplingError::Exhausted`] when a bounded
    /// policy with [`ExhaustionPolicy::Fail`] runs out of attempts.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        utility: &UtilityFunction,
        threshold: f64,
        rng: &mut R,
    ) -> Result<SampledBid, SamplingError> {
        // Estimated weights may sum to 1 only within TOLERANCE.
        let floor = threshold - TOLERANCE;
        let max_utility = utility.max_utility();
        if max_utility < floor {
            return Err(SamplingError::Unreachable {
                threshold,
                max_utility,
            });
        }

        let limit = match self.policy {
            SamplingPolicy::Unbounded => None,
            SamplingPolicy::Bounded { max_attempts, .. } => Some(max_attempts),
        };

        let mut attempts = 0u64;
        let mut best: Option<(Bid, f64)> = None;
        while limit.is_none_or(|max| attempts < max) {
            attempts += 1;
            let bid = random_bid(utility.domain(), rng);
            let score = utility.utility_or_zero(&bid);
            if score >= floor {
                debug!(attempts, utility = score, threshold, "sampled qualifying bid");
                return Ok(SampledBid {
                    bid,
                    utility: score,
                    attempts,
                    qualified: true,
                });
            }
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((bid, score));
            }
        }

        let best_utility = best.as_ref().map_or(0.0, |(_, u)| *u);
        match (self.policy, best) {
            (
                SamplingPolicy::Bounded {
                    on_exhaustion: ExhaustionPolicy::BestSample,
                    ..
                },
                Some((bid, score)),
            ) => {
                warn!(
                    attempts,
                    utility = score,
                    threshold,
                    "sampling exhausted, falling back to best sample"
                );
                Ok(SampledBid {
                    bid,
                    utility: score,
                    attempts,
                    qualified: false,
                })
            }
            _ => {
                warn!(attempts, threshold, best_utility, "sampling exhausted");
                Err(SamplingError::Exhausted {
                    attempts,
                    threshold,
                    best_utility,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::tests::graded;
    use borda_core::{IssueNumber, Value};
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn random_bid_is_valid() {
        let u = graded(&[("a", 1.0), ("b", 0.5), ("c", 0.0)]);
        let mut rng = rng();
        for _ in 0..50 {
            let bid = random_bid(u.domain(), &mut rng);
            assert!(bid.validate(u.domain()).is_ok());
        }
    }

    #[test]
    fn random_bid_covers_every_value() {
        let u = graded(&[("a", 1.0), ("b", 0.5), ("c", 0.0)]);
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_bid(u.domain(), &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn sample_meets_threshold() {
        let u = graded(&[("a", 1.0), ("b", 0.8), ("c", 0.3), ("d", 0.0)]);
        let sampled = BidSampler::default().sample(&u, 0.7, &mut rng()).unwrap();
        assert!(sampled.qualified);
        assert!(sampled.utility >= 0.7);
        assert!(sampled.attempts >= 1);
    }

    #[test]
    fn sample_unbounded_meets_threshold() {
        let u = graded(&[("a", 1.0), ("b", 0.2)]);
        let sampled = BidSampler::new(SamplingPolicy::Unbounded)
            .sample(&u, 0.9, &mut rng())
            .unwrap();
        assert_eq!(sampled.bid, borda_core::Bid::new([(1, "a")]));
    }

    #[test]
    fn sample_rejects_unreachable_threshold() {
        let u = graded(&[("a", 1.0), ("b", 0.2)]);
        let result = BidSampler::new(SamplingPolicy::Unbounded).sample(&u, 1.5, &mut rng());
        assert!(matches!(result, Err(SamplingError::Unreachable { .. })));
    }

    #[test]
    fn sample_tolerates_weights_just_below_one() {
        let domain = Domain::new("near", vec![borda_core::Issue::new(1, "grade", ["a", "b"])]).unwrap();
        let weights = BTreeMap::from([(IssueNumber::new(1), 1.0 - 1e-12)]);
        let evaluations = BTreeMap::from([(
            IssueNumber::new(1),
            BTreeMap::from([(Value::new("a"), 1.0), (Value::new("b"), 0.5)]),
        )]);
        let u = UtilityFunction::from_parts(domain, weights, evaluations).unwrap();
        assert!(u.max_utility() < 1.0);

        let sampled = BidSampler::new(SamplingPolicy::Unbounded)
            .sample(&u, 1.0, &mut rng())
            .unwrap();
        assert!(sampled.qualified);
        assert_eq!(sampled.bid, borda_core::Bid::new([(1, "a")]));
    }

    #[test]
    fn sample_bounded_exhaustion_fails() {
        let u = graded(&[("a", 1.0), ("b", 0.2)]);

        let sampler = BidSampler::new(SamplingPolicy::Bounded {
            max_attempts: 0,
            on_exhaustion: ExhaustionPolicy::Fail,
        });
        let result = sampler.sample(&u, 0.9, &mut rng());
        assert_eq!(
            result,
            Err(SamplingError::Exhausted {
                attempts: 0,
                threshold: 0.9,
                best_utility: 0.0
            })
        );
    }

    #[test]
    fn sample_bounded_best_sample_fallback() {
        let mut grades: Vec<(String, f64)> = (0..999).map(|i| (format!("v{i}"), 0.1)).collect();
        grades.push(("top".to_string(), 1.0));
        let refs: Vec<(&str, f64)> = grades.iter().map(|(v, e)| (v.as_str(), *e)).collect();
        let u = graded(&refs);

        let sampler = BidSampler::new(SamplingPolicy::Bounded {
            max_attempts: 1,
            on_exhaustion: ExhaustionPolicy::BestSample,
        });
        let sampled = sampler.sample(&u, 0.9, &mut StdRng::seed_from_u64(1));
        // One draw either hits "top" (qualified) or falls back to the 0.1 sample.
        let sampled = sampled.unwrap();
        assert_eq!(sampled.attempts, 1);
        assert_eq!(sampled.qualified, sampled.utility >= 0.9);
    }

    #[test]
    fn sample_is_reproducible_with_seed() {
        let u = graded(&[("a", 1.0), ("b", 0.9), ("c", 0.8), ("d", 0.0)]);
        let first = BidSampler::default().sample(&u, 0.7, &mut rng()).unwrap();
        let second = BidSampler::default().sample(&u, 0.7, &mut rng()).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn sampled_bids_clear_threshold(seed in any::<u64>(), threshold in 0.0f64..=1.0) {
            let u = graded(&[("a", 1.0), ("b", 0.75), ("c", 0.5), ("d", 0.25), ("e", 0.0)]);
            let mut rng = StdRng::seed_from_u64(seed);
            let sampled = BidSampler::default().sample(&u, threshold, &mut rng).unwrap();
            prop_assert!(sampled.qualified);
            prop_assert!(sampled.utility >= threshold - TOLERANCE);
            prop_assert!(u.utility(&sampled.bid).unwrap() >= threshold - TOLERANCE);
        }
    }
}
