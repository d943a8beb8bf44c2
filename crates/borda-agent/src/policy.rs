//! Time-driven bidding policy.
//!
//! The policy has two phases keyed on normalized time:
//! - [`Phase::Early`] - always offer the maximum-utility bid
//! - [`Phase::Late`] - accept a good enough incoming offer, otherwise offer
//!   a random bid above the offer threshold
//!
//! The phase is recomputed from the clock on every turn.

use borda_core::{Action, ActionKind, Bid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AgentConfig;
use crate::sampler::{BidSampler, SamplingError};
use crate::utility::UtilityFunction;

/// Errors that stop the policy from producing an action.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// Normalized time outside [0, 1].
    #[error("normalized time must be between 0.0 and 1.0, got {0}")]
    InvalidTime(f64),

    /// The protocol does not currently allow an action the policy relies on.
    #[error("protocol does not allow {0} actions")]
    ActionNotAllowed(ActionKind),

    /// No offer could be sampled.
    #[error("sampling failed: {0}")]
    Sampling(#[from] SamplingError),
}

/// Negotiation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the phase boundary.
    Early,
    /// At or after the phase boundary.
    Late,
}

impl Phase {
    /// Phase at normalized time `time` for the given boundary.
    #[must_use]
    pub fn at(time: f64, boundary: f64) -> Self {
        if time < boundary {
            Self::Early
        } else {
            Self::Late
        }
    }
}

/// Per-session record of the last bids exchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    last_received_offer: Option<Bid>,
    my_last_offer: Option<Bid>,
}

impl SessionState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_received_offer: None,
            my_last_offer: None,
        }
    }

    /// Most recent bid offered by the counterpart.
    #[must_use]
    pub const fn last_received_offer(&self) -> Option<&Bid> {
        self.last_received_offer.as_ref()
    }

    /// Most recent bid this policy offered in the late phase.
    #[must_use]
    pub const fn my_last_offer(&self) -> Option<&Bid> {
        self.my_last_offer.as_ref()
    }

    /// Records a counterpart offer, replacing the previous one.
    pub fn record_received(&mut self, bid: Bid) {
        self.last_received_offer = Some(bid);
    }

    /// Records an offer made by this policy.
    pub fn record_own_offer(&mut self, bid: Bid) {
        self.my_last_offer = Some(bid);
    }

    /// Clears both records for a new session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// The two-phase bidding policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiddingPolicy {
    phase_boundary: f64,
    acceptance_threshold: f64,
    offer_threshold: f64,
    sampler: BidSampler,
}

impl Default for BiddingPolicy {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

impl BiddingPolicy {
    /// Creates a policy from agent configuration.
    #[must_use]
    pub const fn from_config(config: &AgentConfig) -> Self {
        Self {
            phase_boundary: config.phase_boundary,
            acceptance_threshold: config.acceptance_threshold,
            offer_threshold: config.offer_threshold,
            sampler: BidSampler::new(config.sampling.policy()),
        }
    }

    /// Phase for normalized time `time`.
    #[must_use]
    pub fn phase(&self, time: f64) -> Phase {
        Phase::at(time, self.phase_boundary)
    }

    /// Returns the incoming offer to accept, if the acceptance rule holds.
    ///
    /// Both a received offer and an own offer must exist, and the received
    /// one must beat the own offer and the acceptance threshold. Lookup
    /// failures score as 0.
    #[must_use]
    pub fn acceptable_offer<'s>(
        &self,
        utility: &UtilityFunction,
        state: &'s SessionState,
    ) -> Option<&'s Bid> {
        let received = state.last_received_offer()?;
        let mine = state.my_last_offer()?;
        let received_utility = utility.utility_or_zero(received);
        let my_utility = utility.utility_or_zero(mine);
        (received_utility > my_utility && received_utility > self.acceptance_threshold)
            .then_some(received)
    }

    /// Chooses the action for this turn.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidTime`] for a time outside [0, 1],
    /// [`PolicyError::ActionNotAllowed`] if `legal` lacks Accept or Offer,
    /// and [`PolicyError::Sampling`] if no late-phase offer can be sampled.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        time: f64,
        legal: &[ActionKind],
        utility: &UtilityFunction,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<Action, PolicyError> {
        if !(0.0..=1.0).contains(&time) {
            return Err(PolicyError::InvalidTime(time));
        }
        for required in [ActionKind::Accept, ActionKind::Offer] {
            if !legal.contains(&required) {
                return Err(PolicyError::ActionNotAllowed(required));
            }
        }

        match self.phase(time) {
            Phase::Early => {
                let best = utility.max_utility_bid().clone();
                debug!(time, "early phase, offering maximum-utility bid");
                Ok(Action::Offer(best))
            }
            Phase::Late => {
                if let Some(received) = self.acceptable_offer(utility, state) {
                    debug!(time, "late phase, accepting received offer");
                    return Ok(Action::Accept(received.clone()));
                }
                let sampled = self.sampler.sample(utility, self.offer_threshold, rng)?;
                debug!(
                    time,
                    utility = sampled.utility,
                    attempts = sampled.attempts,
                    "late phase, offering sampled bid"
                );
                state.record_own_offer(sampled.bid.clone());
                Ok(Action::Offer(sampled.bid))
            }
        }
    }
}
