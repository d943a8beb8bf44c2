//! # borda-agent
//!
//! A negotiating party that only knows an ordinal ranking of example bids.
//!
//! This crate provides:
//!
//! - **Utility estimation** - [`UtilityEstimator`] turns a [`BidRanking`](borda_core::BidRanking)
//!   into an additive [`UtilityFunction`] with Borda-style rank weighting
//! - **Bidding policy** - [`BiddingPolicy`] offers the best bid early, then
//!   accepts or offers sampled bids above a utility floor
//! - **Sampling** - [`BidSampler`] draws random bids that clear a threshold
//! - **Sessions** - [`OrdinalAgent`] ties it together behind [`NegotiationParty`]
//!
//! ## Example
//!
//! ```rust
//! use borda_agent::{AgentConfig, NegotiationParty, OrdinalAgent};
//! use borda_core::{Action, ActionKind, Bid, BidRanking, Domain, Issue, PartyId};
//!
//! let domain = Domain::new(
//!     "party",
//!     vec![
//!         Issue::new(1, "food", ["chips", "cake"]),
//!         Issue::new(2, "music", ["band", "dj"]),
//!     ],
//! )
//! .unwrap();
//! let ranking = BidRanking::new(vec![
//!     Bid::new([(1, "chips"), (2, "band")]),
//!     Bid::new([(1, "cake"), (2, "band")]),
//!     Bid::new([(1, "cake"), (2, "dj")]),
//! ])
//! .unwrap();
//!
//! let config = AgentConfig { seed: Some(1), ..AgentConfig::default() };
//! let mut agent = OrdinalAgent::initialize(PartyId::new("me"), &domain, &ranking, config).unwrap();
//!
//! // Early in the session the agent insists on its best bid.
//! let action = agent.choose_action(0.1, &ActionKind::ALL).unwrap();
//! assert_eq!(action, Action::Offer(Bid::new([(1, "cake"), (2, "dj")])));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod estimator;
pub mod party;
pub mod policy;
pub mod sampler;
pub mod utility;

pub use error::AgentError;

// Re-exports for convenience
pub use config::{AgentConfig, ConfigError, SamplingConfig};
pub use estimator::{EstimationError, UtilityEstimator, WeightNormalization};
pub use party::{NegotiationParty, OrdinalAgent, SessionId};
pub use policy::{BiddingPolicy, Phase, PolicyError, SessionState};
pub use sampler::{random_bid, BidSampler, ExhaustionPolicy, SampledBid, SamplingError, SamplingPolicy};
pub use utility::{IssueReport, UtilityError, UtilityFunction, UtilityReport, ValueReport};
