//! Negotiating party: one agent in one session.
//!
//! [`OrdinalAgent`] owns everything a session needs: the estimated
//! [`UtilityFunction`], the [`BiddingPolicy`], the [`SessionState`] and the
//! RNG used for sampling. Nothing is shared between agents, so concurrent
//! sessions in one process never alias state.

use borda_core::{Action, ActionKind, BidRanking, Domain, PartyId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::estimator::UtilityEstimator;
use crate::policy::{BiddingPolicy, Phase, SessionState};
use crate::utility::UtilityFunction;

/// Unique identifier for a negotiation session.
pub type SessionId = Uuid;

/// Hooks a protocol driver calls on a negotiating party.
pub trait NegotiationParty {
    /// Chooses this turn's action given normalized time and the legal kinds.
    fn choose_action(&mut self, time: f64, legal: &[ActionKind]) -> Result<Action, AgentError>;

    /// Observes an action taken by another party.
    fn receive_message(&mut self, sender: &PartyId, action: &Action);

    /// Static human-readable label.
    fn description(&self) -> &str;
}

/// A party that learns its utility from an ordinal ranking.
#[derive(Debug)]
pub struct OrdinalAgent<R = StdRng> {
    id: PartyId,
    session: SessionId,
    config: AgentConfig,
    utility: UtilityFunction,
    policy: BiddingPolicy,
    state: SessionState,
    rng: R,
}

impl OrdinalAgent<StdRng> {
    /// Estimates the utility function and opens a session.
    ///
    /// Uses `config.seed` for the RNG when set.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] for an invalid config and
    /// [`AgentError::Estimation`] if the ranking is empty or does not fit
    /// the domain. No agent exists after a failure.
    pub fn initialize(
        id: PartyId,
        domain: &Domain,
        ranking: &BidRanking,
        config: AgentConfig,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        let utility = UtilityEstimator::new(config.weighting).estimate(domain, ranking)?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(id, utility, config, rng)
    }
}

impl<R: Rng> OrdinalAgent<R> {
    /// Opens a session over an existing utility function and RNG.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] for an invalid config.
    pub fn with_rng(
        id: PartyId,
        utility: UtilityFunction,
        config: AgentConfig,
        rng: R,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        let session = Uuid::new_v4();
        info!(
            party = %id,
            %session,
            domain = utility.domain().name(),
            "negotiation session opened"
        );
        Ok(Self {
            id,
            session,
            policy: BiddingPolicy::from_config(&config),
            config,
            utility,
            state: SessionState::new(),
            rng,
        })
    }

    /// This party's identifier.
    #[must_use]
    pub const fn id(&self) -> &PartyId {
        &self.id
    }

    /// Current session identifier.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session
    }

    /// The estimated utility function.
    #[must_use]
    pub const fn utility_function(&self) -> &UtilityFunction {
        &self.utility
    }

    /// The session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Phase at normalized time `time`.
    #[must_use]
    pub fn phase(&self, time: f64) -> Phase {
        self.policy.phase(time)
    }

    /// Starts a new session, clearing the offer history.
    ///
    /// The utility function is kept; it depends only on the ranking.
    pub fn reset_session(&mut self) {
        self.state.reset();
        self.session = Uuid::new_v4();
        info!(party = %self.id, session = %self.session, "negotiation session reset");
    }
}

impl<R: Rng> NegotiationParty for OrdinalAgent<R> {
    fn choose_action(&mut self, time: f64, legal: &[ActionKind]) -> Result<Action, AgentError> {
        let action = self
            .policy
            .decide(time, legal, &self.utility, &mut self.state, &mut self.rng)?;
        debug!(
            session = %self.session,
            time,
            action = %action.kind(),
            "chose action"
        );
        Ok(action)
    }

    fn receive_message(&mut self, sender: &PartyId, action: &Action) {
        match action {
            Action::Offer(bid) => {
                debug!(session = %self.session, %sender, "received offer");
                self.state.record_received(bid.clone());
            }
            other => {
                debug!(session = %self.session, %sender, action = %other.kind(), "observed action");
            }
        }
    }

    fn description(&self) -> &str {
        &self.config.description
    }
}
