//! Protocol actions exchanged between negotiating parties.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bid::Bid;

/// Identity of a negotiating party.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Creates a party identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of action, as listed by the protocol when it asks for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Accept the bid on the table.
    Accept,
    /// Propose a bid.
    Offer,
    /// Walk away from the negotiation.
    EndNegotiation,
}

impl ActionKind {
    /// Every kind the alternating offers protocol can allow.
    pub const ALL: [Self; 3] = [Self::Accept, Self::Offer, Self::EndNegotiation];
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accept => "accept",
            Self::Offer => "offer",
            Self::EndNegotiation => "end_negotiation",
        };
        f.write_str(name)
    }
}

/// A move in the negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "bid", rename_all = "snake_case")]
pub enum Action {
    /// Accept the given bid.
    Accept(Bid),
    /// Propose the given bid.
    Offer(Bid),
    /// Leave without agreement.
    EndNegotiation,
}

impl Action {
    /// Returns the kind of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Accept(_) => ActionKind::Accept,
            Self::Offer(_) => ActionKind::Offer,
            Self::EndNegotiation => ActionKind::EndNegotiation,
        }
    }

    /// Returns the bid carried by this action, if any.
    #[must_use]
    pub const fn bid(&self) -> Option<&Bid> {
        match self {
            Self::Accept(bid) | Self::Offer(bid) => Some(bid),
            Self::EndNegotiation => None,
        }
    }

    /// Returns true if this is an Accept.
    #[must_use]
    pub const fn is_accept(&self) -> bool {
        matches!(self, Self::Accept(_))
    }

    /// Returns true if this is an Offer.
    #[must_use]
    pub const fn is_offer(&self) -> bool {
        matches!(self, Self::Offer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_matches_variant() {
        let bid = Bid::new([(1, "a")]);
        assert_eq!(Action::Accept(bid.clone()).kind(), ActionKind::Accept);
        assert_eq!(Action::Offer(bid).kind(), ActionKind::Offer);
        assert_eq!(Action::EndNegotiation.kind(), ActionKind::EndNegotiation);
    }

    #[test]
    fn action_bid_access() {
        let bid = Bid::new([(1, "a")]);
        assert_eq!(Action::Offer(bid.clone()).bid(), Some(&bid));
        assert!(Action::EndNegotiation.bid().is_none());
        assert!(Action::Offer(bid.clone()).is_offer());
        assert!(Action::Accept(bid).is_accept());
    }

    #[test]
    fn action_serializes_with_tag() {
        let action = Action::Offer(Bid::new([(1, "a")]));
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"offer","bid":{"1":"a"}}"#);

        let end = serde_json::to_string(&Action::EndNegotiation).unwrap();
        assert_eq!(end, r#"{"action":"end_negotiation"}"#);
    }

    #[test]
    fn action_kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&ActionKind::EndNegotiation).unwrap();
        assert_eq!(json, "\"end_negotiation\"");
        assert_eq!(ActionKind::EndNegotiation.to_string(), "end_negotiation");
    }
}
