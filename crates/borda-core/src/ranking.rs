//! Ordinal preference rankings over example bids.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::CoreError;

/// Bids ordered strictly from least to most preferred.
///
/// Ties cannot be expressed and duplicates are rejected. The ranking says
/// nothing about how much more one bid is preferred over another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bid>", into = "Vec<Bid>")]
pub struct BidRanking {
    bids: Vec<Bid>,
}

impl BidRanking {
    /// Creates a ranking from bids listed least preferred first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateBid`] if a bid appears twice.
    pub fn new(bids: Vec<Bid>) -> Result<Self, CoreError> {
        let mut seen: HashMap<&Bid, usize> = HashMap::with_capacity(bids.len());
        for (rank, bid) in bids.iter().enumerate() {
            if let Some(&first) = seen.get(bid) {
                return Err(CoreError::DuplicateBid {
                    first,
                    second: rank,
                });
            }
            seen.insert(bid, rank);
        }
        Ok(Self { bids })
    }

    /// Returns the bids, least preferred first.
    #[must_use]
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// Iterates least preferred first.
    pub fn iter(&self) -> std::slice::Iter<'_, Bid> {
        self.bids.iter()
    }

    /// Returns the number of ranked bids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    /// Returns true if the ranking holds no bids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Most preferred bid.
    #[must_use]
    pub fn best(&self) -> Option<&Bid> {
        self.bids.last()
    }

    /// Least preferred bid.
    #[must_use]
    pub fn worst(&self) -> Option<&Bid> {
        self.bids.first()
    }

    /// Zero-based rank of `bid` (0 = least preferred).
    #[must_use]
    pub fn position(&self, bid: &Bid) -> Option<usize> {
        self.bids.iter().position(|ranked| ranked == bid)
    }
}

impl TryFrom<Vec<Bid>> for BidRanking {
    type Error = CoreError;

    fn try_from(bids: Vec<Bid>) -> Result<Self, Self::Error> {
        Self::new(bids)
    }
}

impl From<BidRanking> for Vec<Bid> {
    fn from(ranking: BidRanking) -> Self {
        ranking.bids
    }
}

impl<'a> IntoIterator for &'a BidRanking {
    type Item = &'a Bid;
    type IntoIter = std::slice::Iter<'a, Bid>;

    fn into_iter(self) -> Self::IntoIter {
        self.bids.iter()
    }
}
