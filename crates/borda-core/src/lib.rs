//! # borda-core
//!
//! Negotiation primitives shared by the borda agent and its host harness.
//!
//! This crate provides:
//!
//! - [`Domain`] - Validated catalog of discrete [`Issue`]s and their [`Value`]s
//! - [`Bid`] - One value chosen for every issue, with structural equality
//! - [`BidRanking`] - Example bids ordered from least to most preferred
//! - [`Action`] - Accept, Offer or `EndNegotiation` moves between parties
//!
//! ## Example
//!
//! ```rust
//! use borda_core::{Bid, BidRanking, Domain, Issue};
//!
//! let domain = Domain::new(
//!     "party",
//!     vec![
//!         Issue::new(1, "food", ["chips", "cake"]),
//!         Issue::new(2, "music", ["band", "dj"]),
//!     ],
//! )
//! .unwrap();
//!
//! let best = Bid::new([(1, "cake"), (2, "dj")]);
//! assert!(best.validate(&domain).is_ok());
//!
//! let ranking = BidRanking::new(vec![Bid::new([(1, "chips"), (2, "band")]), best.clone()]).unwrap();
//! assert_eq!(ranking.best(), Some(&best));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod action;
pub mod bid;
pub mod domain;
pub mod error;
pub mod ranking;

pub use action::{Action, ActionKind, PartyId};
pub use bid::Bid;
pub use domain::{Domain, Issue, IssueNumber, Value};
pub use error::CoreError;
pub use ranking::BidRanking;
