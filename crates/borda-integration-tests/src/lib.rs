//! Integration test crate for the borda negotiation agent.
//!
//! This crate exists solely to run integration tests that span borda-core and borda-agent.
//! It has no public API - all functionality is in the test modules.

#![forbid(unsafe_code)]
