//! Integration test suite.
//!
//! Covers encoding, decoding and validation of registered entities,
//! concurrent registry access and generated round-trips.

pub mod fixtures;
pub mod registry_tests;
