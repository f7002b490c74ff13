//! Testing infrastructure for ackdev integration tests.
//!
//! - `TestWorld`: isolated models/output directories and command setup
//! - `fixtures`: sample model manifests and key scripts

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
