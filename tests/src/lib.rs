//! Integration test framework for netmon
//!
//! This crate provides fixtures and utilities for integration testing of
//! the netmon reconciliation pipeline.
//!
//! # Components
//!
//! - [`test_fixtures`] - Device profiles and cell builders
//! - [`test_utils`] - Logging setup and assertions over cell lists
//!
//! # Test Categories
//!
//! 1. **Dual SIM** - duplicated lists from legacy dual SIM phones
//! 2. **Source merging** - legacy and modern APIs describing the same cell
//! 3. **Vendor quirks** - Samsung and Tensor Pixel repairs over several rounds
//! 4. **NSA detection** - masked service state dumps combined with cells

#![allow(missing_docs)]

pub mod test_fixtures;
pub mod test_utils;

#[cfg(test)]
mod e2e_scenario;

pub use test_fixtures::{config_for, duplicated_dual_sim_list, reconciler_for};
pub use test_utils::{count_by_subscription, init_test_logging, primary_of, TestResult};
