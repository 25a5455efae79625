//! # PackRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! This module provides shared utility functions used across the integration
//! test files (`create.rs`, `formats.rs`). This avoids code duplication in
//! the test suite.
//!
//! Integration tests are located in the `cli/tests/` directory and each `.rs` file
//! in that directory (that isn't a module like this one) is compiled as a separate
//! test crate running the compiled `packrs` binary.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

// Re-export common crates/modules needed by multiple test files
pub use assert_cmd::Command;
// Note: predicates and tempfile are not re-exported from here.
// Individual test files should import them directly if needed using:
// use predicates::prelude::*;
// use tempfile::tempdir; // or other tempfile items

/// # Get PackRS Command (`packrs_cmd`)
///
/// Helper function to create an `assert_cmd::Command` instance pointing to the
/// compiled `packrs` binary target for the current test run.
///
/// The `RUST_LOG` variable is cleared so a host environment's filter cannot
/// change what lands on stderr; assertions on error output stay stable.
///
/// ## Panics
/// Panics if the `packrs` binary cannot be found via `Command::cargo_bin`.
///
/// ## Returns
/// * `Command` - An `assert_cmd::Command` ready to have arguments added and assertions run.
pub fn packrs_cmd() -> Command {
    let mut cmd = Command::cargo_bin("packrs").expect("Failed to find packrs binary for testing");
    cmd.env_remove("RUST_LOG");
    cmd
}
