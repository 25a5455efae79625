//! # PackRS CLI Formats Integration Tests
//!
//! File: cli/tests/formats.rs
//!
//! ## Overview
//!
//! Integration tests for the `packrs formats` command, verifying that the
//! built-in archive formats are listed with their dispatch suffixes.
//!

// Declare and use the common module
mod common;
use common::*;
// Import necessary items directly
use predicates::prelude::*;

/// # Test Formats Listing (`test_formats_lists_builtin_suffixes`)
///
/// Verifies that `packrs formats` succeeds and lists the core built-in
/// suffixes alongside their format names.
#[test]
fn test_formats_lists_builtin_suffixes() {
    packrs_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains(".tar.gz"))
        .stdout(predicate::str::contains(".tar.bz2"))
        .stdout(predicate::str::contains(".zip"))
        .stdout(predicate::str::contains("gztar"));
}

/// # Test Formats Alias (`test_formats_alias`)
///
/// Verifies that the short alias `packrs f` reaches the same handler.
#[test]
fn test_formats_alias() {
    packrs_cmd()
        .arg("f")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered archive formats"));
}

/// # Test Formats Footer (`test_formats_reports_count`)
///
/// Verifies that the table footer reports how many suffixes are registered.
#[test]
fn test_formats_reports_count() {
    packrs_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("registered suffix(es)"));
}
