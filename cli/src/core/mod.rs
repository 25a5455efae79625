//! # PackRS CLI Core Infrastructure (`core`)
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components of the PackRS
//! command-line application. Error types and the archive machinery live in
//! the `packrs` library crate; the CLI only adds what is specific to running
//! as a command-line tool.
//!
//! ## Architecture
//!
//! One component today:
//! - `config`: Configuration loading, merging, and validation
//!
//! ## Usage
//!
//! Core infrastructure is imported by command handlers:
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use packrs::{PackError, Result}; // Error handling comes from the library
//! ```
//!
pub mod config;
