//! # PackRS Core Infrastructure
//!
//! File: lib/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components that provide
//! foundational functionality for the PackRS library. These components
//! handle error management and per-call archive options.
//!
//! ## Architecture
//!
//! The core infrastructure consists of two key components:
//! - `error`: Error types and error handling utilities
//! - `options`: The `ArchiveOptions` accepted by every backend
//!
//! These components provide essential infrastructure that's used by
//! the registry and the built-in format backends.
//!
//! ## Usage
//!
//! Core infrastructure is imported by the rest of the crate:
//!
//! ```rust
//! use packrs::core::error::{PackError, Result}; // For error handling
//! use packrs::core::options::ArchiveOptions; // Per-call archive knobs
//! ```
//!
pub mod error;
pub mod options;
