//! # PackRS Common Utilities (`common`)
//!
//! File: lib/src/common/mod.rs
//!
//! ## Overview
//!
//! This module serves as the organizational entry point for shared utility
//! modules used by the registry and the built-in archive backends. Keeping
//! these cross-cutting helpers under the `common::` namespace separates them
//! from the format-specific logic (`formats::`) and the core infrastructure
//! (`core::`).
//!
//! ## Usage
//!
//! ```rust
//! use packrs::common::fs;
//! use packrs::Result;
//! use std::path::Path;
//!
//! # fn run_example() -> Result<()> {
//! fs::ensure_dir_exists(Path::new("./dist"))?;
//! # Ok(())
//! # }
//! ```
//!

/// Filesystem helpers: directory creation and staged archive output.
pub mod fs;
