//! # PackRS Error Types
//!
//! File: lib/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used throughout
//! the PackRS library. It provides a consistent approach to error management
//! with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `PackError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover various domains:
//! - Configuration errors
//! - Filesystem errors
//! - Format registration and lookup errors
//! - Archive backend failures
//!
//! Backend failures are reported by attaching `PackError::Backend` as context on
//! the underlying error, so the original cause (an I/O error, a zip error, ...)
//! stays in the chain while callers can still `downcast_ref::<PackError>()` to
//! classify the failure.
//!
//! ## Examples
//!
//! Using the error system:
//!
//! ```rust
//! use packrs::{PackError, Result};
//! use std::path::Path;
//!
//! fn check_source(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         anyhow::bail!(PackError::SourceMissing {
//!             path: path.display().to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_source(Path::new("/definitely/not/here")).unwrap_err();
//! assert!(matches!(
//!     err.downcast_ref::<PackError>(),
//!     Some(PackError::SourceMissing { .. })
//! ));
//! ```
//!
//! The error system provides detailed error messages to the user and
//! includes context information for debugging.
//!
use thiserror::Error;

/// Custom error type for the PackRS library.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("No registered archive format matches '{path}'.")]
    UnknownFormat { path: String },

    #[error("Invalid suffix '{suffix}': {reason}")]
    InvalidSuffix { suffix: String, reason: String },

    #[error("Source path '{path}' does not exist.")]
    SourceMissing { path: String },

    #[error("Destination '{path}' already exists. Remove it first or allow overwrite.")]
    DestinationExists { path: String },

    #[error("Archive backend '{name}' failed.")]
    Backend { name: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
