//! # PackRS Format Handlers (`registry::handler`)
//!
//! File: lib/src/registry/handler.rs
//!
//! ## Overview
//!
//! Defines `FormatHandler`, the record a registry stores per archive format:
//! a short format name, the filename suffixes it claims, a human-readable
//! description, and the action that actually builds an archive.
//!
//! The action is a plain callable, not a trait object hierarchy. Anything
//! matching the `ArchiveFn` signature can back a format, so callers can
//! register a closure without implementing a trait.
//!
//! ## Usage
//!
//! ```rust
//! use packrs::{ArchiveOptions, FormatHandler};
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//!
//! // A do-nothing handler, useful in tests.
//! let handler = FormatHandler::new(
//!     "null",
//!     "Records the call, writes nothing",
//!     &[".null"],
//!     Arc::new(|_src, dest, _opts| Ok(dest.to_path_buf())),
//! );
//!
//! let out = handler
//!     .create(Path::new("data"), Path::new("out.null"), &ArchiveOptions::default())
//!     .unwrap();
//! assert_eq!(out, PathBuf::from("out.null"));
//! ```
//!
use crate::core::{error::Result, options::ArchiveOptions};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The capability every archive backend implements.
///
/// Arguments are `(source, destination, options)`; the return value is the
/// path of the archive that was (or, under dry-run, would have been) written.
/// Handlers are shared across threads, so the callable must be `Send + Sync`.
pub type ArchiveFn = Arc<dyn Fn(&Path, &Path, &ArchiveOptions) -> Result<PathBuf> + Send + Sync>;

/// A named archive format: metadata plus the action that builds archives.
///
/// Handlers are inert data until registered; all suffix validation and
/// normalization happens in [`FormatRegistry::register_handler`] so that
/// every registration path enforces the same rules.
///
/// [`FormatRegistry::register_handler`]: crate::registry::FormatRegistry::register_handler
#[derive(Clone)]
pub struct FormatHandler {
    /// Short format name, e.g. `"gztar"`.
    name: String,
    /// Filename suffixes this handler claims, e.g. `[".tar.gz", ".tgz"]`.
    suffixes: Vec<String>,
    /// One-line human-readable description for listings.
    description: String,
    /// The archive-building action.
    action: ArchiveFn,
}

impl FormatHandler {
    /// Creates a new handler record.
    ///
    /// # Arguments
    ///
    /// * `name` - Short format name used in listings and error messages.
    /// * `description` - One-line description shown by format enumeration.
    /// * `suffixes` - Filename suffixes the handler claims (including the leading dot).
    /// * `action` - The callable that builds archives for this format.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        suffixes: &[&str],
        action: ArchiveFn,
    ) -> Self {
        FormatHandler {
            name: name.into(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
            description: description.into(),
            action,
        }
    }

    /// The short format name, e.g. `"gztar"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suffixes this handler claims.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// The one-line description for listings.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invokes the handler's action to build an archive.
    ///
    /// This is a plain delegation; validation of the source and destination
    /// is the registry's job (see `FormatRegistry::make_archive`).
    pub fn create(&self, source: &Path, dest: &Path, options: &ArchiveOptions) -> Result<PathBuf> {
        (self.action)(source, dest, options)
    }
}

// Manual Debug: the action is an opaque callable.
impl fmt::Debug for FormatHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatHandler")
            .field("name", &self.name)
            .field("suffixes", &self.suffixes)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
