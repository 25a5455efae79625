//! # PackRS Archive Options (`core::options`)
//!
//! File: lib/src/core/options.rs
//!
//! ## Overview
//!
//! Defines `ArchiveOptions`, the per-call knobs accepted by every archive
//! backend: whether an existing destination may be replaced, an optional
//! backend-specific compression level, and a dry-run switch that stops
//! short of writing anything.
//!
//! ## Usage
//!
//! ```rust
//! use packrs::ArchiveOptions;
//!
//! let opts = ArchiveOptions::new()
//!     .with_compression_level(9)
//!     .with_overwrite(false);
//!
//! assert_eq!(opts.compression_level, Some(9));
//! assert!(!opts.overwrite);
//! assert!(!opts.dry_run);
//! ```
//!

/// Options controlling a single archive creation call.
///
/// The defaults match the common case: replace a stale archive file if one is
/// in the way, let each backend pick its own compression level, and actually
/// write the archive.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Replace an existing *file* at the destination path. A directory at the
    /// destination is never replaced, regardless of this flag.
    pub overwrite: bool,
    /// Backend-specific compression level. `None` means the backend's default.
    /// Levels outside a backend's supported range are clamped with a warning.
    pub compression_level: Option<u32>,
    /// Validate and resolve only; skip all filesystem writes.
    pub dry_run: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        ArchiveOptions {
            overwrite: true,
            compression_level: None,
            dry_run: false,
        }
    }
}

impl ArchiveOptions {
    /// Creates options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether an existing destination file may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the compression level passed to the backend.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets dry-run mode: resolve and validate, but write nothing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ArchiveOptions::default();
        assert!(opts.overwrite);
        assert_eq!(opts.compression_level, None);
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_builder_chain() {
        let opts = ArchiveOptions::new()
            .with_overwrite(false)
            .with_compression_level(6)
            .with_dry_run(true);
        assert!(!opts.overwrite);
        assert_eq!(opts.compression_level, Some(6));
        assert!(opts.dry_run);
    }
}
