//! # PackRS: Suffix-Dispatched Archive Creation
//!
//! File: lib/src/lib.rs
//!
//! ## Overview
//!
//! PackRS picks an archive backend from a destination filename's suffix and
//! delegates to it. The library does not define a new archive format or
//! compression algorithm; it is a registry of suffix-to-handler bindings with
//! a `make_archive` entry point, plus built-in handlers for the common
//! tarball flavors and zip.
//!
//! Writing `site.tar.gz` uses the gzip tarball backend, `site.zip` the zip
//! backend, `site.tar.zst` the zstd tarball backend, and so on. New formats
//! are registered as closures at runtime, not subclasses.
//!
//! ## Architecture
//!
//! - **`registry`**: the `FormatRegistry` (suffix lookup, longest-match
//!   resolution, `make_archive` orchestration) and the `FormatHandler`
//!   record. A process-wide default registry backs the crate-level
//!   convenience functions.
//! - **`formats`**: the built-in backends, tar with pluggable compression
//!   (gzip, bzip2, xz, zstd) and zip.
//! - **`core`**: error types (`PackError`, `Result`) and the per-call
//!   `ArchiveOptions`.
//! - **`common`**: shared filesystem helpers (directory creation, staged
//!   temp-file output).
//!
//! ## Usage
//!
//! ```rust
//! use packrs::{ArchiveOptions, FormatRegistry};
//! use std::path::Path;
//!
//! # fn run_example() -> packrs::Result<()> {
//! // Through an isolated registry instance...
//! let registry = FormatRegistry::with_builtins();
//! registry.make_archive(
//!     Path::new("dist/site.tar.gz"),
//!     Path::new("./site"),
//!     &ArchiveOptions::new().with_compression_level(9),
//! )?;
//!
//! // ...or through the process-wide default.
//! packrs::make_archive(
//!     Path::new("dist/site.zip"),
//!     Path::new("./site"),
//!     &ArchiveOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
use std::path::{Path, PathBuf};

/// Shared filesystem helpers.
pub mod common;
/// Core infrastructure: errors and archive options.
pub mod core;
/// Built-in archive backends and the handler table.
pub mod formats;
/// The format registry and handler types.
pub mod registry;

pub use crate::core::error::{PackError, Result};
pub use crate::core::options::ArchiveOptions;
pub use crate::registry::{default_registry, ArchiveFn, FormatHandler, FormatRegistry};

/// Creates an archive of `source` at `dest` using the default registry.
///
/// The destination's suffix selects the format. See
/// [`FormatRegistry::make_archive`] for the full flow and error cases.
pub fn make_archive(dest: &Path, source: &Path, options: &ArchiveOptions) -> Result<PathBuf> {
    default_registry().make_archive(dest, source, options)
}

/// Returns the default registry's `(suffix, description)` pairs, sorted by
/// suffix.
pub fn get_archive_formats() -> Vec<(String, String)> {
    default_registry().formats()
}

/// Returns every suffix the default registry recognizes, sorted.
pub fn get_archive_suffixes() -> Vec<String> {
    default_registry().suffixes()
}

/// Registers `handler` in the default registry under every suffix it claims.
///
/// Existing bindings for those suffixes are replaced (last registration
/// wins).
///
/// # Errors
///
/// Returns `PackError::InvalidSuffix` if any claimed suffix is malformed, in
/// which case the registry is unchanged.
pub fn register_archive_format(handler: FormatHandler) -> Result<()> {
    default_registry().register_handler(handler)
}

/// Removes the format named `name` from the default registry, clearing every
/// suffix bound to it. Returns the number of suffixes removed.
pub fn unregister_archive_format(name: &str) -> usize {
    default_registry().unregister_handler(name)
}

// --- Unit Tests ---
// These exercise the crate-level convenience surface, which shares one
// process-wide registry; each test uses suffixes no other test touches.
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_default_registry_round_trip() -> Result<()> {
        let handler = FormatHandler::new(
            "qq-test",
            "Test format",
            &[".qq1", ".qq2"],
            Arc::new(|_src: &Path, dest: &Path, _opts: &ArchiveOptions| Ok(dest.to_path_buf())),
        );
        register_archive_format(handler)?;

        let suffixes = get_archive_suffixes();
        assert!(suffixes.contains(&".qq1".to_string()));
        assert!(suffixes.contains(&".qq2".to_string()));
        assert!(get_archive_formats()
            .contains(&(".qq1".to_string(), "Test format".to_string())));

        assert_eq!(unregister_archive_format("qq-test"), 2);
        assert!(!get_archive_suffixes().contains(&".qq1".to_string()));
        assert_eq!(unregister_archive_format("qq-test"), 0);
        Ok(())
    }

    #[test]
    fn test_default_registry_has_builtins() {
        let suffixes = get_archive_suffixes();
        for expected in [".tar", ".tar.gz", ".tar.bz2", ".zip"] {
            assert!(
                suffixes.contains(&expected.to_string()),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn test_make_archive_gztar_end_to_end() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("srcdir");
        fs::create_dir(&source)?;
        fs::write(source.join("data.txt"), "round trip")?;
        let dest = temp_dir.path().join("out.tar.gz");

        let produced = make_archive(&dest, &source, &ArchiveOptions::default())?;
        assert_eq!(produced, dest);

        let decoder = flate2::read::GzDecoder::new(fs::File::open(&dest)?);
        let mut archive = tar::Archive::new(decoder);
        let mut content = String::new();
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.to_string_lossy() == "data.txt" {
                entry.read_to_string(&mut content)?;
            }
        }
        assert_eq!(content, "round trip");
        Ok(())
    }

    #[test]
    fn test_make_archive_unknown_suffix() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("srcdir");
        fs::create_dir(&source)?;

        let err = make_archive(
            &temp_dir.path().join("out.xyz"),
            &source,
            &ArchiveOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::UnknownFormat { .. })
        ));
        Ok(())
    }
}
