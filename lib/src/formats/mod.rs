//! # PackRS Built-in Formats (`formats`)
//!
//! File: lib/src/formats/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the archive backends PackRS ships and exposes them
//! as a handler table for registry seeding. Six formats are built in:
//!
//! | Format   | Suffixes                                  | Backend crates      |
//! |----------|-------------------------------------------|---------------------|
//! | `tar`    | `.tar`                                    | `tar`               |
//! | `gztar`  | `.tar.gz`, `.tgz`, `.taz`                 | `tar` + `flate2`    |
//! | `bztar`  | `.tar.bz2`, `.tbz2`, `.tbz`, `.tar.bz`    | `tar` + `bzip2`     |
//! | `xztar`  | `.tar.xz`, `.txz`                         | `tar` + `xz2`       |
//! | `zsttar` | `.tar.zst`, `.tzst`                       | `tar` + `zstd`      |
//! | `zip`    | `.zip`                                    | `zip`               |
//!
//! ## Usage
//!
//! The table is normally consumed through `FormatRegistry::with_builtins`:
//!
//! ```rust
//! use packrs::FormatRegistry;
//! use std::path::Path;
//!
//! let registry = FormatRegistry::with_builtins();
//! assert_eq!(registry.resolve(Path::new("a.tbz2")).unwrap().name(), "bztar");
//! assert_eq!(registry.resolve(Path::new("a.zip")).unwrap().name(), "zip");
//! ```
//!
use crate::registry::FormatHandler;
use std::sync::Arc;
use tracing::warn;

/// Tar-based backends (plain and compressed).
pub mod tarball;
/// Zip backend.
pub mod zipfile;

use tarball::Codec;

/// Returns handler records for every built-in format.
///
/// Each call builds a fresh set, so multiple registries can be seeded
/// independently.
pub fn builtin_handlers() -> Vec<FormatHandler> {
    vec![
        FormatHandler::new(
            "tar",
            "Uncompressed tar archive",
            &[".tar"],
            Arc::new(|src, dest, opts| tarball::create_tarball(Codec::Plain, src, dest, opts)),
        ),
        FormatHandler::new(
            "gztar",
            "Gzip-compressed tar archive",
            &[".tar.gz", ".tgz", ".taz"],
            Arc::new(|src, dest, opts| tarball::create_tarball(Codec::Gzip, src, dest, opts)),
        ),
        FormatHandler::new(
            "bztar",
            "Bzip2-compressed tar archive",
            &[".tar.bz2", ".tbz2", ".tbz", ".tar.bz"],
            Arc::new(|src, dest, opts| tarball::create_tarball(Codec::Bzip2, src, dest, opts)),
        ),
        FormatHandler::new(
            "xztar",
            "XZ-compressed tar archive",
            &[".tar.xz", ".txz"],
            Arc::new(|src, dest, opts| tarball::create_tarball(Codec::Xz, src, dest, opts)),
        ),
        FormatHandler::new(
            "zsttar",
            "Zstandard-compressed tar archive",
            &[".tar.zst", ".tzst"],
            Arc::new(|src, dest, opts| tarball::create_tarball(Codec::Zstd, src, dest, opts)),
        ),
        FormatHandler::new(
            "zip",
            "Zip archive (deflate)",
            &[".zip"],
            Arc::new(|src, dest, opts| zipfile::create_zip(src, dest, opts)),
        ),
    ]
}

/// Clamps a requested compression level into `codec`'s supported range,
/// warning when the request is out of bounds.
pub(crate) fn clamp_level(requested: u32, min: u32, max: u32, codec: &str) -> u32 {
    if requested < min || requested > max {
        let clamped = requested.clamp(min, max);
        warn!(
            "Compression level {requested} is outside the {codec} range {min}-{max}; using {clamped}"
        );
        clamped
    } else {
        requested
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::options::ArchiveOptions;
    use crate::registry::FormatRegistry;
    use std::fs as std_fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_clamp_level_passes_in_range() {
        assert_eq!(clamp_level(0, 0, 9, "gzip"), 0);
        assert_eq!(clamp_level(9, 0, 9, "gzip"), 9);
        assert_eq!(clamp_level(3, 1, 22, "zstd"), 3);
    }

    #[test]
    fn test_clamp_level_clamps_out_of_range() {
        assert_eq!(clamp_level(99, 0, 9, "gzip"), 9);
        assert_eq!(clamp_level(0, 1, 9, "bzip2"), 1);
        assert_eq!(clamp_level(40, 1, 22, "zstd"), 22);
    }

    #[test]
    fn test_builtin_table_shape() {
        let handlers = builtin_handlers();
        let names: Vec<&str> = handlers.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["tar", "gztar", "bztar", "xztar", "zsttar", "zip"]);
        // Every handler claims at least one suffix, each with a leading dot.
        for handler in &handlers {
            assert!(!handler.suffixes().is_empty());
            assert!(handler.suffixes().iter().all(|s| s.starts_with('.')));
            assert!(!handler.description().is_empty());
        }
    }

    /// End to end through a registry: a real tar archive is produced and
    /// decodes to the source contents.
    #[test]
    fn test_make_archive_tar_end_to_end() -> Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("srcdir");
        std_fs::create_dir(&source)?;
        std_fs::write(source.join("greeting.txt"), "hello from packrs")?;

        let registry = FormatRegistry::with_builtins();
        let dest = temp_dir.path().join("out.tar");
        let produced = registry.make_archive(&dest, &source, &ArchiveOptions::default())?;
        assert_eq!(produced, dest);
        assert!(dest.is_file());

        let mut archive = tar::Archive::new(std_fs::File::open(&dest)?);
        let mut seen = Vec::new();
        for entry in archive.entries()? {
            seen.push(entry?.path()?.to_string_lossy().to_string());
        }
        assert!(seen.contains(&"greeting.txt".to_string()));
        Ok(())
    }

    /// The alias suffixes dispatch to the same handlers as the long forms.
    #[test]
    fn test_alias_suffixes_resolve() -> Result<()> {
        let registry = FormatRegistry::with_builtins();
        for (path, expected) in [
            ("a.tgz", "gztar"),
            ("a.taz", "gztar"),
            ("a.tbz", "bztar"),
            ("a.tar.bz", "bztar"),
            ("a.txz", "xztar"),
            ("a.tzst", "zsttar"),
        ] {
            assert_eq!(registry.resolve(Path::new(path))?.name(), expected);
        }
        Ok(())
    }
}
