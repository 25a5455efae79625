//! # PackRS Format Registry (`registry`)
//!
//! File: lib/src/registry/mod.rs
//!
//! ## Overview
//!
//! This module owns the suffix-to-handler bindings at the heart of PackRS and
//! resolves a requested archive path to the handler needed to build it. The
//! registry is a lookup-and-delegate mechanism: it performs no encoding itself,
//! it picks a [`FormatHandler`] by filename suffix and invokes its action.
//!
//! ## Architecture
//!
//! - **`FormatRegistry`**: a reader-writer-locked map from normalized suffix
//!   (lower-case, leading dot) to a shared [`FormatHandler`]. Registration is
//!   write-rarely; resolution is read-mostly. Compound suffixes are whole map
//!   keys (`.tar.gz` is one entry), and resolution picks the *longest* matching
//!   suffix so `site.tar.gz` dispatches to gztar rather than a bare `.gz`
//!   handler.
//! - **Registration policy**: registering an already-claimed suffix silently
//!   replaces the prior binding (last registration wins). This matches the
//!   forgiving plug-in style of the rest of the API (`unregister_format` of an
//!   absent suffix is likewise a no-op).
//! - **Default registry**: a process-wide instance seeded with the built-in
//!   formats, behind [`default_registry`]. Tests and embedders that want
//!   isolation construct their own `FormatRegistry` instead.
//!
//! A failed `make_archive` makes no promise about partial output at the
//! destination: cleanup is the handler's (or caller's) concern. The built-in
//! handlers stage output in a temporary file and persist it only on success,
//! but custom handlers are free to do less.
//!
//! ## Usage
//!
//! ```rust
//! use packrs::FormatRegistry;
//! use std::path::Path;
//!
//! let registry = FormatRegistry::with_builtins();
//!
//! // Longest-suffix match: "site.tar.gz" is gztar, not a bare ".gz".
//! let handler = registry.resolve(Path::new("site.tar.gz")).unwrap();
//! assert_eq!(handler.name(), "gztar");
//!
//! // Enumeration is sorted by suffix and deterministic.
//! let formats = registry.formats();
//! assert!(formats.iter().any(|(suffix, _)| suffix == ".zip"));
//! ```
//!
use crate::common::fs;
use crate::core::{
    error::{PackError, Result},
    options::ArchiveOptions,
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Handler record and the archive-action callable type.
pub mod handler;

pub use handler::{ArchiveFn, FormatHandler};

/// The process-wide registry, seeded with the built-in formats on first use.
static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_builtins);

/// Returns the process-wide default registry.
///
/// The instance is created on first access and lives for the rest of the
/// process. Registrations made through it are visible to every caller of the
/// crate-level convenience functions. Code that needs isolation (tests,
/// embedders with their own format sets) should construct a fresh
/// [`FormatRegistry`] instead of mutating this one.
pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}

/// Suffix-to-handler dispatch table.
///
/// All mutation goes through an exclusive lock; resolution takes a shared
/// lock and clones out the matched handler's `Arc`, so no lock is held while
/// a backend performs I/O.
pub struct FormatRegistry {
    by_suffix: RwLock<BTreeMap<String, Arc<FormatHandler>>>,
}

impl FormatRegistry {
    /// Creates an empty registry with no formats registered.
    pub fn new() -> Self {
        FormatRegistry {
            by_suffix: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a registry pre-populated with the built-in formats
    /// (tar, gztar, bztar, xztar, zsttar, zip).
    pub fn with_builtins() -> Self {
        let registry = FormatRegistry::new();
        for handler in crate::formats::builtin_handlers() {
            // The built-in suffix tables are static and valid; a failure here
            // is a programming error, not a runtime condition.
            registry
                .register_handler(handler)
                .expect("built-in archive formats must register cleanly");
        }
        registry
    }

    /// Registers `handler` under a single `suffix`.
    ///
    /// The suffix is validated and normalized to lower-case before insertion.
    /// If the suffix is already claimed, the prior binding is replaced (last
    /// registration wins).
    ///
    /// # Arguments
    ///
    /// * `suffix` - The filename suffix to claim, including the leading dot
    ///   (e.g. `".tar.lz4"`). Matching is case-insensitive.
    /// * `handler` - The handler to dispatch to for that suffix.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidSuffix` if the suffix is empty, lacks a
    /// leading dot, or contains whitespace or path separators.
    pub fn register_format(&self, suffix: &str, handler: FormatHandler) -> Result<()> {
        let normalized = normalize_suffix(suffix)?;
        let mut map = self.write_map();
        if map.insert(normalized.clone(), Arc::new(handler)).is_some() {
            debug!("Replaced existing handler for suffix '{normalized}'");
        } else {
            debug!("Registered archive suffix '{normalized}'");
        }
        Ok(())
    }

    /// Registers `handler` under every suffix it claims.
    ///
    /// All suffixes are validated up front; if any is invalid, nothing is
    /// registered. The handler is shared (one allocation) across all of its
    /// suffixes, and each suffix follows the same last-registration-wins
    /// policy as [`register_format`](Self::register_format).
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidSuffix` if the handler claims no suffixes
    /// at all, or for the first invalid suffix; in either case the registry
    /// is unchanged.
    pub fn register_handler(&self, handler: FormatHandler) -> Result<()> {
        if handler.suffixes().is_empty() {
            anyhow::bail!(PackError::InvalidSuffix {
                suffix: String::new(),
                reason: format!("format '{}' claims no suffixes", handler.name()),
            });
        }
        // Validate everything before touching the map so a bad suffix cannot
        // leave a handler half-registered.
        let normalized: Vec<String> = handler
            .suffixes()
            .iter()
            .map(|s| normalize_suffix(s))
            .collect::<Result<_>>()?;
        let shared = Arc::new(handler);
        let mut map = self.write_map();
        for suffix in normalized {
            map.insert(suffix.clone(), Arc::clone(&shared));
            debug!("Registered archive suffix '{}' -> '{}'", suffix, shared.name());
        }
        Ok(())
    }

    /// Removes the binding for `suffix`, if any.
    ///
    /// Removal is forgiving: an absent (or even invalid) suffix is a no-op,
    /// never an error. Returns `true` if a binding was removed.
    pub fn unregister_format(&self, suffix: &str) -> bool {
        // An invalid suffix can never have been registered.
        let normalized = match normalize_suffix(suffix) {
            Ok(s) => s,
            Err(_) => return false,
        };
        let removed = self.write_map().remove(&normalized).is_some();
        if removed {
            debug!("Unregistered archive suffix '{normalized}'");
        }
        removed
    }

    /// Removes every suffix bound to the handler named `name`.
    ///
    /// This is the bulk counterpart of
    /// [`unregister_format`](Self::unregister_format): it clears a whole
    /// format (e.g. `"gztar"` with all of its aliases) in one call. Returns
    /// the number of suffixes removed; zero if the name is unknown.
    pub fn unregister_handler(&self, name: &str) -> usize {
        let mut map = self.write_map();
        let doomed: Vec<String> = map
            .iter()
            .filter(|(_, handler)| handler.name() == name)
            .map(|(suffix, _)| suffix.clone())
            .collect();
        for suffix in &doomed {
            map.remove(suffix);
        }
        if !doomed.is_empty() {
            debug!("Unregistered format '{}' ({} suffixes)", name, doomed.len());
        }
        doomed.len()
    }

    /// Returns the registered `(suffix, description)` pairs, sorted by suffix.
    ///
    /// The enumeration is deterministic and side-effect free; it is the
    /// discovery surface used by help output and the `formats` CLI command.
    pub fn formats(&self) -> Vec<(String, String)> {
        self.read_map()
            .iter()
            .map(|(suffix, handler)| (suffix.clone(), handler.description().to_string()))
            .collect()
    }

    /// Returns every registered suffix, sorted.
    pub fn suffixes(&self) -> Vec<String> {
        self.read_map().keys().cloned().collect()
    }

    /// Returns the full `(suffix, handler)` table, sorted by suffix.
    ///
    /// Richer than [`formats`](Self::formats); used where the handler's name
    /// and alias list matter (e.g. tabular listings).
    pub fn entries(&self) -> Vec<(String, Arc<FormatHandler>)> {
        self.read_map()
            .iter()
            .map(|(suffix, handler)| (suffix.clone(), Arc::clone(handler)))
            .collect()
    }

    /// Resolves `path` to the handler registered for its longest matching
    /// suffix.
    ///
    /// Only the file-name portion of the path is considered, and matching is
    /// case-insensitive. When several registered suffixes match (`.gz` and
    /// `.tar.gz` against `site.tar.gz`), the longest one wins; naive
    /// single-extension matching would split compound suffixes incorrectly.
    ///
    /// # Errors
    ///
    /// Returns `PackError::UnknownFormat` if no registered suffix matches.
    pub fn resolve(&self, path: &Path) -> Result<Arc<FormatHandler>> {
        match self.find_longest(path) {
            Some((suffix, handler)) => {
                debug!("Resolved {:?} via suffix '{}'", path, suffix);
                Ok(handler)
            }
            None => anyhow::bail!(PackError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Creates an archive of `source` at `dest`, dispatching on `dest`'s
    /// suffix.
    ///
    /// The flow is: resolve the handler, validate the source and destination,
    /// honor `dry_run`, create the destination's parent directory if needed,
    /// then invoke the handler with no lock held. The returned path is the
    /// path the handler reports having written (normally `dest` itself).
    ///
    /// # Arguments
    ///
    /// * `dest` - The archive path to produce; its suffix selects the format.
    /// * `source` - The file or directory to archive.
    /// * `options` - Overwrite, compression level, and dry-run knobs.
    ///
    /// # Errors
    ///
    /// * `PackError::UnknownFormat` - no registered suffix matches `dest`.
    /// * `PackError::SourceMissing` - `source` does not exist.
    /// * `PackError::DestinationExists` - `dest` exists and `overwrite` is
    ///   off, or `dest` is a directory (directories are never replaced).
    /// * `PackError::Backend` - the handler failed; the backend's original
    ///   error remains attached as the cause.
    pub fn make_archive(
        &self,
        dest: &Path,
        source: &Path,
        options: &ArchiveOptions,
    ) -> Result<PathBuf> {
        let handler = self.resolve(dest)?;

        if !source.exists() {
            anyhow::bail!(PackError::SourceMissing {
                path: source.display().to_string(),
            });
        }

        if dest.exists() {
            // A directory at the destination is never replaced; a file is
            // replaced only when overwrite is on.
            if dest.is_dir() || !options.overwrite {
                anyhow::bail!(PackError::DestinationExists {
                    path: dest.display().to_string(),
                });
            }
            debug!("Will replace existing archive at {:?}", dest);
        }

        if options.dry_run {
            info!(
                "Dry run: would create '{}' archive at {:?} from {:?}",
                handler.name(),
                dest,
                source
            );
            return Ok(dest.to_path_buf());
        }

        if let Some(parent) = dest.parent() {
            // `Path::parent` yields "" for bare file names; nothing to create.
            if !parent.as_os_str().is_empty() {
                fs::ensure_dir_exists(parent)?;
            }
        }

        info!(
            "Creating '{}' archive at {:?} from {:?}",
            handler.name(),
            dest,
            source
        );
        let produced = handler.create(source, dest, options).map_err(|err| {
            err.context(PackError::Backend {
                name: handler.name().to_string(),
            })
        })?;
        info!("Created archive {:?}", produced);
        Ok(produced)
    }

    // Lock helpers. A poisoned lock only means another thread panicked while
    // holding the guard; the map itself is still coherent, so recover it.
    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Arc<FormatHandler>>> {
        self.by_suffix.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Arc<FormatHandler>>> {
        self.by_suffix
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Scans for the longest registered suffix matching `path`'s file name.
    fn find_longest(&self, path: &Path) -> Option<(String, Arc<FormatHandler>)> {
        let file_name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        self.read_map()
            .iter()
            .filter(|(suffix, _)| file_name.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(suffix, handler)| (suffix.clone(), Arc::clone(handler)))
    }
}

impl Default for FormatRegistry {
    /// An empty registry; use [`FormatRegistry::with_builtins`] for the
    /// pre-seeded one.
    fn default() -> Self {
        FormatRegistry::new()
    }
}

/// Validates a suffix and normalizes it to lower-case.
///
/// Rules: non-empty, leading `.`, at least one character after the dot, no
/// whitespace, no path separators.
fn normalize_suffix(suffix: &str) -> Result<String> {
    let invalid = |reason: &str| PackError::InvalidSuffix {
        suffix: suffix.to_string(),
        reason: reason.to_string(),
    };
    if suffix.is_empty() {
        anyhow::bail!(invalid("suffix is empty"));
    }
    if !suffix.starts_with('.') {
        anyhow::bail!(invalid("must start with '.'"));
    }
    if suffix.len() == 1 {
        anyhow::bail!(invalid("no characters after '.'"));
    }
    if suffix.chars().any(|c| c.is_whitespace()) {
        anyhow::bail!(invalid("must not contain whitespace"));
    }
    if suffix.contains('/') || suffix.contains('\\') {
        anyhow::bail!(invalid("must not contain path separators"));
    }
    Ok(suffix.to_ascii_lowercase())
}
