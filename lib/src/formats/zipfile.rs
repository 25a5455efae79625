//! # PackRS Zip Backend (`formats::zipfile`)
//!
//! File: lib/src/formats/zipfile.rs
//!
//! ## Overview
//!
//! This module builds zip archives with the `zip` crate. Entries are written
//! with the deflate method; directory entries are recorded explicitly so the
//! hierarchy survives extraction by any tool.
//!
//! ## Architecture
//!
//! - Directory sources are walked with `walkdir` in sorted order, so entry
//!   order (and therefore the archive bytes, modulo timestamps) is stable
//!   across platforms and runs.
//! - Entries are real directories and regular files. The file check follows
//!   links, so a link to a file is stored by its target's content, while
//!   dangling links, symlinked directories, and special files are skipped.
//! - Names are stored relative to the source root with `/` separators, the
//!   only separator the zip format permits. Zip names are UTF-8 text, so a
//!   non-UTF-8 path fails the archive rather than being stored mangled.
//! - On Unix, each entry carries the source's permission bits.
//! - Like the tarball backends, output is staged next to the destination and
//!   persisted only after `ZipWriter::finish` succeeds.
//!
use super::clamp_level;
use crate::common::fs;
use crate::core::{
    error::{PackError, Result},
    options::ArchiveOptions,
};
use anyhow::Context;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

/// Creates a zip archive of `source` at `dest`.
///
/// A directory source is archived with its contents relative to the source
/// root; a file source becomes a single entry under its base name. Within a
/// directory source only real directories and regular files (links followed)
/// become entries; anything else is skipped with a debug log. Entry names
/// must be valid UTF-8 text, as the zip format requires; a path that is not
/// fails with `PackError::FileSystem`.
///
/// # Arguments
///
/// * `source` - The file or directory to archive.
/// * `dest` - The archive path to produce; its parent must exist.
/// * `options` - Only `compression_level` (deflate, 0-9) is consulted here.
///
/// # Returns
///
/// * `Result<PathBuf>` - The path of the written archive (`dest`).
pub(crate) fn create_zip(source: &Path, dest: &Path, options: &ArchiveOptions) -> Result<PathBuf> {
    let (file, guard) = fs::stage_in(staging_dir_for(dest))?;
    let mut zip = ZipWriter::new(file);
    let base = base_options(options.compression_level);

    if source.is_dir() {
        // Sorted traversal keeps entry order deterministic.
        let walker = WalkDir::new(source).follow_links(false).sort_by_file_name();
        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Failed to walk source directory '{}'", source.display())
            })?;
            let relative = entry.path().strip_prefix(source).with_context(|| {
                format!("Failed to relativize '{}'", entry.path().display())
            })?;
            // The source root itself is not an entry.
            if relative.as_os_str().is_empty() {
                continue;
            }
            let is_dir = entry.file_type().is_dir();
            // `is_file` follows links, so a link to a regular file is kept
            // and stored by its target's content below; dangling links,
            // symlinked directories, and special files have no zip entry
            // shape and are skipped.
            if !is_dir && !entry.path().is_file() {
                debug!("Skipping non-file entry {:?}", entry.path());
                continue;
            }
            let name = entry_name(relative)?;
            let entry_opts = with_unix_mode(base, entry.path())?;
            if is_dir {
                zip.add_directory(&name, entry_opts)
                    .with_context(|| format!("Failed to add directory '{name}' to archive"))?;
            } else {
                zip.start_file(&name, entry_opts)
                    .with_context(|| format!("Failed to start file '{name}' in archive"))?;
                let mut reader = File::open(entry.path())
                    .with_context(|| format!("Failed to read '{}'", entry.path().display()))?;
                io::copy(&mut reader, &mut zip)
                    .with_context(|| format!("Failed to write '{name}' to archive"))?;
            }
        }
    } else {
        let name = match source.file_name() {
            Some(file_name) => entry_name(Path::new(file_name))?,
            None => anyhow::bail!(PackError::FileSystem(format!(
                "Source path has no file name: {:?}",
                source
            ))),
        };
        let entry_opts = with_unix_mode(base, source)?;
        zip.start_file(&name, entry_opts)
            .with_context(|| format!("Failed to start file '{name}' in archive"))?;
        let mut reader = File::open(source)
            .with_context(|| format!("Failed to read '{}'", source.display()))?;
        io::copy(&mut reader, &mut zip)
            .with_context(|| format!("Failed to write '{name}' to archive"))?;
    }

    // Writes the central directory; the archive is incomplete without it.
    let file = zip.finish().context("Failed to finalize zip archive")?;
    drop(file);

    guard
        .persist(dest)
        .with_context(|| format!("Failed to move staged archive into place at {:?}", dest))?;
    debug!("Wrote zip archive at {:?}", dest);
    Ok(dest.to_path_buf())
}

/// Deflate options with the caller's level applied (clamped to 0-9).
fn base_options(level: Option<u32>) -> FileOptions<'static, ()> {
    let mut opts = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);
    if let Some(level) = level {
        let level = clamp_level(level, 0, 9, "zip deflate");
        opts = opts.compression_level(Some(level as i64));
    }
    opts
}

/// Zip entry names always use forward slashes.
///
/// Names are stored as UTF-8 text in the archive, so a path that is not
/// valid UTF-8 is rejected rather than written with replacement characters.
fn entry_name(relative: &Path) -> Result<String> {
    match relative.to_str() {
        Some(name) => Ok(name.replace('\\', "/")),
        None => anyhow::bail!(PackError::FileSystem(format!(
            "Path is not valid UTF-8 and cannot be a zip entry name: {:?}",
            relative
        ))),
    }
}

/// Stamps the source's permission bits onto the entry options.
#[cfg(unix)]
fn with_unix_mode(opts: FileOptions<'static, ()>, path: &Path) -> Result<FileOptions<'static, ()>> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for '{}'", path.display()))?;
    Ok(opts.unix_permissions(metadata.permissions().mode() & 0o777))
}

#[cfg(not(unix))]
fn with_unix_mode(
    opts: FileOptions<'static, ()>,
    _path: &Path,
) -> Result<FileOptions<'static, ()>> {
    Ok(opts)
}

/// The directory the staged temp file goes in: the destination's parent, or
/// the current directory for bare file names.
fn staging_dir_for(dest: &Path) -> &Path {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
