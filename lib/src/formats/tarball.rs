//! # PackRS Tarball Backends (`formats::tarball`)
//!
//! File: lib/src/formats/tarball.rs
//!
//! ## Overview
//!
//! This module builds every tar-based archive PackRS ships: plain `.tar`
//! plus the gzip, bzip2, xz, and zstd variants. One builder does the tar
//! layout; a pluggable compression sink decides what the bytes look like on
//! disk, so adding a codec never touches the traversal logic.
//!
//! ## Architecture
//!
//! - **`Codec`**: which compression stream to wrap around the output file.
//! - **`Compressor`**: a `Write` with an explicit `finish` that flushes the
//!   codec's footer and hands the inner writer back. Each codec gets a thin
//!   wrapper struct over its encoder type.
//! - **`create_tarball`**: stages a temp file beside the destination, layers
//!   the codec over it, drives `tar::Builder`, finishes both layers, then
//!   persists the staged file onto the destination.
//!
//! Directory sources are archived with their *contents* at the archive root
//! (`src/a.txt` becomes `a.txt`); a file source becomes a single entry under
//! its base name. Symlinks are stored as symlinks, not chased.
//!
use super::clamp_level;
use crate::common::fs;
use crate::core::{
    error::{PackError, Result},
    options::ArchiveOptions,
};
use anyhow::Context;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The compression stream wrapped around tarball output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Codec {
    /// No compression; bare tar bytes.
    Plain,
    /// DEFLATE via `flate2` (levels 0-9, default 6).
    Gzip,
    /// bzip2 via the `bzip2` crate (levels 1-9, default 6).
    Bzip2,
    /// XZ via `xz2` (presets 0-9, default 6).
    Xz,
    /// Zstandard via `zstd` (levels 1-22, default 3).
    Zstd,
}

impl Codec {
    /// Short label for log lines.
    fn label(self) -> &'static str {
        match self {
            Codec::Plain => "tar",
            Codec::Gzip => "gzip",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
            Codec::Zstd => "zstd",
        }
    }

    /// Layers this codec's encoder over `sink`.
    ///
    /// `requested` is the caller's compression level; out-of-range values are
    /// clamped (with a warning), and `None` means the codec's own default.
    fn wrap(self, sink: Box<dyn Write>, requested: Option<u32>) -> io::Result<Box<dyn Compressor>> {
        match self {
            Codec::Plain => {
                if requested.is_some() {
                    debug!("'tar' output is uncompressed; ignoring compression level");
                }
                Ok(Box::new(PlainSink { w: sink }))
            }
            Codec::Gzip => {
                let level = match requested {
                    Some(l) => flate2::Compression::new(clamp_level(l, 0, 9, "gzip")),
                    None => flate2::Compression::default(),
                };
                Ok(Box::new(GzipSink {
                    w: flate2::write::GzEncoder::new(sink, level),
                }))
            }
            Codec::Bzip2 => {
                let level = match requested {
                    Some(l) => bzip2::Compression::new(clamp_level(l, 1, 9, "bzip2")),
                    None => bzip2::Compression::default(),
                };
                Ok(Box::new(Bzip2Sink {
                    w: bzip2::write::BzEncoder::new(sink, level),
                }))
            }
            Codec::Xz => {
                // liblzma presets run 0-9; 6 is the library's own default.
                let preset = match requested {
                    Some(l) => clamp_level(l, 0, 9, "xz"),
                    None => 6,
                };
                Ok(Box::new(XzSink {
                    w: xz2::write::XzEncoder::new(sink, preset),
                }))
            }
            Codec::Zstd => {
                let level = match requested {
                    Some(l) => clamp_level(l, 1, 22, "zstd") as i32,
                    None => zstd::DEFAULT_COMPRESSION_LEVEL,
                };
                Ok(Box::new(ZstdSink {
                    w: zstd::Encoder::new(sink, level)?,
                }))
            }
        }
    }
}

/// A compression stream with an explicit finalization step.
///
/// `finish` writes the codec's trailing bytes and returns the inner writer,
/// so the caller knows the stream is complete before persisting the file.
trait Compressor: Write {
    fn finish(self: Box<Self>) -> io::Result<Box<dyn Write>>;
}

struct PlainSink {
    w: Box<dyn Write>,
}

impl Write for PlainSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

impl Compressor for PlainSink {
    fn finish(mut self: Box<Self>) -> io::Result<Box<dyn Write>> {
        self.w.flush()?;
        Ok(self.w)
    }
}

struct GzipSink {
    w: flate2::write::GzEncoder<Box<dyn Write>>,
}

impl Write for GzipSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

impl Compressor for GzipSink {
    fn finish(mut self: Box<Self>) -> io::Result<Box<dyn Write>> {
        self.w.try_finish()?;
        self.w.finish()
    }
}

struct Bzip2Sink {
    w: bzip2::write::BzEncoder<Box<dyn Write>>,
}

impl Write for Bzip2Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

impl Compressor for Bzip2Sink {
    fn finish(mut self: Box<Self>) -> io::Result<Box<dyn Write>> {
        self.w.try_finish()?;
        self.w.finish()
    }
}

struct XzSink {
    w: xz2::write::XzEncoder<Box<dyn Write>>,
}

impl Write for XzSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

impl Compressor for XzSink {
    fn finish(mut self: Box<Self>) -> io::Result<Box<dyn Write>> {
        self.w.try_finish()?;
        self.w.finish()
    }
}

struct ZstdSink {
    w: zstd::Encoder<'static, Box<dyn Write>>,
}

impl Write for ZstdSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

impl Compressor for ZstdSink {
    fn finish(self: Box<Self>) -> io::Result<Box<dyn Write>> {
        self.w.finish()
    }
}

/// Creates a tarball of `source` at `dest` using `codec`.
///
/// Output is staged in a temporary file in the destination's directory and
/// moved into place only after both the tar structure and the compression
/// stream have been finished, so a failure cannot leave a truncated archive
/// at `dest`.
///
/// # Arguments
///
/// * `codec` - The compression stream to apply.
/// * `source` - Directory (archived as its contents) or file (archived under
///   its base name).
/// * `dest` - The archive path to produce; its parent must exist.
/// * `options` - Only `compression_level` is consulted here; overwrite and
///   dry-run policy are enforced by the registry before the backend runs.
///
/// # Returns
///
/// * `Result<PathBuf>` - The path of the written archive (`dest`).
pub(crate) fn create_tarball(
    codec: Codec,
    source: &Path,
    dest: &Path,
    options: &ArchiveOptions,
) -> Result<PathBuf> {
    let (file, guard) = fs::stage_in(staging_dir_for(dest))?;
    let sink = codec
        .wrap(Box::new(file), options.compression_level)
        .context("Failed to initialize compression stream")?;

    let mut builder = tar::Builder::new(sink);
    // Store symlinks as symlinks instead of chasing their targets.
    builder.follow_symlinks(false);

    if source.is_dir() {
        // Archive the directory's contents with paths relative to the archive
        // root, so `source/sub/file` appears as `sub/file` in the tar.
        builder.append_dir_all(".", source).with_context(|| {
            format!(
                "Failed to add directory '{}' contents to the tar archive",
                source.display()
            )
        })?;
    } else {
        let name = match source.file_name() {
            Some(name) => name,
            None => anyhow::bail!(PackError::FileSystem(format!(
                "Source path has no file name: {:?}",
                source
            ))),
        };
        builder
            .append_path_with_name(source, Path::new(name))
            .with_context(|| {
                format!("Failed to add file '{}' to the tar archive", source.display())
            })?;
    }

    // Finalize the TAR archive structure, then the compression stream.
    let sink = builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    sink.finish()
        .context("Failed to finish compression stream")?;

    guard
        .persist(dest)
        .with_context(|| format!("Failed to move staged archive into place at {:?}", dest))?;
    debug!("Wrote {} tarball at {:?}", codec.label(), dest);
    Ok(dest.to_path_buf())
}

/// The directory the staged temp file goes in: the destination's parent, or
/// the current directory for bare file names.
fn staging_dir_for(dest: &Path) -> &Path {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
