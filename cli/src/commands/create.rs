//! # PackRS Create Command (`commands::create`)
//!
//! File: cli/src/commands/create.rs
//!
//! ## Overview
//!
//! This module implements the `packrs create` command, which packs a file or
//! directory into an archive. It handles:
//! - Selecting the archive format from the destination path's suffix
//! - Merging command-line flags with configured archive defaults
//! - Delegating the actual packing to the `packrs` library
//! - Reporting the produced archive path (or the dry-run outcome)
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Load the PackRS configuration for default compression level and overwrite policy
//! 2. Merge those defaults with the parsed command-line flags into `ArchiveOptions`
//! 3. Call `packrs::make_archive`, which resolves the format and runs the backend
//! 4. Print the produced path on success
//!
//! ## Examples
//!
//! Usage:
//!
//! ```bash
//! # Pack a directory into a gzip-compressed tarball.
//! packrs create backup.tar.gz ./photos
//!
//! # Pack at maximum compression, refusing to replace an existing file.
//! packrs create --level 9 --no-overwrite site.zip ./public
//!
//! # Check what would happen without writing anything.
//! packrs create --dry-run release.tar.zst ./target/dist
//! ```
//!
//! Example output:
//!
//! ```text
//! Created archive: backup.tar.gz
//! ```
//!
use crate::core::config::{self, Config}; // Access configuration loading functionality.
use anyhow::Context; // For adding contextual information to errors.
use clap::Parser; // For parsing command-line arguments.
use packrs::{ArchiveOptions, Result}; // Archive options and the standard Result type.
use std::path::PathBuf; // Filesystem path manipulation types.
use tracing::{debug, info}; // Logging framework utilities.

/// # Create Command Arguments (`CreateArgs`)
///
/// Defines the command-line arguments accepted by the `packrs create` subcommand.
/// The destination's suffix (e.g. `.tar.gz`, `.zip`) selects the archive format;
/// run `packrs formats` to see every registered suffix.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Destination archive path. Its suffix selects the format (e.g. `backup.tar.gz`).
    pub archive: PathBuf,

    /// File or directory to pack into the archive.
    pub source: PathBuf,

    /// Compression level for the selected codec. Overrides the configured
    /// default; out-of-range values are clamped by the backend.
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Fail if the destination file already exists instead of replacing it.
    #[arg(long)]
    pub no_overwrite: bool,

    /// Validate the format, source, and destination without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

// --- Functions ---

/// # Handle Create Command (`handle_create`)
///
/// The main handler function for the `packrs create` command. It merges the
/// parsed arguments with configured defaults and hands the actual archive
/// creation to the `packrs` library.
///
/// ## Workflow:
/// 1.  Logs the initiation of the command.
/// 2.  Loads the PackRS configuration using `config::load_config()` for default archive settings.
/// 3.  Builds the effective `ArchiveOptions` via `archive_options()` (command line wins over configuration).
/// 4.  Calls `packrs::make_archive()`, which resolves the destination suffix to a format and runs its backend.
/// 5.  Prints the produced archive path, or a notice when `--dry-run` skipped the write.
///
/// ## Arguments
///
/// * `args`: The parsed `CreateArgs` struct containing destination, source, and option flags.
///
/// ## Returns
///
/// * `Result<()>`: Returns `Ok(())` if the archive was created (or the dry run passed validation).
/// * `Err`: Returns an `Err` if configuration loading fails, no format matches the destination
///   suffix, the source is missing, the destination conflicts, or the backend fails.
pub fn handle_create(args: CreateArgs) -> Result<()> {
    info!(
        "Handling create command for destination '{}'...",
        args.archive.display()
    );

    // Load configuration for default compression level and overwrite policy.
    let cfg = config::load_config().context("Failed to load PackRS configuration")?;
    // Merge configuration defaults with the command-line flags.
    let options = archive_options(&args, &cfg);
    debug!("Effective archive options: {:?}", options);

    // The library resolves the suffix, validates paths, and runs the backend.
    let produced =
        packrs::make_archive(&args.archive, &args.source, &options).with_context(|| {
            format!(
                "Failed to create archive '{}' from '{}'",
                args.archive.display(),
                args.source.display()
            )
        })?;

    if options.dry_run {
        println!(
            "Dry run: would create '{}' from '{}'.",
            produced.display(),
            args.source.display()
        );
    } else {
        println!("Created archive: {}", produced.display());
    }

    Ok(()) // Indicate successful execution.
}

/// # Build Archive Options (`archive_options`)
///
/// Merges parsed command-line flags with configured defaults into the
/// `ArchiveOptions` handed to the library. Precedence per setting:
///
/// - Compression level: `--level` flag, then `defaults.compression_level`
///   from configuration, then the codec's own default.
/// - Overwrite: replacing an existing destination is allowed only when the
///   configuration permits it *and* `--no-overwrite` was not passed.
/// - Dry run: taken directly from the `--dry-run` flag.
///
/// ## Arguments
///
/// * `args`: The parsed command-line arguments.
/// * `cfg`: The loaded configuration supplying defaults.
///
/// ## Returns
///
/// * `ArchiveOptions`: The effective options for this invocation.
fn archive_options(args: &CreateArgs, cfg: &Config) -> ArchiveOptions {
    let mut options = ArchiveOptions::new()
        .with_overwrite(cfg.defaults.overwrite && !args.no_overwrite)
        .with_dry_run(args.dry_run);
    if let Some(level) = args.level.or(cfg.defaults.compression_level) {
        options = options.with_compression_level(level);
    }
    options
}
