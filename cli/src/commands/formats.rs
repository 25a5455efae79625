//! # PackRS Formats Command (`commands::formats`)
//!
//! File: cli/src/commands/formats.rs
//!
//! ## Overview
//!
//! This module implements the `packrs formats` command, which displays every
//! archive format registered in the process-wide registry. It handles:
//! - Reading the registry's suffix table (built-ins plus any custom formats)
//! - Formatting and displaying the suffix, format name, and description columns
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Snapshot the default registry's entries (already sorted by suffix)
//! 2. Flatten each entry into a (suffix, name, description) row
//! 3. Format and display the results in a tabular format
//!
//! ## Examples
//!
//! Usage:
//!
//! ```bash
//! packrs formats
//! ```
//!
//! Example output:
//!
//! ```text
//! Registered archive formats:
//!
//! Suffix   | Format | Description
//! ---------+--------+-----------------------------------------
//! .tar     | tar    | uncompressed tar file
//! .tar.bz2 | bztar  | bzip2-compressed tar file
//! .tar.gz  | gztar  | gzip-compressed tar file
//! .zip     | zip    | ZIP file
//!
//! Found 13 registered suffix(es).
//! ```
//!
use clap::Parser; // For parsing command-line arguments.
use packrs::{FormatHandler, Result}; // Registry handler type and the standard Result type.
use std::sync::Arc;
use tracing::info; // Logging framework utilities.

/// # Formats Command Arguments (`FormatsArgs`)
///
/// Defines the command-line arguments accepted by the `packrs formats` subcommand.
/// Currently, this command doesn't require any specific arguments, but the struct
/// exists for structural consistency within the `clap` framework and allows for
/// potential future additions (like filtering by format name) without breaking changes.
#[derive(Parser, Debug)]
pub struct FormatsArgs {}

// --- Functions ---

/// # Handle Formats Command (`handle_formats`)
///
/// The main handler function for the `packrs formats` command. It lists every
/// suffix the default registry currently dispatches on, together with the
/// owning format's name and description.
///
/// ## Workflow:
/// 1.  Logs the initiation of the command.
/// 2.  Snapshots the default registry via `packrs::default_registry().entries()`.
/// 3.  Flattens the entries into display rows with `format_rows()`.
/// 4.  Calls `print_format_table()` to format and print the rows.
///
/// ## Arguments
///
/// * `_args`: The parsed `FormatsArgs` struct. This argument is currently unused as the command takes no options.
///
/// ## Returns
///
/// * `Result<()>`: Returns `Ok(())` once the table has been printed.
pub fn handle_formats(_args: FormatsArgs) -> Result<()> {
    info!("Handling formats command...");

    // Snapshot the registry; entries come back sorted by suffix.
    let entries = packrs::default_registry().entries();
    let rows = format_rows(&entries);

    print_format_table(&rows);

    Ok(()) // Indicate successful execution.
}

/// # Build Format Rows (`format_rows`)
///
/// Flattens registry entries into `(suffix, format name, description)` tuples
/// ready for tabular display. The input is already sorted by suffix, and that
/// order is preserved.
///
/// ## Arguments
///
/// * `entries`: The registry snapshot, one `(suffix, handler)` pair per registered suffix.
///
/// ## Returns
///
/// * `Vec<(String, String, String)>`: One display row per registered suffix.
fn format_rows(entries: &[(String, Arc<FormatHandler>)]) -> Vec<(String, String, String)> {
    entries
        .iter()
        .map(|(suffix, handler)| {
            (
                suffix.clone(),
                handler.name().to_string(),
                handler.description().to_string(),
            )
        })
        .collect()
}

/// # Print Format Table (`print_format_table`)
///
/// Takes the prepared display rows and prints them to the console in a
/// formatted table. Handles the (unusual) case of an empty registry with a
/// pointer at the registration API instead of a bare empty table.
///
/// ## Arguments
///
/// * `rows`: A slice of `(suffix, format name, description)` tuples, sorted by suffix.
fn print_format_table(rows: &[(String, String, String)]) {
    // --- Handle Empty Case ---
    if rows.is_empty() {
        println!("\nNo archive formats are registered.");
        println!(
            "Built-in formats register automatically; custom formats can be added via the packrs library."
        );
        return; // Exit the function early.
    }

    // --- Calculate Column Widths ---
    // Size the "Suffix" and "Format" columns to their longest values.
    let suffix_width = rows
        .iter()
        .map(|(suffix, _, _)| suffix.len())
        .max()
        .unwrap_or(8) // Fallback width if list is empty (defensive).
        .clamp(8, 30); // Ensure minimum 8, maximum 30.
    let name_width = rows
        .iter()
        .map(|(_, name, _)| name.len())
        .max()
        .unwrap_or(6)
        .clamp(6, 20);

    // --- Print Table Header ---
    println!("\nRegistered archive formats:\n");
    println!(
        "{:<sw$} | {:<nw$} | Description",
        "Suffix",
        "Format",
        sw = suffix_width,
        nw = name_width
    );
    // Separator line; the description part uses a fixed width for simplicity.
    println!(
        "{:-<sw$}-+-{:-<nw$}-+-{:-<41}",
        "",
        "",
        "",
        sw = suffix_width,
        nw = name_width
    );

    // --- Print Table Rows ---
    for (suffix, name, description) in rows {
        println!(
            "{:<sw$} | {:<nw$} | {}",
            suffix,
            name,
            description,
            sw = suffix_width,
            nw = name_width
        );
    }

    // --- Print Footer ---
    println!("\nFound {} registered suffix(es).", rows.len());
}
