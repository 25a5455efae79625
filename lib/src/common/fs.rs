//! # PackRS Filesystem Helpers (`common::fs`)
//!
//! File: lib/src/common/fs.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem operations the archive
//! backends share: ensuring a destination directory exists before writing
//! into it, and staging archive output in a temporary file that is only
//! persisted once the backend finishes successfully.
//!
//! ## Architecture
//!
//! Two focused utilities:
//! - **`ensure_dir_exists`**: Checks if a directory exists at the given path. If not, it creates the directory, including any necessary parent directories (`fs::create_dir_all`). It also validates that if a path *does* exist, it is actually a directory.
//! - **`stage_in`**: Creates a named temporary file inside a given directory and returns its open handle together with its path guard. The caller writes the archive into the handle, then calls `TempPath::persist` to move it onto the real destination. Staging in the destination's own directory keeps the final step a same-filesystem rename.
//!
//! If a backend fails midway, the `TempPath` guard removes the partial file
//! on drop, so no truncated archive is ever left at the destination.
//!
//! ## Usage
//!
//! ```rust
//! use packrs::common::fs;
//! use packrs::Result;
//! use std::io::Write;
//! use std::path::Path;
//!
//! # fn run_example() -> Result<()> {
//! let dest = Path::new("./dist/site.tar.gz");
//!
//! // Make sure the destination directory exists.
//! fs::ensure_dir_exists(dest.parent().unwrap())?;
//!
//! // Stage the output beside the destination, then persist it.
//! let (mut file, guard) = fs::stage_in(dest.parent().unwrap())?;
//! file.write_all(b"archive bytes")?;
//! guard.persist(dest)?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{PackError, Result}; // Use standard Result and custom Error types
use anyhow::Context; // For adding context to errors
use std::fs; // Standard filesystem module
use std::path::Path; // Filesystem path type
use tempfile::TempPath; // Path guard that deletes the temp file on drop
use tracing::{debug, info}; // Logging utilities

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function attempts to create the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
/// If the path already exists but is not a directory (e.g., it's a file),
/// an error (`PackError::FileSystem`) is returned.
///
/// # Arguments
///
/// * `path` - A `&Path` reference to the directory path to ensure exists.
///
/// # Returns
///
/// * `Result<()>` - Returns `Ok(())` if the directory exists or was successfully created.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    // Check if the path exists in the filesystem.
    if !path.exists() {
        // Path does not exist, attempt to create it recursively.
        fs::create_dir_all(path)
            // Add context to any error occurring during directory creation.
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        // Log the successful creation.
        info!("Created directory: {:?}", path);
    }
    // Path exists, check if it's actually a directory.
    else if !path.is_dir() {
        // It exists but is not a directory (e.g., a file). Return an error.
        anyhow::bail!(PackError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    // Path exists and is already a directory.
    else {
        // Log that no action was needed (debug level).
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Creates a named temporary file inside `dir` for staged archive output.
///
/// The returned pair is the open file handle (for the backend to write
/// through) and the `TempPath` guard. On success the caller persists the
/// guard onto the destination path; on failure dropping the guard removes
/// the partial file.
///
/// # Arguments
///
/// * `dir` - The directory to create the temporary file in. Using the
///   destination's own directory keeps `persist` a plain rename.
///
/// # Returns
///
/// * `Result<(fs::File, TempPath)>` - The open handle and its path guard.
///
/// # Errors
///
/// Returns an `Err` if the temporary file cannot be created (e.g., the
/// directory does not exist or is not writable).
pub fn stage_in(dir: &Path) -> Result<(fs::File, TempPath)> {
    // Build a recognizable temp name so interrupted runs are easy to spot.
    let staged = tempfile::Builder::new()
        .prefix(".packrs-")
        .suffix(".partial")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create staging file in {:?}", dir))?;
    debug!("Staging archive output at {:?}", staged.path());
    // Split into the open handle and the delete-on-drop path guard.
    Ok(staged.into_parts())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*; // Import items from the parent module (fs.rs).
    use std::io::Write;
    use tempfile::tempdir; // Create temporary directories for isolated testing.

    /// Test `ensure_dir_exists` when the directory needs to be created, including parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        // Setup: Create a temporary base directory.
        let base_dir = tempdir()?;
        // Define a path for a new directory structure *within* the base directory.
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        // Action: Call the function to ensure the directory exists.
        ensure_dir_exists(&new_dir)?;
        // Assert: Verify the directory now exists and is actually a directory.
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the directory already exists.
    #[test]
    fn test_ensure_dir_exists_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        let existing_dir = base_dir.path().join("existing");
        fs::create_dir(&existing_dir)?;
        // Action: Should be a no-op and succeed.
        ensure_dir_exists(&existing_dir)?;
        assert!(existing_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the target path exists but is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        // Action: Call the function trying to ensure this path is a directory.
        let result = ensure_dir_exists(&file_path);
        // Assert: Expect an error because the path exists but is not a directory.
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    /// Test that staged output lands in the requested directory and persists cleanly.
    #[test]
    fn test_stage_in_persist() -> Result<()> {
        let base_dir = tempdir()?;
        let dest = base_dir.path().join("out.tar");
        // Action: Stage, write, persist.
        let (mut file, guard) = stage_in(base_dir.path())?;
        assert_eq!(guard.parent(), Some(base_dir.path()));
        file.write_all(b"payload")?;
        drop(file);
        guard.persist(&dest)?;
        // Assert: The destination holds the staged bytes.
        assert_eq!(fs::read(&dest)?, b"payload");
        Ok(())
    }

    /// Test that dropping the guard removes the staged file.
    #[test]
    fn test_stage_in_cleans_up_on_drop() -> Result<()> {
        let base_dir = tempdir()?;
        let (file, guard) = stage_in(base_dir.path())?;
        let staged_path = guard.to_path_buf();
        assert!(staged_path.exists());
        drop(file);
        drop(guard);
        // Assert: The partial file is gone.
        assert!(!staged_path.exists());
        Ok(())
    }
}
