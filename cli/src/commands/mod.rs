//! # PackRS Command Modules (`commands`)
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the commands that comprise the PackRS CLI. It serves
//! as the central point for importing and re-exporting command modules to make
//! them accessible to the main application entry point (`main.rs`).
//!
//! ## Architecture
//!
//! The commands are flat rather than hierarchical:
//! - Each command lives in its own module with an arguments struct and a handler
//! - All modules are made public for access from `main.rs`
//!
//! ## Commands
//!
//! - `create`: Pack a file or directory into an archive chosen by the destination suffix
//! - `formats`: List every registered archive format and its suffixes
//!
//! Each command defines its own arguments structure and handler function
//! to process those arguments and implement the command's functionality.
//!

/// Command for creating archives (`packrs create <ARCHIVE> <SOURCE>`).
pub mod create;
/// Command for listing registered archive formats (`packrs formats`).
pub mod formats;
