//! # PackRS Configuration System (`core::config`)
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for the PackRS CLI, handling
//! loading, merging, validation, and access to configuration data. It supports
//! a multi-level configuration approach that combines defaults, user settings,
//! and project-specific overrides.
//!
//! ## Architecture
//!
//! The configuration system follows these principles:
//! - Configuration is loaded from multiple sources in order of precedence
//! - Configuration is validated for correctness before use
//! - Structured data models ensure type safety
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.packrs.toml` in current directory or ancestors
//! 2. User-specific `~/.config/packrs/config.toml`
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! A configuration file setting archive defaults:
//!
//! ```toml
//! [defaults]
//! compression_level = 9
//! overwrite = false
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the handlers that need it.
//!
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use packrs::{PackError, Result}; // Error and Result types from the library crate
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub defaults: ArchiveDefaults,
    // Add other top-level configuration sections here
}

/// Default archive creation settings applied when the command line leaves them unset.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveDefaults {
    /// Compression level handed to backends. `None` lets each codec pick its own default.
    #[serde(default)]
    pub compression_level: Option<u32>,
    /// Whether an existing destination file may be replaced (defaults to true).
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for ArchiveDefaults {
    fn default() -> Self {
        ArchiveDefaults {
            compression_level: None,
            overwrite: default_overwrite(),
        }
    }
}

fn default_overwrite() -> bool {
    true
}

/// Highest compression level any built-in backend understands (zstd tops out at 22).
/// Individual codecs clamp further; this bound only rejects obvious typos early.
const MAX_COMPRESSION_LEVEL: u32 = 22;

const PROJECT_CONFIG_FILENAME: &str = ".packrs.toml";

/// Loads the effective configuration from user and project files.
///
/// Project settings override user settings, which override built-in defaults.
/// The merged result is validated before being returned.
///
/// # Returns
///
/// * `Result<Config>` - The merged, validated configuration.
///
/// # Errors
///
/// Returns an `Err` if a configuration file exists but cannot be read or
/// parsed, or if the merged configuration fails validation.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "PackRS", "packrs") {
        let config_dir = proj_dirs.config_dir();
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file (.packrs.toml) found in current directory or ancestors."
        );
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        let git_dir = path.join(".git");
        if project_config.exists() && project_config.is_file() {
            return Ok(Some(project_config));
        }
        if git_dir.exists() && git_dir.is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.defaults.compression_level = project_cfg
        .defaults
        .compression_level
        .or(user.defaults.compression_level);
    merged.defaults.overwrite = if project_cfg.defaults.overwrite != default_overwrite() {
        project_cfg.defaults.overwrite
    } else {
        user.defaults.overwrite
    };
    merged
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(level) = config.defaults.compression_level {
        if level > MAX_COMPRESSION_LEVEL {
            return Err(anyhow!(PackError::Config(format!(
                "Configured compression_level {} is out of range (0-{}).",
                level, MAX_COMPRESSION_LEVEL
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [defaults]
            compression_level = 9
            overwrite = false
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.defaults.compression_level, Some(9));
        assert!(!config.defaults.overwrite);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").expect("Failed to parse TOML");
        assert_eq!(config.defaults.compression_level, None);
        assert!(config.defaults.overwrite); // Default overwrite
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let toml_content = r#"
            [defaults]
            compresion_level = 9
        "#;
        let result: std::result::Result<Config, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(3),
                overwrite: true,
            },
        };
        let project = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(9),
                overwrite: false,
            },
        };

        let merged = merge_configs(user, Some(project));

        assert_eq!(merged.defaults.compression_level, Some(9));
        assert!(!merged.defaults.overwrite);
    }

    #[test]
    fn test_merge_falls_back_to_user_values() {
        let user = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(7),
                overwrite: false,
            },
        };
        // Project config present but silent on both settings.
        let project = Config::default();

        let merged = merge_configs(user, Some(project));

        assert_eq!(merged.defaults.compression_level, Some(7));
        assert!(!merged.defaults.overwrite);
    }

    #[test]
    fn test_merge_without_project_config() {
        let user = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(5),
                overwrite: true,
            },
        };
        let merged = merge_configs(user.clone(), None);
        assert_eq!(merged.defaults, user.defaults);
    }

    #[test]
    fn test_validate_config_valid() {
        let config = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(22),
                overwrite: true,
            },
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_level_out_of_range() {
        let config = Config {
            defaults: ArchiveDefaults {
                compression_level: Some(23),
                overwrite: true,
            },
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn test_load_config_from_path_round_trip() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[defaults]\ncompression_level = 6\n")?;

        let config = load_config_from_path(&config_path)?;

        assert_eq!(config.defaults.compression_level, Some(6));
        assert!(config.defaults.overwrite);
        Ok(())
    }

    #[test]
    fn test_load_config_from_path_bad_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[defaults\ncompression_level = 6").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
    }

    #[test]
    #[ignore] // Integration test requires isolating HOME and current_dir from the host
    fn test_load_config_integration_with_files() {}
}
