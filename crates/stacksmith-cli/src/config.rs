//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config` path, or the default location if present)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values applied when the matching flag is omitted.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Package manager name (`npm`, `pnpm`, `bun`).
    pub package_manager: Option<String>,
    /// Whether generated projects get a git repository.
    pub git: Option<bool>,
    /// Whether to install dependencies after generation.
    pub install: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template directory used when `--templates` is not passed.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `--config` path must exist and parse; the default
    /// location is optional and silently skipped when absent.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &PathBuf) -> CliResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stacksmith.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stacksmith", "stacksmith")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stacksmith.toml"))
    }
}
