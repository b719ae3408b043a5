//! Optional user defaults at `~/.ax/config.yaml`.
//!
//! Every field is optional; anything missing keeps its built-in default.
//! Command-line flags override values loaded here.
//!
//! ```yaml
//! compression:
//!   volume_size: 50
//!   block_size: m
//! paths:
//!   archive_in: /home/me/notes
//!   archive_out: /tmp/ax_out
//! git:
//!   repo: git@github.com:me/backups.git
//! ```
//!
//! # API pattern
//!
//! - `load_at(home)` — explicit home; used in tests with `TempDir`
//! - `load()` — derives home from `dirs::home_dir()`, delegates to `load_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{CompressionOptions, MAX_COMPRESSION_LEVEL};

/// Placeholder repository; publishing is only considered requested when
/// the configured repository differs from it.
pub const PLACEHOLDER_GIT_REPO: &str = "git@github.com:USER/REPOSITORY.git";

/// Root of all parsed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub compression: CompressionOptions,
    pub paths: PathDefaults,
    pub git: GitDefaults,
}

/// Default locations for every stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDefaults {
    pub archive_in: PathBuf,
    pub archive_out: PathBuf,
    pub archive_name: String,
    pub extract: PathBuf,
    pub encrypt_in: PathBuf,
    pub decrypt_in: PathBuf,
}

impl Default for PathDefaults {
    fn default() -> Self {
        Self {
            archive_in: PathBuf::from("../tmp_to_archive"),
            archive_out: PathBuf::from("../tmp_archive_out"),
            archive_name: "new_archive".to_string(),
            extract: PathBuf::from("../tmp_archive_out"),
            encrypt_in: PathBuf::from("../tmp_archive_out"),
            decrypt_in: PathBuf::from("../tmp_archive_out"),
        }
    }
}

/// Publishing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitDefaults {
    pub repo: String,
    /// Commit message; a timestamped one is generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

impl Default for GitDefaults {
    fn default() -> Self {
        Self {
            repo: PLACEHOLDER_GIT_REPO.to_string(),
            commit_message: None,
        }
    }
}

/// `<home>/.ax/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".ax").join("config.yaml")
}

/// Load settings from `<home>/.ax/config.yaml`, or defaults if it is absent.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    check(&path, &config)?;
    Ok(config)
}

fn check(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let level = config.compression.compression_level;
    if level > MAX_COMPRESSION_LEVEL {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            field: "compression.compression_level",
            reason: format!("{level} is outside 0..={MAX_COMPRESSION_LEVEL}"),
        });
    }
    Ok(())
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
