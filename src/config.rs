//! Installation-level configuration.
//!
//! Stored as a machine-readable TOML file under the workspace root:
//!   %APPDATA%/CivicBase/config/config.toml on Windows
//!   $XDG_DATA_HOME/CivicBase/config/config.toml on Linux
//!   ~/Library/Application Support/CivicBase/config/config.toml on macOS
//!
//! The config carries per-install knobs the UI layer consults: the autosave
//! debounce interval and legacy-migration behavior.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Identity key of the user last active on this install.
    pub last_active_owner_id: Option<String>,
    #[serde(default)]
    pub autosave: AutosaveSettings,
    #[serde(default)]
    pub migration: MigrationSettings,
}

/// Draft autosave preferences. The repository provides no server-side
/// serialization, so the caller must debounce autosave calls itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveSettings {
    /// Minimum quiet period between autosave writes for one form.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

const fn default_debounce_ms() -> u64 {
    1_500
}

/// Legacy-cache reconciliation preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Whether the legacy cache is cleared once a migration call returns.
    #[serde(default = "default_clear_after_migrate")]
    pub clear_legacy_after_migrate: bool,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            clear_legacy_after_migrate: default_clear_after_migrate(),
        }
    }
}

const fn default_clear_after_migrate() -> bool {
    true
}

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the root directory where CivicBase stores data.
///
/// Order of precedence:
/// 1. `CIVICBASE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("CIVICBASE_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("CivicBase"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub applications_path: PathBuf,
    pub profiles_dir: PathBuf,
    pub events_path: PathBuf,
}

impl WorkspacePaths {
    pub fn under(root: PathBuf) -> Self {
        Self {
            applications_path: root.join("applications.json"),
            profiles_dir: root.join("profiles"),
            events_path: root.join("events.jsonl"),
            root,
        }
    }
}

/// Ensures the workspace structure exists and returns its paths.
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let paths = WorkspacePaths::under(workspace_root()?);
    fs::create_dir_all(&paths.root)?;
    fs::create_dir_all(&paths.profiles_dir)?;
    Ok(paths)
}
