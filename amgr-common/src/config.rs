//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. OS-dependent compiled default (fallback)
//!
//! Command-line and environment values arrive together as [`ConfigOverrides`];
//! the server's argument parser is responsible for merging those two.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name used under the platform config/data folders
pub const APP_DIR_NAME: &str = "artist-manager";

/// Database file name inside the data folder
pub const DATABASE_FILE_NAME: &str = "artist_manager.db";

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Compiled fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            database_path: default_data_folder().join(DATABASE_FILE_NAME),
            host: "127.0.0.1".to_string(),
            port: 4000,
            max_connections: 10,
            acquire_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

/// Values taken from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub static_dir: Option<PathBuf>,
}

/// Connection pool sizing
///
/// Requests beyond `max_connections` queue on the pool until a connection is
/// released or `acquire_timeout` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        Self {
            max_connections: defaults.max_connections,
            acquire_timeout: Duration::from_secs(defaults.acquire_timeout_secs),
        }
    }
}

/// Fully resolved server settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub pool: PoolSettings,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Settings {
    /// Merge overrides, file values and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::for_current_platform();

        let max_connections = overrides
            .max_connections
            .or(file.max_connections)
            .unwrap_or(defaults.max_connections);
        if max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        let acquire_timeout_secs = overrides
            .acquire_timeout_secs
            .or(file.acquire_timeout_secs)
            .unwrap_or(defaults.acquire_timeout_secs);
        if acquire_timeout_secs == 0 {
            return Err(Error::Config(
                "acquire_timeout_secs must be at least 1".to_string(),
            ));
        }

        let host = overrides
            .host
            .or(file.host)
            .unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(Error::Config("host cannot be empty".to_string()));
        }

        Ok(Self {
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or(defaults.database_path),
            host,
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            static_dir: overrides.static_dir.or(file.static_dir),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default location of the TOML config file for the platform
///
/// Linux: `~/.config/artist-manager/config.toml`, falling back to
/// `/etc/artist-manager/config.toml` when only the system file exists.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"));

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR_NAME).join("config.toml");
        if let Some(path) = &user_config {
            if path.exists() {
                return user_config;
            }
        }
        if system_config.exists() {
            return Some(system_config);
        }
    }

    user_config
}

/// Load the TOML config file
///
/// A missing file is not an error: an empty config is returned so compiled
/// defaults apply. A file that exists but cannot be parsed is a
/// configuration error. Runs before logging is set up, so callers report
/// which case applied.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Get OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/artist-manager (or /var/lib/artist-manager for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/var/lib").join(APP_DIR_NAME))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support").join(APP_DIR_NAME))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData").join(APP_DIR_NAME))
    } else {
        PathBuf::from("./artist_manager_data")
    }
}
