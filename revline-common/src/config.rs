//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "revline.db";

/// Outbound registry endpoints and limits.
///
/// The defaults point at the public government registries; tests and
/// staging environments override the base URLs.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the VIN decode registry (vPIC-compatible)
    pub vpic_base_url: String,
    /// Base URL of the recall campaign registry
    pub recall_base_url: String,
    /// Per-request timeout for all outbound registry calls
    pub request_timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            vpic_base_url: "https://vpic.nhtsa.dot.gov/api".to_string(),
            recall_base_url: "https://api.nhtsa.gov".to_string(),
            request_timeout: Duration::from_secs(12),
        }
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Resolve the SQLite database path beneath a root folder
pub fn database_path(root_folder: &std::path::Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("revline").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/revline/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("revline"))
        .unwrap_or_else(|| PathBuf::from("./revline_data"))
}
