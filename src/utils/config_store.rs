//! ConfigStore - Local Configuration Storage
//!
//! The app config (API endpoint, UI preferences, persisted capability
//! view) lives as TOML in the per-user data directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

/// Config file name inside the app data dir
pub const CONFIG_FILE: &str = "config.toml";

/// Get the application data directory, creating it if needed
pub fn app_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "ctr-platform", "ctr-admin-gui")
        .context("Could not determine a local data directory")?;
    let dir = dirs.data_local_dir().to_path_buf();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Load a TOML config file; missing files yield the default
pub fn load_config<T: DeserializeOwned + Default>(filename: &str) -> Result<T> {
    let path = app_data_dir()?.join(filename);

    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Save a TOML config file
pub fn save_config<T: Serialize>(filename: &str, config: &T) -> Result<()> {
    let path = app_data_dir()?.join(filename);
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

/// Delete a config file
pub fn delete_config(filename: &str) -> Result<()> {
    let path = app_data_dir()?.join(filename);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::config::AppConfig;

    #[test]
    fn test_app_config_toml_round_trip() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://example.org/api".to_string();
        config.capability_view.page = 3;
        config.capability_view.sort_field = "CapabilityName".to_string();

        let encoded = toml::to_string_pretty(&config).expect("encode");
        let decoded: AppConfig = toml::from_str(&encoded).expect("decode");
        assert_eq!(decoded.api.base_url, "https://example.org/api");
        assert_eq!(decoded.capability_view.page, 3);
        assert_eq!(decoded.capability_view.sort_field, "CapabilityName");
    }
}
