use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::settings::AppConfig;

/// Reads the application configuration from a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. A missing file yields the defaults.
    pub fn get(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {}", self.path.display()))?;
        let config = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config from {}", self.path.display()))?;
        Ok(config)
    }

    /// Load the configuration, falling back to defaults on any error.
    pub fn get_or_default(&self) -> AppConfig {
        match self.get() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let service = SettingsService::new(&path);
        assert_eq!(service.path(), path.as_path());
        assert_eq!(service.get().unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "play_sound = false\nwindow_width = 800.0\n").unwrap();

        let config = SettingsService::new(&path).get().unwrap();
        assert!(!config.play_sound);
        assert_eq!(config.window_width, 800.0);
    }

    #[test]
    fn malformed_config_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_interval_ms = \"fast\"").unwrap();

        let service = SettingsService::new(&path);
        assert!(service.get().is_err());
        assert_eq!(service.get_or_default(), AppConfig::default());
    }
}
