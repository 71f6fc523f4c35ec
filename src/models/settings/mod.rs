// Settings module
// Application configuration loaded from config.toml

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::countdown::DEFAULT_TARGET_ISO;
use crate::services::countdown::{clamp_tick_interval, DEFAULT_TICK_INTERVAL_MS};
use crate::utils::date::parse_iso_instant;

pub const DEFAULT_SHARE_BASE_URL: &str = "https://example.com/countdown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page that share links point at
    pub share_base_url: String,
    /// Refresh cadence while the countdown is running
    pub tick_interval_ms: u64,
    /// Target preset used before anything has been saved
    pub default_target: String,
    pub notifications_enabled: bool,
    pub play_sound: bool,
    /// Overrides the snapshot location in the data directory
    pub storage_path: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            default_target: DEFAULT_TARGET_ISO.to_string(),
            notifications_enabled: true,
            play_sound: true,
            storage_path: None,
            window_width: 560.0,
            window_height: 720.0,
        }
    }
}

impl AppConfig {
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(clamp_tick_interval(self.tick_interval_ms))
    }

    /// Preset target; an empty value means start without a target.
    pub fn default_target(&self) -> Option<DateTime<Utc>> {
        if self.default_target.trim().is_empty() {
            return None;
        }
        let parsed = parse_iso_instant(&self.default_target);
        if parsed.is_none() {
            log::warn!(
                "Invalid default_target '{}' in config, starting without a target",
                self.default_target
            );
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval(), std::time::Duration::from_millis(250));
        assert_eq!(
            config.default_target(),
            Some(Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap())
        );
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            share_base_url = "https://countdown.example.org/"
            tick_interval_ms = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.share_base_url, "https://countdown.example.org/");
        assert_eq!(config.tick_interval(), std::time::Duration::from_millis(50));
        assert!(config.notifications_enabled);
    }

    #[test]
    fn test_blank_default_target_means_unset() {
        let config = AppConfig {
            default_target: String::new(),
            ..AppConfig::default()
        };
        assert_eq!(config.default_target(), None);

        let config = AppConfig {
            default_target: "soon".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.default_target(), None);
    }
}
