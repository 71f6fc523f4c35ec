// Countdown configuration model
// The single entity edited by the form, persisted as a snapshot and encoded in share links

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::date::{format_iso_instant, parse_iso_instant};

/// Preset target used when nothing has been saved yet (Oct 8, 2025, UTC midnight).
pub const DEFAULT_TARGET_ISO: &str = "2025-10-08T00:00:00.000Z";

/// Cosmetic variant selector for the countdown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Default,
    Romantic,
    Beach,
    Party,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Romantic, Theme::Beach, Theme::Party];

    /// Value used in snapshots and share links.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Romantic => "romantic",
            Theme::Beach => "beach",
            Theme::Party => "party",
        }
    }

    /// Human readable name for the theme selector.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Romantic => "Romantic",
            Theme::Beach => "Beach",
            Theme::Party => "Party",
        }
    }

    /// Parse a stored or shared theme value, treating unknown values as `Default`.
    pub fn from_str_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            if !value.trim().is_empty() {
                log::warn!("Unknown theme '{}', using default", value);
            }
            Theme::Default
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "romantic" => Ok(Theme::Romantic),
            "beach" => Ok(Theme::Beach),
            "party" => Ok(Theme::Party),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Where the background image comes from. Only one source can be active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    None,
    /// Uploaded image stored inline as a `data:` URL
    Embedded(String),
    /// Image referenced by an external URL
    External(String),
}

impl Background {
    pub fn is_none(&self) -> bool {
        matches!(self, Background::None)
    }

    /// External URL, if any. Embedded images never leave the machine.
    pub fn external_url(&self) -> Option<&str> {
        match self {
            Background::External(url) => Some(url),
            _ => None,
        }
    }

    pub fn embedded_data_url(&self) -> Option<&str> {
        match self {
            Background::Embedded(data) => Some(data),
            _ => None,
        }
    }
}

/// In-memory configuration for the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountdownConfig {
    target: Option<DateTime<Utc>>,
    pub event_name: String,
    pub partner_name: String,
    pub done_message: String,
    background: Background,
    pub theme: Theme,
}

impl CountdownConfig {
    /// Configuration preset to the given target with every other field empty.
    pub fn with_target(target: Option<DateTime<Utc>>) -> Self {
        let mut config = Self::default();
        config.set_target(target);
        config
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Targets are kept at millisecond precision so they survive ISO round-trips.
    pub fn set_target(&mut self, target: Option<DateTime<Utc>>) {
        self.target = target.map(|t| t.trunc_subsecs(3));
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Point the background at an external URL.
    ///
    /// A non-empty URL replaces any uploaded image. An empty URL only clears
    /// an external background, an uploaded image stays in place.
    pub fn set_background_url(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            if matches!(self.background, Background::External(_)) {
                self.background = Background::None;
            }
        } else {
            self.background = Background::External(url.to_string());
        }
    }

    /// Use an uploaded image, replacing any external URL.
    pub fn set_embedded_background(&mut self, data_url: String) {
        self.background = if data_url.is_empty() {
            Background::None
        } else {
            Background::Embedded(data_url)
        };
    }

    pub fn clear_background(&mut self) {
        self.background = Background::None;
    }

    /// Window title: "Event — Partner" or "Countdown" when no event is named.
    pub fn title(&self) -> String {
        if self.event_name.is_empty() {
            "Countdown".to_string()
        } else {
            format!("{} — {}", self.event_name, self.partner_name)
        }
    }

    /// Text shown once the countdown has elapsed.
    pub fn done_text(&self) -> String {
        let message = if self.done_message.is_empty() {
            "Time's up!"
        } else {
            self.done_message.as_str()
        };
        if self.partner_name.is_empty() {
            message.to_string()
        } else {
            format!("{} — {}", message, self.partner_name)
        }
    }

    /// Build a configuration from a persisted snapshot.
    ///
    /// A snapshot without a `targetIso` key keeps `default_target`; an explicit
    /// `null` means the countdown was reset. An unreadable target is dropped
    /// with a warning. When a snapshot carries both an uploaded image and an
    /// external URL the uploaded image wins.
    pub fn from_snapshot(
        snapshot: CountdownSnapshot,
        default_target: Option<DateTime<Utc>>,
    ) -> Self {
        let target = match snapshot.target_iso {
            None => default_target,
            Some(None) => None,
            Some(Some(iso)) => {
                let parsed = parse_iso_instant(&iso);
                if parsed.is_none() {
                    log::warn!("Ignoring unreadable saved target '{}'", iso);
                }
                parsed
            }
        };

        let background = if !snapshot.bg_data_url.is_empty() {
            Background::Embedded(snapshot.bg_data_url)
        } else if !snapshot.bg_url.trim().is_empty() {
            Background::External(snapshot.bg_url.trim().to_string())
        } else {
            Background::None
        };

        let mut config = Self {
            target: None,
            event_name: snapshot.event_name,
            partner_name: snapshot.partner,
            done_message: snapshot.done_message,
            background,
            theme: Theme::from_str_lossy(&snapshot.theme),
        };
        config.set_target(target);
        config
    }

    pub fn to_snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot::from(self)
    }
}

/// Serialized form of [`CountdownConfig`] kept in local storage.
///
/// Every field is always written; unset strings are empty and an unset
/// target is `null`. Keys missing on read take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownSnapshot {
    /// Outer `None`: key absent. `Some(None)`: saved as `null`.
    #[serde(default, deserialize_with = "present_or_null")]
    pub target_iso: Option<Option<String>>,
    pub event_name: String,
    pub partner: String,
    pub done_message: String,
    pub bg_data_url: String,
    pub bg_url: String,
    pub theme: String,
}

impl Default for CountdownSnapshot {
    fn default() -> Self {
        Self {
            target_iso: Some(None),
            event_name: String::new(),
            partner: String::new(),
            done_message: String::new(),
            bg_data_url: String::new(),
            bg_url: String::new(),
            theme: Theme::Default.as_str().to_string(),
        }
    }
}

/// Only called when the key is present, so `null` stays distinguishable.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<&CountdownConfig> for CountdownSnapshot {
    fn from(config: &CountdownConfig) -> Self {
        Self {
            target_iso: Some(config.target.map(format_iso_instant)),
            event_name: config.event_name.clone(),
            partner: config.partner_name.clone(),
            done_message: config.done_message.clone(),
            bg_data_url: config
                .background
                .embedded_data_url()
                .unwrap_or_default()
                .to_string(),
            bg_url: config.background.external_url().unwrap_or_default().to_string(),
            theme: config.theme.as_str().to_string(),
        }
    }
}
