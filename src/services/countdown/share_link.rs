//! Shareable links.
//!
//! A link carries the target, names, message, external background URL and
//! theme as query parameters. Uploaded images are never included.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::models::countdown::{CountdownConfig, Theme};
use crate::utils::date::{format_iso_instant, parse_iso_instant};

pub const PARAM_TARGET: &str = "t";
pub const PARAM_EVENT: &str = "e";
pub const PARAM_PARTNER: &str = "p";
pub const PARAM_MESSAGE: &str = "m";
pub const PARAM_BACKGROUND: &str = "bg";
pub const PARAM_THEME: &str = "theme";

/// Recognized parameters of a share link. `None` means the parameter was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLinkParams {
    pub target: Option<DateTime<Utc>>,
    pub event_name: Option<String>,
    pub partner_name: Option<String>,
    pub done_message: Option<String>,
    pub background_url: Option<String>,
    pub theme: Option<Theme>,
}

impl ShareLinkParams {
    /// Collect the shareable part of a configuration. Empty strings are left out.
    pub fn from_config(config: &CountdownConfig) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            target: config.target(),
            event_name: non_empty(&config.event_name),
            partner_name: non_empty(&config.partner_name),
            done_message: non_empty(&config.done_message),
            background_url: config.background().external_url().and_then(non_empty),
            theme: Some(config.theme),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::new();
        if let Some(target) = self.target {
            pairs.push((PARAM_TARGET, Cow::Owned(format_iso_instant(target))));
        }
        if let Some(event) = &self.event_name {
            pairs.push((PARAM_EVENT, Cow::Borrowed(event)));
        }
        if let Some(partner) = &self.partner_name {
            pairs.push((PARAM_PARTNER, Cow::Borrowed(partner)));
        }
        if let Some(message) = &self.done_message {
            pairs.push((PARAM_MESSAGE, Cow::Borrowed(message)));
        }
        if let Some(url) = &self.background_url {
            pairs.push((PARAM_BACKGROUND, Cow::Borrowed(url)));
        }
        if let Some(theme) = self.theme {
            pairs.push((PARAM_THEME, Cow::Borrowed(theme.as_str())));
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full link rooted at `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        let base = base_url.split(['?', '#']).next().unwrap_or_default();
        format!("{}?{}", base, self.to_query())
    }

    /// Parse a full link or a bare query string.
    ///
    /// Unknown parameters are ignored, as is a target that cannot be read.
    /// When a parameter repeats, the first occurrence wins.
    pub fn parse(link: &str) -> Self {
        let without_fragment = link.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None => without_fragment,
        };

        let mut params = Self::default();
        let mut seen_target = false;

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
            else {
                log::warn!("Ignoring undecodable share link parameter '{}'", pair);
                continue;
            };

            match key.as_str() {
                PARAM_TARGET if !seen_target => {
                    seen_target = true;
                    params.target = parse_iso_instant(&value);
                    if params.target.is_none() {
                        log::warn!("Ignoring unreadable share link target '{}'", value);
                    }
                }
                PARAM_EVENT if params.event_name.is_none() => params.event_name = Some(value),
                PARAM_PARTNER if params.partner_name.is_none() => {
                    params.partner_name = Some(value)
                }
                PARAM_MESSAGE if params.done_message.is_none() => {
                    params.done_message = Some(value)
                }
                PARAM_BACKGROUND if params.background_url.is_none() => {
                    params.background_url = Some(value)
                }
                PARAM_THEME if params.theme.is_none() => {
                    params.theme = Some(Theme::from_str_lossy(&value))
                }
                _ => {}
            }
        }

        params
    }

    /// Overwrite the matching fields of `config`. Returns whether anything was applied.
    pub fn apply_to(&self, config: &mut CountdownConfig) -> bool {
        let mut changed = false;

        if let Some(target) = self.target {
            config.set_target(Some(target));
            changed = true;
        }
        if let Some(event) = &self.event_name {
            config.event_name = event.clone();
            changed = true;
        }
        if let Some(partner) = &self.partner_name {
            config.partner_name = partner.clone();
            changed = true;
        }
        if let Some(message) = &self.done_message {
            config.done_message = message.clone();
            changed = true;
        }
        if let Some(url) = &self.background_url {
            config.set_background_url(url);
            changed = true;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
            changed = true;
        }

        changed
    }
}

/// Form-style decoding: `+` is a space, then percent escapes.
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}
