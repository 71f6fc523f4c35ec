// Test fixtures - reusable test data
// Provides consistent instants and links across the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

/// Sample instants for testing
pub mod instants {
    use super::*;

    /// Returns Jun 1, 2026 at 09:00 UTC, used as "now"
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    /// Returns Jul 4, 2026 at 18:30 UTC, a target in the future of [`now`]
    pub fn trip_departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 4, 18, 30, 0).unwrap()
    }

    /// Returns Jan 1, 2020 at midnight UTC, long past
    pub fn past() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }
}

/// Sample share links
pub mod links {
    /// Every parameter set, spaces encoded as `+`
    pub const FULL: &str = "https://example.com/countdown?t=2026-07-04T18:30:00.000Z&e=Beach+Trip&p=Sam&m=Pack%20the%20bags&bg=https%3A%2F%2Fimg.example.com%2Fsea.jpg&theme=beach";

    /// Only a theme, nothing else
    pub const THEME_ONLY: &str = "?theme=party";

    /// No recognized parameters at all
    pub const UNRELATED: &str = "https://example.com/countdown?utm_source=mail#top";
}
