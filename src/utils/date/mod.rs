// Date utility functions
// Parsing of user-entered targets and formatting of instants for display and links

use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

use crate::services::countdown::CountdownError;

/// Formats accepted from the date/time input, interpreted in local time.
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format used to pre-fill the date/time input.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse the date/time input in the local timezone.
pub fn parse_target_input(input: &str) -> Result<DateTime<Utc>, CountdownError> {
    parse_target_input_in(input, &Local)
}

/// Parse the date/time input in the given timezone.
///
/// A full RFC 3339 instant is accepted as-is. Wall-clock times that do not
/// exist in `tz` (DST gaps) are rejected; ambiguous ones take the earlier
/// instant.
pub fn parse_target_input_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, CountdownError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CountdownError::EmptyTarget);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| CountdownError::InvalidTarget(trimmed.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| CountdownError::InvalidTarget(trimmed.to_string()))
}

/// Parse an ISO-8601 instant as found in snapshots and share links.
///
/// Date-only values are taken as UTC midnight.
pub fn parse_iso_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// ISO-8601 UTC with millisecond precision, e.g. `2025-10-08T00:00:00.000Z`.
pub fn format_iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Value for the date/time input in local time.
pub fn to_input_value(instant: DateTime<Utc>) -> String {
    to_input_value_in(instant, &Local)
}

pub fn to_input_value_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format(INPUT_FORMAT).to_string()
}

/// Label shown next to the countdown describing the target.
pub fn format_target_label(target: Option<DateTime<Utc>>) -> String {
    format_target_label_in(target, &Local)
}

pub fn format_target_label_in<Tz: TimeZone>(target: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match target {
        Some(instant) => instant
            .with_timezone(tz)
            .format("%a %b %-d %Y, %H:%M:%S")
            .to_string(),
        None => "not set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use test_case::test_case;

    #[test_case("2026-12-24T18:30" ; "datetime local")]
    #[test_case("2026-12-24T18:30:00" ; "datetime local with seconds")]
    #[test_case("2026-12-24 18:30" ; "space separated")]
    #[test_case(" 2026-12-24 18:30:00 " ; "surrounding whitespace")]
    #[test_case("2026-12-24T18:30:00Z" ; "rfc3339 utc")]
    fn test_parse_target_input_accepts(input: &str) {
        let parsed = parse_target_input_in(input, &Utc).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 12, 24, 18, 30, 0).unwrap());
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    fn test_parse_target_input_rejects_empty(input: &str) {
        assert_eq!(
            parse_target_input_in(input, &Utc),
            Err(CountdownError::EmptyTarget)
        );
    }

    #[test_case("tomorrow" ; "words")]
    #[test_case("2026-13-01T10:00" ; "bad month")]
    #[test_case("2026-02-30 10:00" ; "bad day")]
    #[test_case("2026-12-24" ; "date only")]
    fn test_parse_target_input_rejects_invalid(input: &str) {
        assert!(matches!(
            parse_target_input_in(input, &Utc),
            Err(CountdownError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_parse_target_input_uses_timezone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_target_input_in("2026-06-01T12:00", &plus_two).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_iso_roundtrip() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap();
        let iso = format_iso_instant(instant);
        assert_eq!(iso, "2025-10-08T00:00:00.000Z");
        assert_eq!(parse_iso_instant(&iso), Some(instant));
    }

    #[test]
    fn test_parse_iso_instant_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap();
        assert_eq!(parse_iso_instant("2025-10-08"), Some(expected));
        assert_eq!(parse_iso_instant("2025-10-08T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_iso_instant("garbage"), None);
    }

    #[test]
    fn test_input_value_and_label() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 5, 7, 9, 11).unwrap();
        assert_eq!(to_input_value_in(instant, &Utc), "2026-03-05T07:09");
        assert_eq!(
            format_target_label_in(Some(instant), &Utc),
            "Thu Mar 5 2026, 07:09:11"
        );
        assert_eq!(format_target_label_in(None, &Utc), "not set");
    }
}
