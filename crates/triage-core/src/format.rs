//! Display formatting for backend timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Formats a backend timestamp as `Mar 1, 2024, 12:30 PM` (UTC).
///
/// Accepts RFC 3339, `+0000`-style offsets, naive date-times (taken as UTC)
/// and bare dates. Empty input gives an empty string; anything unparseable is
/// returned unchanged rather than rendered as `Invalid Date` the way a browser
/// `toLocaleString` would.
pub fn format_date_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match parse_timestamp(trimmed) {
        Some(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Same as [`format_date_time`] for optional fields.
pub fn format_optional(raw: Option<&str>) -> String {
    raw.map(format_date_time).unwrap_or_default()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_supported_shapes() {
        assert_eq!(format_date_time("2024-03-01T15:07:00Z"), "Mar 1, 2024, 03:07 PM");
        assert_eq!(
            format_date_time("2024-03-01T15:07:00.000+0000"),
            "Mar 1, 2024, 03:07 PM"
        );
        assert_eq!(
            format_date_time("2024-12-24T09:05:00+02:00"),
            "Dec 24, 2024, 07:05 AM"
        );
        assert_eq!(format_date_time("2024-01-09"), "Jan 9, 2024, 12:00 AM");
    }

    #[test]
    fn test_empty_and_unparseable_input() {
        assert_eq!(format_date_time(""), "");
        assert_eq!(format_optional(None), "");
        assert_eq!(format_date_time("yesterday"), "yesterday");
    }
}
