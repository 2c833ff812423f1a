//! Lenient timestamp decoding.
//!
//! The backend stores naive UTC date-times and serializes them without an
//! offset; bookings carry a bare date. All three shapes decode to
//! `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Parse RFC 3339, naive ISO-8601 (taken as UTC) or a bare date (midnight UTC).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
}

/// `deserialize_with` target for optional timestamps. Pair with `#[serde(default)]`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognised timestamp: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn naive_server_timestamps_are_utc() {
        let ts = parse("2024-03-05T14:07:09.123456").unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (14, 7, 9));
    }

    #[test]
    fn offsets_are_normalised() {
        let ts = parse("2024-03-05T14:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn bare_dates_are_midnight() {
        let ts = parse("2024-03-05").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 3, 5, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("yesterday").is_none());
    }
}
