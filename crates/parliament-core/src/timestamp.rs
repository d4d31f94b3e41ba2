//! Lenient UTC timestamp decoding.
//!
//! Council backends stamp records with either RFC 3339 strings or naive ISO
//! datetimes without an offset (`2025-07-15T12:34:56.789012`). Naive values
//! are read as UTC. Use with `#[serde(deserialize_with = "...")]`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_utc("2025-07-15T14:34:56+02:00").unwrap();
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.to_rfc3339(), "2025-07-15T12:34:56+00:00");
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse_utc("2025-07-15T12:34:56.789012").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 7, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (12, 34, 56));
        assert_eq!(dt.nanosecond(), 789_012_000);

        assert!(parse_utc("2025-07-15T12:34:56").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_utc("yesterday").is_none());
        assert!(parse_utc("").is_none());
    }
}
