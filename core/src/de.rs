//! Lenient field decoders used by the XML schema.
//!
//! The remote emits empty tags (`<RentPrice/>`, `<MandateDate i:nil="true"/>`)
//! for unset values. serde's built-in primitives reject an empty string, so
//! every non-string scalar in the schema goes through one of these helpers:
//! the element text is read as a string, trimmed, and an empty value becomes
//! the type's zero value or `None`.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::de::{Deserialize, Deserializer, Error};

/// Integer or float; empty decodes as zero.
pub(crate) fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|e| D::Error::custom(format!("invalid number '{raw}': {e}")))
}

/// `true`/`false`/`1`/`0`, any case; empty decodes as `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" | "0" => Ok(false),
        "1" => Ok(true),
        s if s.eq_ignore_ascii_case("false") => Ok(false),
        s if s.eq_ignore_ascii_case("true") => Ok(true),
        s => Err(D::Error::custom(format!("invalid boolean '{s}'"))),
    }
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw).map(Some).map_err(D::Error::custom)
}

/// Enumerated value kept as-is; empty decodes as `None`.
pub(crate) fn code<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| T::from(raw.to_string())))
}

/// Parse a timestamp as the remote writes it.
///
/// Accepted forms, all normalised to UTC:
/// - RFC 3339 with `Z` or a numeric offset,
/// - `YYYY-MM-DDTHH:MM:SS` with an optional fraction of up to nine digits,
///   taken to be UTC already (the `...Utc` fields are written this way),
/// - the same with a space instead of `T`,
/// - a bare `YYYY-MM-DD`, read as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid timestamp '{raw}'"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn naive_timestamp_is_utc() {
        let dt = parse_timestamp("2016-03-01T10:15:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2016, 3, 1, 10, 15, 30).unwrap());
    }

    #[test]
    fn fractional_seconds() {
        let dt = parse_timestamp("2016-03-01T10:15:30.1234567").unwrap();
        assert_eq!(dt.nanosecond(), 123_456_700);
    }

    #[test]
    fn offset_is_normalised() {
        let dt = parse_timestamp("2016-03-01T12:15:30+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2016, 3, 1, 10, 15, 30).unwrap());
        let zulu = parse_timestamp("2016-03-01T10:15:30Z").unwrap();
        assert_eq!(zulu, dt);
    }

    #[test]
    fn space_separated_and_bare_date() {
        assert_eq!(
            parse_timestamp("2016-03-01 10:15:30").unwrap(),
            Utc.with_ymd_and_hms(2016, 3, 1, 10, 15, 30).unwrap()
        );
        assert_eq!(
            parse_timestamp("2016-03-01").unwrap(),
            Utc.with_ymd_and_hms(2016, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2016-13-01T00:00:00").is_err());
    }
}
