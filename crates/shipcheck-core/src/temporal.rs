//! # Temporal Types: UTC Timestamps and Calendar Dates
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds precision,
//! used for the `fired_at` stamp on every rule result and as the evaluation
//! clock. Shipment dates (`etd`, `eta`) are calendar days, not instants, and
//! are handled by [`parse_calendar_date`].
//!
//! ## Invariant
//!
//! Timestamps carry no sub-second component, so two results stamped by the
//! same clock value compare equal regardless of how they were produced.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShipcheckError;

/// A UTC-only timestamp, truncated to seconds.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: from an RFC 3339 string with a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 timestamp. Only the `Z` suffix is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ShipcheckError::Parse`] if the string is not RFC 3339 or
    /// carries an explicit offset.
    pub fn parse(s: &str) -> Result<Self, ShipcheckError> {
        if !s.ends_with('Z') {
            return Err(ShipcheckError::Parse(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| ShipcheckError::Parse(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The UTC calendar day this timestamp falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Render as ISO 8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Parse a shipment date into a calendar day.
///
/// Accepts `YYYY-MM-DD` (the editor's native format) and full RFC 3339
/// datetimes, from which the UTC date is taken. Surrounding whitespace is
/// ignored.
///
/// # Errors
///
/// Returns [`ShipcheckError::Parse`] for anything else, including the empty
/// string. Callers treat an empty field as absent before reaching here.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, ShipcheckError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| ShipcheckError::Parse(format!("unrecognized date {s:?}")))
}

/// Signed number of days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-01-15T12:00:00Z").is_ok());
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15").is_err());
    }

    #[test]
    fn test_date_is_utc_day() {
        let ts = Timestamp::parse("2024-05-10T23:59:59Z").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn test_parse_calendar_date_plain() {
        let d = parse_calendar_date("2024-05-10").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(parse_calendar_date("  2024-05-10 ").unwrap(), d);
    }

    #[test]
    fn test_parse_calendar_date_rfc3339() {
        let d = parse_calendar_date("2024-05-10T22:00:00-04:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("10/05/2024").is_err());
        assert!(parse_calendar_date("2024-02-30").is_err());
    }

    #[test]
    fn test_days_between_signed() {
        let a = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        assert_eq!(days_between(a, b), -5);
        assert_eq!(days_between(b, a), 5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
