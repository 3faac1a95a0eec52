//! Site-local calendar handling
//!
//! All billing arithmetic happens on wall-clock time in the marketplace's
//! configured timezone. This module provides:
//! - `Timezone`: serde-friendly wrapper around `chrono_tz::Tz`
//! - `Clock`: the source of "now", swappable in tests
//! - `DateRangeFilter`: inclusive, optionally open-ended date bounds for ledger queries
//! - calendar helpers (month boundaries, end of day, day offsets)
//! - reference-date parsing for evaluations

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Date format used on every external surface
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_IN_DAY: i64 = 86_400;

/// Timezone wrapper for the marketplace site
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC instant to site wall-clock time.
    ///
    /// Returns `None` when the local time falls outside the representable range.
    pub fn to_local(&self, utc: DateTime<Utc>) -> Option<NaiveDateTime> {
        let naive = utc.naive_utc();
        let offset = self.0.offset_from_utc_datetime(&naive).fix();
        naive.checked_add_offset(offset)
    }

    /// Converts a unix timestamp to site wall-clock time
    pub fn from_timestamp(&self, secs: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(secs, 0).and_then(|utc| self.to_local(utc))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date provided: {input:?}")]
    InvalidDate {
        input: String,
    },

    #[error("Date arithmetic out of range")]
    OutOfRange,
}

impl TemporalError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TemporalError::InvalidDate { input: input.into() }
    }
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Inclusive date bounds for a ledger query; `None` leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeFilter {
    /// Matches every date
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches every date up to and including `to`
    pub fn until(to: NaiveDate) -> Self {
        Self { from: None, to: Some(to) }
    }

    /// Matches `from..=to`
    pub fn between(from: NaiveDate, to: NaiveDate) -> Result<Self, TemporalError> {
        if from > to {
            return Err(TemporalError::InvalidPeriod {
                start: from.to_string(),
                end: to.to_string(),
            });
        }
        Ok(Self { from: Some(from), to: Some(to) })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            from: Some(first_day_of_month(date)),
            to: Some(last_day_of_month(date)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Last day of the month before the one containing `date`
pub fn last_day_of_previous_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date).pred_opt().unwrap_or(NaiveDate::MIN)
}

/// `date` at 23:59:59
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::seconds(SECONDS_IN_DAY - 1)
}

/// Moves `at` forward by `days` calendar days
pub fn add_days(at: NaiveDateTime, days: u64) -> Result<NaiveDateTime, TemporalError> {
    at.checked_add_days(Days::new(days)).ok_or(TemporalError::OutOfRange)
}

/// The same day one month earlier, clamped to the end of shorter months
pub fn one_month_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Formats a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a caller-supplied reference into site wall-clock time.
///
/// Accepts a unix timestamp, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` or RFC 3339. A date-only input keeps the time of
/// day from `now`.
pub fn parse_reference_instant(
    input: &str,
    tz: Timezone,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, TemporalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TemporalError::invalid_date(input));
    }

    if let Ok(secs) = trimmed.parse::<i64>() {
        return tz
            .from_timestamp(secs)
            .ok_or_else(|| TemporalError::invalid_date(input));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(now.time()));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(at);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .and_then(|at| tz.to_local(at.with_timezone(&Utc)))
        .ok_or_else(|| TemporalError::invalid_date(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(first_day_of_month(date(2024, 3, 10)), date(2024, 3, 1));
        assert_eq!(last_day_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 12, 5)), date(2023, 12, 31));
        assert_eq!(last_day_of_previous_month(date(2024, 3, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_previous_month(date(2024, 1, 1)), date(2023, 12, 31));
    }

    #[test]
    fn test_end_of_day() {
        let eod = end_of_day(date(2024, 3, 1));
        assert_eq!(eod.date(), date(2024, 3, 1));
        assert_eq!((eod.hour(), eod.minute(), eod.second()), (23, 59, 59));
    }

    #[test]
    fn test_date_only_reference_keeps_time_of_day() {
        let now = date(2024, 5, 5).and_hms_opt(14, 30, 0).unwrap();
        let parsed = parse_reference_instant("2024-03-10", Timezone::default(), now).unwrap();
        assert_eq!(parsed, date(2024, 3, 10).and_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn test_timestamp_reference_uses_site_timezone() {
        let tz = Timezone::new(chrono_tz::Asia::Dhaka);
        let utc = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        let now = date(2024, 5, 5).and_hms_opt(0, 0, 0).unwrap();
        let parsed = parse_reference_instant(&utc.timestamp().to_string(), tz, now).unwrap();
        assert_eq!(parsed, date(2024, 4, 1).and_hms_opt(2, 0, 0).unwrap());
    }

    #[test]
    fn test_local_time_past_max_is_rejected() {
        let tz = Timezone::new(chrono_tz::Asia::Tokyo);
        let now = date(2024, 5, 5).and_hms_opt(0, 0, 0).unwrap();
        let max = DateTime::<Utc>::MAX_UTC;

        assert_eq!(tz.to_local(max), None);
        assert_eq!(Timezone::default().to_local(max), Some(max.naive_utc()));

        let result = parse_reference_instant(&max.timestamp().to_string(), tz, now);
        assert!(matches!(result, Err(TemporalError::InvalidDate { .. })));
    }

    #[test]
    fn test_garbage_reference_is_rejected() {
        let now = date(2024, 5, 5).and_hms_opt(0, 0, 0).unwrap();
        let result = parse_reference_instant("next tuesday-ish", Timezone::default(), now);
        assert!(matches!(result, Err(TemporalError::InvalidDate { .. })));
        assert!(parse_reference_instant("2024-02-30", Timezone::default(), now).is_err());
    }

    #[test]
    fn test_range_filter_contains() {
        let range = DateRangeFilter::month_of(date(2024, 2, 14));
        assert!(range.contains(date(2024, 2, 1)));
        assert!(range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 3, 1)));
        assert!(DateRangeFilter::all().contains(date(1999, 1, 1)));
        assert!(DateRangeFilter::between(date(2024, 2, 2), date(2024, 2, 1)).is_err());
    }
}
