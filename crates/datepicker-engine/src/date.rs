//! [`CalendarDate`]: an instant viewed through a [`Zone`].

use std::cmp::Ordering;
use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::error::PickerError;
use crate::zone::Zone;

/// A point in time together with the zone whose calendar it belongs to.
///
/// Two dates are equal when they denote the same instant, whatever zone
/// they are viewed in. Day-level questions (`date`, `start_of_day`,
/// `same_day`) are answered in the date's own zone.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate {
    instant: DateTime<Utc>,
    zone: Zone,
}

impl CalendarDate {
    pub fn from_instant(instant: DateTime<Utc>, zone: Zone) -> Self {
        Self { instant, zone }
    }

    /// Midnight at the start of `date` in `zone`.
    pub fn start_of(date: NaiveDate, zone: Zone) -> Self {
        Self::from_local(date.and_time(NaiveTime::MIN), zone)
    }

    /// The last millisecond (23:59:59.999) of `date` in `zone`.
    pub fn end_of(date: NaiveDate, zone: Zone) -> Self {
        Self::from_local(date.and_time(end_of_day_time()), zone)
    }

    pub fn from_local(naive: NaiveDateTime, zone: Zone) -> Self {
        Self {
            instant: zone.from_local(naive),
            zone,
        }
    }

    /// Start of the given calendar day in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDatetime`] for an impossible date such as February 30.
    pub fn from_ymd(zone: Zone, year: i32, month: u32, day: u32) -> Result<Self, PickerError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Self::start_of(date, zone))
            .ok_or_else(|| {
                PickerError::InvalidDatetime(format!("{year:04}-{month:02}-{day:02}"))
            })
    }

    /// Parse an RFC 3339 datetime, or a plain `YYYY-MM-DD` date (start of day in `zone`).
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDatetime`] if the string is neither.
    ///
    /// # Examples
    ///
    /// ```
    /// use datepicker_engine::{CalendarDate, Zone};
    ///
    /// let zone = Zone::parse(Some("UTC")).unwrap();
    /// let date = CalendarDate::parse("2026-02-18", zone).unwrap();
    /// assert_eq!(date.to_rfc3339(), "2026-02-18T00:00:00.000Z");
    /// ```
    pub fn parse(s: &str, zone: Zone) -> Result<Self, PickerError> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_instant(dt.with_timezone(&Utc), zone));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Self::start_of(date, zone))
            .map_err(|e| PickerError::InvalidDatetime(format!("'{s}': {e}")))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Wall-clock datetime in this date's zone.
    pub fn local(&self) -> NaiveDateTime {
        self.zone.to_local(self.instant)
    }

    /// Calendar day in this date's zone.
    pub fn date(&self) -> NaiveDate {
        self.local().date()
    }

    pub fn start_of_day(&self) -> Self {
        Self::start_of(self.date(), self.zone)
    }

    pub fn end_of_day(&self) -> Self {
        Self::end_of(self.date(), self.zone)
    }

    /// The same instant viewed in another zone.
    pub fn with_zone(&self, zone: Zone) -> Self {
        Self {
            instant: self.instant,
            zone,
        }
    }

    /// Whether `other` falls on the same calendar day, judged in this date's zone.
    pub fn same_day(&self, other: &CalendarDate) -> bool {
        self.date() == other.with_zone(self.zone).date()
    }

    /// RFC 3339 with millisecond precision and the zone's offset
    /// (`Z` when the offset is zero).
    pub fn to_rfc3339(&self) -> String {
        self.instant
            .with_timezone(&self.zone.offset_at(self.instant))
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Format the wall-clock time with a `chrono` strftime pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidArgument`] for an unknown specifier, or
    /// one that needs an offset (`%z`, `%Z`).
    pub fn format(&self, pattern: &str) -> Result<String, PickerError> {
        let items = strftime_items(pattern)?;
        let mut out = String::new();
        write!(out, "{}", self.local().format_with_items(items.iter()))
            .map_err(|_| invalid_pattern(pattern))?;
        Ok(out)
    }
}

/// Parsed strftime items, rejecting unknown specifiers up front.
pub(crate) fn strftime_items(pattern: &str) -> Result<Vec<Item<'_>>, PickerError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid_pattern(pattern));
    }
    Ok(items)
}

fn invalid_pattern(pattern: &str) -> PickerError {
    PickerError::InvalidArgument(format!("invalid date format '{pattern}'"))
}

/// 23:59:59.999, the inclusive end of a day.
pub(crate) fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for CalendarDate {}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc() -> Zone {
        Zone::parse(Some("UTC")).unwrap()
    }

    fn los_angeles() -> Zone {
        Zone::parse(Some("America/Los_Angeles")).unwrap()
    }

    #[test]
    fn test_start_and_end_of_day() {
        let date = CalendarDate::parse("2026-02-18T14:30:00Z", utc()).unwrap();
        assert_eq!(date.start_of_day().to_rfc3339(), "2026-02-18T00:00:00.000Z");
        assert_eq!(date.end_of_day().to_rfc3339(), "2026-02-18T23:59:59.999Z");
    }

    #[test]
    fn test_day_boundaries_follow_zone() {
        // 03:00 UTC on Feb 18 is the evening of Feb 17 in Los Angeles
        let date = CalendarDate::parse("2026-02-18T03:00:00Z", los_angeles()).unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2026, 2, 17).unwrap());
        assert_eq!(date.start_of_day().to_rfc3339(), "2026-02-17T00:00:00.000-08:00");
    }

    #[test]
    fn test_parse_iso_date_is_start_of_day() {
        let date = CalendarDate::parse("2026-02-18", los_angeles()).unwrap();
        assert_eq!(date.local().hour(), 0);
        assert_eq!(date.to_rfc3339(), "2026-02-18T00:00:00.000-08:00");
    }

    #[test]
    fn test_parse_invalid_datetime_returns_error() {
        let err = CalendarDate::parse("not-a-date", utc()).unwrap_err().to_string();
        assert!(err.contains("Invalid datetime"), "got: {err}");
    }

    #[test]
    fn test_from_ymd_rejects_impossible_date() {
        assert!(CalendarDate::from_ymd(utc(), 2026, 2, 30).is_err());
        assert!(CalendarDate::from_ymd(utc(), 2028, 2, 29).is_ok());
    }

    #[test]
    fn test_equality_ignores_zone() {
        let instant = Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap();
        let a = CalendarDate::from_instant(instant, utc());
        let b = CalendarDate::from_instant(instant, los_angeles());
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_same_day_uses_own_zone() {
        let afternoon_la = CalendarDate::parse("2026-02-17T15:00:00-08:00", los_angeles()).unwrap();
        let morning_utc = CalendarDate::parse("2026-02-18T05:00:00Z", utc()).unwrap();
        // 05:00 UTC is still Feb 17 in Los Angeles
        assert!(afternoon_la.same_day(&morning_utc));
        // ...but 15:00 PST is 23:00 UTC on Feb 17
        assert!(!morning_utc.same_day(&afternoon_la));
    }

    #[test]
    fn test_format_with_pattern() {
        let date = CalendarDate::parse("2026-02-18T14:30:00Z", los_angeles()).unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M").unwrap(), "2026-02-18 06:30");
    }

    #[test]
    fn test_format_rejects_unknown_specifier() {
        let date = CalendarDate::from_ymd(utc(), 2026, 2, 18).unwrap();
        let err = date.format("%Q").unwrap_err().to_string();
        assert!(err.contains("invalid date format '%Q'"), "got: {err}");
    }

    #[test]
    fn test_format_rejects_offset_specifier() {
        // The wall-clock time carries no offset to print
        let date = CalendarDate::from_ymd(utc(), 2026, 2, 18).unwrap();
        assert!(date.format("%Y %z").is_err());
    }

    #[test]
    fn test_serialize_as_rfc3339_string() {
        let date = CalendarDate::from_ymd(utc(), 2026, 2, 18).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2026-02-18T00:00:00.000Z\"");
    }
}
