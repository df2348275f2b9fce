//! Which days a user may not pick.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::date::CalendarDate;
use crate::zone::Zone;

/// A caller-supplied day matcher. All matching is by calendar day, in the zone
/// passed to [`DisabledDays::matches`].
#[derive(Default)]
pub enum DisabledDays {
    /// Nothing is disabled.
    #[default]
    None,
    /// An explicit set of days.
    ExplicitDates(BTreeSet<NaiveDate>),
    /// An arbitrary predicate.
    Predicate(Box<dyn Fn(&CalendarDate) -> bool>),
    /// Every occurrence of these weekdays.
    DaysOfWeek(Vec<Weekday>),
    /// Days strictly between `after` and `before`.
    Between { after: NaiveDate, before: NaiveDate },
    /// Days strictly before the given day.
    Before(NaiveDate),
    /// Days strictly after the given day.
    After(NaiveDate),
    /// Disabled if any matcher matches.
    Any(Vec<DisabledDays>),
}

impl DisabledDays {
    pub fn dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        DisabledDays::ExplicitDates(dates.into_iter().collect())
    }

    pub fn predicate<F: Fn(&CalendarDate) -> bool + 'static>(f: F) -> Self {
        DisabledDays::Predicate(Box::new(f))
    }

    /// Whether `date` is disabled, judging its calendar day in `zone`.
    pub fn matches(&self, date: &CalendarDate, zone: Zone) -> bool {
        let local = date.with_zone(zone);
        let day = local.date();
        match self {
            DisabledDays::None => false,
            DisabledDays::ExplicitDates(dates) => dates.contains(&day),
            DisabledDays::Predicate(f) => f(&local),
            DisabledDays::DaysOfWeek(weekdays) => weekdays.contains(&day.weekday()),
            DisabledDays::Between { after, before } => *after < day && day < *before,
            DisabledDays::Before(limit) => day < *limit,
            DisabledDays::After(limit) => day > *limit,
            DisabledDays::Any(matchers) => matchers.iter().any(|m| m.matches(date, zone)),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            DisabledDays::None => true,
            DisabledDays::Any(matchers) => matchers.iter().all(DisabledDays::is_none),
            _ => false,
        }
    }
}

impl fmt::Debug for DisabledDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledDays::None => f.write_str("None"),
            DisabledDays::ExplicitDates(dates) => f.debug_tuple("ExplicitDates").field(dates).finish(),
            DisabledDays::Predicate(_) => f.write_str("Predicate(..)"),
            DisabledDays::DaysOfWeek(days) => f.debug_tuple("DaysOfWeek").field(days).finish(),
            DisabledDays::Between { after, before } => f
                .debug_struct("Between")
                .field("after", after)
                .field("before", before)
                .finish(),
            DisabledDays::Before(limit) => f.debug_tuple("Before").field(limit).finish(),
            DisabledDays::After(limit) => f.debug_tuple("After").field(limit).finish(),
            DisabledDays::Any(matchers) => f.debug_tuple("Any").field(matchers).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Zone {
        Zone::parse(Some("UTC")).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: u32) -> CalendarDate {
        CalendarDate::from_ymd(utc(), 2026, 2, d).unwrap()
    }

    #[test]
    fn test_none_disables_nothing() {
        assert!(!DisabledDays::None.matches(&at(18), utc()));
        assert!(DisabledDays::None.is_none());
    }

    #[test]
    fn test_explicit_dates_match_whole_day() {
        let disabled = DisabledDays::dates([date(2026, 2, 14), date(2026, 2, 2)]);
        assert!(disabled.matches(&at(14), utc()));
        assert!(disabled.matches(&at(14).end_of_day(), utc()));
        assert!(!disabled.matches(&at(15), utc()));
    }

    #[test]
    fn test_explicit_dates_judged_in_given_zone() {
        // 03:00 UTC on Feb 15 is Feb 14 in New York
        let ny = Zone::parse(Some("America/New_York")).unwrap();
        let disabled = DisabledDays::dates([date(2026, 2, 14)]);
        let instant = CalendarDate::parse("2026-02-15T03:00:00Z", utc()).unwrap();
        assert!(disabled.matches(&instant, ny));
        assert!(!disabled.matches(&instant, utc()));
    }

    #[test]
    fn test_predicate_receives_date_in_zone() {
        let disabled = DisabledDays::predicate(|d| d.date().day() % 2 == 0);
        assert!(disabled.matches(&at(18), utc()));
        assert!(!disabled.matches(&at(19), utc()));
    }

    #[test]
    fn test_days_of_week() {
        // Feb 22, 2026 is a Sunday
        let disabled = DisabledDays::DaysOfWeek(vec![Weekday::Sun]);
        assert!(disabled.matches(&at(22), utc()));
        assert!(!disabled.matches(&at(23), utc()));
    }

    #[test]
    fn test_between_is_exclusive() {
        let disabled = DisabledDays::Between {
            after: date(2026, 2, 18),
            before: date(2026, 2, 25),
        };
        assert!(!disabled.matches(&at(18), utc()));
        assert!(disabled.matches(&at(19), utc()));
        assert!(disabled.matches(&at(24), utc()));
        assert!(!disabled.matches(&at(25), utc()));
    }

    #[test]
    fn test_any_combines_matchers() {
        let disabled = DisabledDays::Any(vec![
            DisabledDays::Before(date(2026, 2, 10)),
            DisabledDays::After(date(2026, 2, 20)),
        ]);
        assert!(disabled.matches(&at(9), utc()));
        assert!(!disabled.matches(&at(10), utc()));
        assert!(!disabled.matches(&at(20), utc()));
        assert!(disabled.matches(&at(21), utc()));
        assert!(!disabled.is_none());
        assert!(DisabledDays::Any(vec![DisabledDays::None]).is_none());
    }
}
