//! The month a calendar panel is showing.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// A calendar month, e.g. February 2026.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisibleMonth {
    year: i32,
    month: u32,
}

impl VisibleMonth {
    /// `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.shift(1).first_day()?.pred_opt()
    }

    /// Move by `delta` months (negative goes back).
    pub fn shift(&self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for VisibleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for VisibleMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_across_year_boundaries() {
        let jan = VisibleMonth::new(2026, 1).unwrap();
        assert_eq!(jan.shift(-1), VisibleMonth::new(2025, 12).unwrap());
        assert_eq!(jan.shift(11), VisibleMonth::new(2026, 12).unwrap());
        assert_eq!(jan.shift(12), VisibleMonth::new(2027, 1).unwrap());
        assert_eq!(jan.shift(-25), VisibleMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_last_day_handles_leap_years() {
        assert_eq!(VisibleMonth::new(2028, 2).unwrap().last_day(), Some(date(2028, 2, 29)));
        assert_eq!(VisibleMonth::new(2026, 2).unwrap().last_day(), Some(date(2026, 2, 28)));
        assert_eq!(VisibleMonth::new(2026, 12).unwrap().last_day(), Some(date(2026, 12, 31)));
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(VisibleMonth::new(2026, 0).is_none());
        assert!(VisibleMonth::new(2026, 13).is_none());
    }

    #[test]
    fn test_contains_and_display() {
        let feb = VisibleMonth::of(date(2026, 2, 18));
        assert!(feb.contains(date(2026, 2, 1)));
        assert!(!feb.contains(date(2026, 3, 1)));
        assert_eq!(feb.to_string(), "2026-02");
    }
}
