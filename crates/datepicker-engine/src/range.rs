//! Relative date range resolution.
//!
//! A fixed table of named ranges ("last week", "trailing quarter", ...) and a
//! pure function that turns one of them plus a "now" anchor into a complete
//! [`DateRangeValue`]. No system clock access happens here: the caller
//! supplies `now`, which keeps resolution deterministic and testable.
//!
//! # Range kinds
//!
//! - **Calendar-aligned** (`this_*`, `last_*`): bounded by week, month,
//!   calendar quarter or year boundaries.
//! - **Trailing** (`trailing_*`): a rolling window that starts one period
//!   before today and ends at the end of yesterday.
//! - **Day** (`yesterday`, `today`): a single day.
//!
//! Every resolved range starts at 00:00:00.000 and ends at 23:59:59.999 in
//! the anchor's zone.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::PickerError;
use crate::value::DateRangeValue;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for the `*_week` ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

impl FromStr for WeekStartDay {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStartDay::Monday),
            "sunday" | "sun" => Ok(WeekStartDay::Sunday),
            other => Err(PickerError::InvalidArgument(format!(
                "unknown week start '{other}'"
            ))),
        }
    }
}

/// Options for [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Which day starts the week for week-aligned ranges.
    pub week_start: WeekStartDay,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> u64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as u64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as u64,
    }
}

// ── Range table ─────────────────────────────────────────────────────────────

/// The category a relative range is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeGroup {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl RangeGroup {
    pub const ALL: [RangeGroup; 5] = [
        RangeGroup::Day,
        RangeGroup::Week,
        RangeGroup::Month,
        RangeGroup::Quarter,
        RangeGroup::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RangeGroup::Day => "Day",
            RangeGroup::Week => "Week",
            RangeGroup::Month => "Month",
            RangeGroup::Quarter => "Quarter",
            RangeGroup::Year => "Year",
        }
    }
}

impl FromStr for RangeGroup {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(RangeGroup::Day),
            "week" => Ok(RangeGroup::Week),
            "month" => Ok(RangeGroup::Month),
            "quarter" => Ok(RangeGroup::Quarter),
            "year" => Ok(RangeGroup::Year),
            other => Err(PickerError::InvalidArgument(format!(
                "unknown range group '{other}'"
            ))),
        }
    }
}

/// A named relative date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeRange {
    Yesterday,
    Today,
    LastWeek,
    TrailingWeek,
    ThisWeek,
    LastMonth,
    TrailingMonth,
    ThisMonth,
    LastQuarter,
    TrailingQuarter,
    ThisQuarter,
    LastYear,
    TrailingYear,
    ThisYear,
}

/// One row of the range table, as shown in a grouped selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelativeRangeDefinition {
    pub range: RelativeRange,
    pub group: RangeGroup,
    pub group_label: &'static str,
    pub option_label: &'static str,
}

const fn def(
    range: RelativeRange,
    group: RangeGroup,
    group_label: &'static str,
    option_label: &'static str,
) -> RelativeRangeDefinition {
    RelativeRangeDefinition {
        range,
        group,
        group_label,
        option_label,
    }
}

/// All ranges, in display order.
pub static DEFINITIONS: [RelativeRangeDefinition; 14] = [
    def(RelativeRange::Yesterday, RangeGroup::Day, "Day", "Yesterday"),
    def(RelativeRange::Today, RangeGroup::Day, "Day", "Today"),
    def(RelativeRange::LastWeek, RangeGroup::Week, "Week", "Last Week"),
    def(RelativeRange::TrailingWeek, RangeGroup::Week, "Week", "Trailing Week"),
    def(RelativeRange::ThisWeek, RangeGroup::Week, "Week", "This Week"),
    def(RelativeRange::LastMonth, RangeGroup::Month, "Month", "Last Month"),
    def(RelativeRange::TrailingMonth, RangeGroup::Month, "Month", "Trailing Month"),
    def(RelativeRange::ThisMonth, RangeGroup::Month, "Month", "This Month"),
    def(RelativeRange::LastQuarter, RangeGroup::Quarter, "Quarter", "Last Quarter"),
    def(RelativeRange::TrailingQuarter, RangeGroup::Quarter, "Quarter", "Trailing Quarter"),
    def(RelativeRange::ThisQuarter, RangeGroup::Quarter, "Quarter", "This Quarter"),
    def(RelativeRange::LastYear, RangeGroup::Year, "Year", "Last Year"),
    def(RelativeRange::TrailingYear, RangeGroup::Year, "Year", "Trailing Year"),
    def(RelativeRange::ThisYear, RangeGroup::Year, "Year", "This Year"),
];

impl RelativeRange {
    /// Every range, in display order.
    pub fn all() -> impl Iterator<Item = RelativeRange> {
        DEFINITIONS.iter().map(|d| d.range)
    }

    /// Canonical identifier, e.g. `"trailing_month"`.
    pub fn id(self) -> &'static str {
        match self {
            RelativeRange::Yesterday => "yesterday",
            RelativeRange::Today => "today",
            RelativeRange::LastWeek => "last_week",
            RelativeRange::TrailingWeek => "trailing_week",
            RelativeRange::ThisWeek => "this_week",
            RelativeRange::LastMonth => "last_month",
            RelativeRange::TrailingMonth => "trailing_month",
            RelativeRange::ThisMonth => "this_month",
            RelativeRange::LastQuarter => "last_quarter",
            RelativeRange::TrailingQuarter => "trailing_quarter",
            RelativeRange::ThisQuarter => "this_quarter",
            RelativeRange::LastYear => "last_year",
            RelativeRange::TrailingYear => "trailing_year",
            RelativeRange::ThisYear => "this_year",
        }
    }

    pub fn definition(self) -> &'static RelativeRangeDefinition {
        &DEFINITIONS[self.row()]
    }

    /// Row of this range in [`DEFINITIONS`].
    const fn row(self) -> usize {
        match self {
            RelativeRange::Yesterday => 0,
            RelativeRange::Today => 1,
            RelativeRange::LastWeek => 2,
            RelativeRange::TrailingWeek => 3,
            RelativeRange::ThisWeek => 4,
            RelativeRange::LastMonth => 5,
            RelativeRange::TrailingMonth => 6,
            RelativeRange::ThisMonth => 7,
            RelativeRange::LastQuarter => 8,
            RelativeRange::TrailingQuarter => 9,
            RelativeRange::ThisQuarter => 10,
            RelativeRange::LastYear => 11,
            RelativeRange::TrailingYear => 12,
            RelativeRange::ThisYear => 13,
        }
    }

    pub fn group(self) -> RangeGroup {
        self.definition().group
    }

    pub fn label(self) -> &'static str {
        self.definition().option_label
    }
}

impl fmt::Display for RelativeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RelativeRange {
    type Err = PickerError;

    /// Accepts `this_week`, `this-week`, `this week` and `This Week`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        RelativeRange::all()
            .find(|range| range.id() == normalized)
            .ok_or_else(|| {
                PickerError::InvalidArgument(format!("unknown relative range '{}'", s.trim()))
            })
    }
}

/// The whole table, in display order.
pub fn definitions() -> &'static [RelativeRangeDefinition] {
    &DEFINITIONS
}

/// Definitions belonging to `groups`, in table order. An empty slice means all groups.
pub fn definitions_for(groups: &[RangeGroup]) -> Vec<&'static RelativeRangeDefinition> {
    DEFINITIONS
        .iter()
        .filter(|d| groups.is_empty() || groups.contains(&d.group))
        .collect()
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve a named range against the anchor `now`.
///
/// Day boundaries are taken in `now`'s zone. The result is always complete.
///
/// # Errors
///
/// Returns [`PickerError::OutOfRange`] only if the computation leaves the
/// representable calendar (years near ±262,000).
///
/// # Examples
///
/// ```
/// use datepicker_engine::{range, CalendarDate, RelativeRange, Zone};
///
/// let zone = Zone::parse(Some("UTC")).unwrap();
/// // Wednesday, February 18, 2026
/// let now = CalendarDate::parse("2026-02-18T14:30:00Z", zone).unwrap();
/// let week = range::resolve(RelativeRange::ThisWeek, &now, &Default::default()).unwrap();
/// assert_eq!(week.from().unwrap().to_rfc3339(), "2026-02-16T00:00:00.000Z");
/// assert_eq!(week.to().unwrap().to_rfc3339(), "2026-02-22T23:59:59.999Z");
/// ```
pub fn resolve(
    range: RelativeRange,
    now: &CalendarDate,
    options: &ResolveOptions,
) -> Result<DateRangeValue, PickerError> {
    let today = now.date();
    let (first, last) = resolve_days(range, today, options.week_start).ok_or_else(|| {
        PickerError::OutOfRange(format!("cannot resolve '{range}' relative to {today}"))
    })?;

    log::trace!("resolved {range} at {today}: {first} .. {last}");

    let zone = now.zone();
    DateRangeValue::new(
        CalendarDate::start_of(first, zone),
        CalendarDate::end_of(last, zone),
    )
}

/// Parse an identifier and resolve it.
///
/// # Errors
///
/// Returns [`PickerError::InvalidArgument`] for an unknown identifier.
pub fn resolve_id(
    id: &str,
    now: &CalendarDate,
    options: &ResolveOptions,
) -> Result<DateRangeValue, PickerError> {
    resolve(id.parse()?, now, options)
}

/// First and last calendar day of `range` relative to `today`.
fn resolve_days(
    range: RelativeRange,
    today: NaiveDate,
    week_start: WeekStartDay,
) -> Option<(NaiveDate, NaiveDate)> {
    let yesterday = today.pred_opt()?;
    match range {
        RelativeRange::Yesterday => Some((yesterday, yesterday)),
        RelativeRange::Today => Some((today, today)),

        RelativeRange::LastWeek => week_of(today.checked_sub_days(Days::new(7))?, week_start),
        RelativeRange::TrailingWeek => Some((today.checked_sub_days(Days::new(7))?, yesterday)),
        RelativeRange::ThisWeek => week_of(today, week_start),

        RelativeRange::LastMonth => month_of(today.checked_sub_months(Months::new(1))?),
        RelativeRange::TrailingMonth => {
            Some((today.checked_sub_months(Months::new(1))?, yesterday))
        }
        RelativeRange::ThisMonth => month_of(today),

        // The calendar quarter before this one, not the three months before this month.
        RelativeRange::LastQuarter => quarter_of(today.checked_sub_months(Months::new(3))?),
        RelativeRange::TrailingQuarter => {
            Some((today.checked_sub_months(Months::new(3))?, yesterday))
        }
        RelativeRange::ThisQuarter => quarter_of(today),

        RelativeRange::LastYear => year_of(today.year() - 1),
        RelativeRange::TrailingYear => {
            Some((today.checked_sub_months(Months::new(12))?, yesterday))
        }
        RelativeRange::ThisYear => year_of(today.year()),
    }
}

fn week_of(date: NaiveDate, week_start: WeekStartDay) -> Option<(NaiveDate, NaiveDate)> {
    let start = date.checked_sub_days(Days::new(days_from_week_start(
        date.weekday(),
        week_start,
    )))?;
    Some((start, start.checked_add_days(Days::new(6))?))
}

fn month_of(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    months_starting(date.year(), date.month(), 1)
}

fn quarter_of(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first_month = ((date.month() - 1) / 3) * 3 + 1;
    months_starting(date.year(), first_month, 3)
}

fn year_of(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    months_starting(year, 1, 12)
}

/// The `count` months beginning with `year`-`month`, as first and last day.
fn months_starting(year: i32, month: u32, count: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(count))?.pred_opt()?;
    Some((first, last))
}

// ── Tests ───────────────────────────────────────────────────────────────────
