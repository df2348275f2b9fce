//! Selection value shapes.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::PickerError;
use crate::zone::Zone;

/// Which value shape a picker works with, and how clicks are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionVariant {
    #[default]
    Single,
    Range,
}

/// A possibly incomplete date range. When both ends are set, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRangeValue {
    from: Option<CalendarDate>,
    to: Option<CalendarDate>,
}

/// Where a range selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    Empty,
    Partial(CalendarDate),
    Complete(CalendarDate, CalendarDate),
}

impl DateRangeValue {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A range with only its start set.
    pub fn partial(from: CalendarDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// A complete range.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidArgument`] if `from` is after `to`.
    pub fn new(from: CalendarDate, to: CalendarDate) -> Result<Self, PickerError> {
        if from > to {
            return Err(PickerError::InvalidArgument(format!(
                "range start {from} is after range end {to}"
            )));
        }
        Ok(Self {
            from: Some(from),
            to: Some(to),
        })
    }

    /// The inclusive span covering the days of `a` and `b`, in either order:
    /// start of the earlier day to end of the later day.
    pub fn spanning(a: CalendarDate, b: CalendarDate) -> Self {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        let from = first.start_of_day();
        let to = last.end_of_day().max(from);
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn from(&self) -> Option<CalendarDate> {
        self.from
    }

    pub fn to(&self) -> Option<CalendarDate> {
        self.to
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn state(&self) -> RangeState {
        match (self.from, self.to) {
            (Some(from), Some(to)) => RangeState::Complete(from, to),
            (Some(from), None) | (None, Some(from)) => RangeState::Partial(from),
            (None, None) => RangeState::Empty,
        }
    }

    /// The same endpoints viewed in `zone`.
    pub fn with_zone(&self, zone: Zone) -> Self {
        Self {
            from: self.from.map(|d| d.with_zone(zone)),
            to: self.to.map(|d| d.with_zone(zone)),
        }
    }

    /// Whether `date`'s day lies within the complete range (inclusive).
    pub fn contains_day(&self, date: &CalendarDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => {
                let day = date.with_zone(from.zone()).date();
                from.date() <= day && day <= to.with_zone(from.zone()).date()
            }
            _ => false,
        }
    }
}

/// The value a picker hands to its change observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "value", rename_all = "snake_case")]
pub enum SelectionValue {
    Single(Option<CalendarDate>),
    Range(DateRangeValue),
}

impl SelectionValue {
    /// An empty value of the given shape.
    pub fn empty(variant: SelectionVariant) -> Self {
        match variant {
            SelectionVariant::Single => SelectionValue::Single(None),
            SelectionVariant::Range => SelectionValue::Range(DateRangeValue::empty()),
        }
    }

    pub fn variant(&self) -> SelectionVariant {
        match self {
            SelectionValue::Single(_) => SelectionVariant::Single,
            SelectionValue::Range(_) => SelectionVariant::Range,
        }
    }

    /// The single date, or the start of the range.
    pub fn anchor(&self) -> Option<CalendarDate> {
        match self {
            SelectionValue::Single(date) => *date,
            SelectionValue::Range(range) => range.from(),
        }
    }

    /// The same value viewed in `zone`.
    pub fn with_zone(&self, zone: Zone) -> Self {
        match self {
            SelectionValue::Single(date) => SelectionValue::Single(date.map(|d| d.with_zone(zone))),
            SelectionValue::Range(range) => SelectionValue::Range(range.with_zone(zone)),
        }
    }

    pub fn as_range(&self) -> Option<&DateRangeValue> {
        match self {
            SelectionValue::Range(range) => Some(range),
            SelectionValue::Single(_) => None,
        }
    }
}
