//! Picker configuration loaded from JSON.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::disabled::DisabledDays;
use crate::error::PickerError;
use crate::range::{RangeGroup, ResolveOptions, WeekStartDay};
use crate::value::SelectionVariant;
use crate::zone::Zone;

/// Declarative picker settings. Every field is optional in JSON.
///
/// ```json
/// {
///   "variant": "range",
///   "timezone": "America/Los_Angeles",
///   "week_start": "sunday",
///   "ranges": ["week", "month"],
///   "disabled_dates": ["2026-02-14"],
///   "disabled_weekdays": ["Sun"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub variant: SelectionVariant,
    /// IANA timezone; absent means system-local time.
    pub timezone: Option<String>,
    pub week_start: WeekStartDay,
    /// Relative range groups offered to the user; empty means all.
    pub ranges: Vec<RangeGroup>,
    pub disabled_dates: Vec<NaiveDate>,
    pub disabled_weekdays: Vec<Weekday>,
}

impl PickerConfig {
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidConfig`] on malformed JSON or unknown
    /// fields, and [`PickerError::InvalidTimezone`] on an unknown timezone.
    pub fn from_json(json: &str) -> Result<Self, PickerError> {
        let config: PickerConfig =
            serde_json::from_str(json).map_err(|e| PickerError::InvalidConfig(e.to_string()))?;
        config.zone()?;
        Ok(config)
    }

    pub fn zone(&self) -> Result<Zone, PickerError> {
        Zone::parse(self.timezone.as_deref())
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            week_start: self.week_start,
        }
    }

    pub fn disabled_days(&self) -> DisabledDays {
        let mut matchers = Vec::new();
        if !self.disabled_dates.is_empty() {
            matchers.push(DisabledDays::dates(self.disabled_dates.iter().copied()));
        }
        if !self.disabled_weekdays.is_empty() {
            matchers.push(DisabledDays::DaysOfWeek(self.disabled_weekdays.clone()));
        }
        match matchers.len() {
            0 => DisabledDays::None,
            1 => matchers.remove(0),
            _ => DisabledDays::Any(matchers),
        }
    }
}
