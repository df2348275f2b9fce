//! Text shown in the input field bound to a picker.

use crate::date::strftime_items;
use crate::error::PickerError;
use crate::value::SelectionValue;

/// `Wed, February 18, 2026`
pub const DEFAULT_DATE_FORMAT: &str = "%a, %B %-d, %Y";

pub const DEFAULT_PLACEHOLDER: &str = "Select Date";

const RANGE_SEPARATOR: &str = " – ";

/// Render `value` with a `chrono` strftime pattern, in each date's own zone.
///
/// Empty values render as an empty string (the caller shows
/// [`DEFAULT_PLACEHOLDER`] instead). A range missing its end renders its
/// start only.
///
/// # Errors
///
/// Returns [`PickerError::InvalidArgument`] if `pattern` is not a usable
/// strftime pattern, whether or not the value is empty.
pub fn format_value(value: &SelectionValue, pattern: &str) -> Result<String, PickerError> {
    check_pattern(pattern)?;
    match value {
        SelectionValue::Single(None) => Ok(String::new()),
        SelectionValue::Single(Some(date)) => date.format(pattern),
        SelectionValue::Range(range) => match (range.from(), range.to()) {
            (Some(from), Some(to)) => Ok(format!(
                "{}{RANGE_SEPARATOR}{}",
                from.format(pattern)?,
                to.format(pattern)?
            )),
            (Some(only), None) | (None, Some(only)) => only.format(pattern),
            (None, None) => Ok(String::new()),
        },
    }
}

/// Reject a pattern with unknown strftime specifiers.
///
/// # Errors
///
/// Returns [`PickerError::InvalidArgument`] naming the pattern.
pub fn check_pattern(pattern: &str) -> Result<(), PickerError> {
    strftime_items(pattern).map(|_| ())
}
