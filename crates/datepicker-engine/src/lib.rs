//! # datepicker-engine
//!
//! Deterministic date-picker logic, free of any rendering toolkit.
//!
//! The engine resolves named relative date ranges ("last week", "trailing
//! quarter") against an explicit "now", and drives single-date and date-range
//! selection from user clicks, reporting each change to caller-supplied
//! callbacks. Timezones are passed explicitly; there is no global state.
//!
//! ## Modules
//!
//! - [`range`] — Relative range table and resolution
//! - [`controller`] — Selection state machine and visible-month tracking
//! - [`date`] — `CalendarDate`, an instant viewed through a zone
//! - [`zone`] — System-local or IANA timezone
//! - [`clock`] — The "now" accessor
//! - [`month`] — Visible calendar month
//! - [`value`] — Single and range selection values
//! - [`disabled`] — Disabled-day matchers
//! - [`config`] — JSON picker configuration
//! - [`format`] — Input-field text for a selection
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod controller;
pub mod date;
pub mod disabled;
pub mod error;
pub mod format;
pub mod month;
pub mod range;
pub mod value;
pub mod zone;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PickerConfig;
pub use controller::{
    ClickOutcome, ControllerBuilder, DateRangeSelectionController, DayState, Interaction,
    InteractionSource,
};
pub use date::CalendarDate;
pub use disabled::DisabledDays;
pub use error::PickerError;
pub use format::{check_pattern, format_value, DEFAULT_DATE_FORMAT, DEFAULT_PLACEHOLDER};
pub use month::VisibleMonth;
pub use range::{
    definitions, definitions_for, resolve, resolve_id, RangeGroup, RelativeRange,
    RelativeRangeDefinition, ResolveOptions, WeekStartDay,
};
pub use value::{DateRangeValue, RangeState, SelectionValue, SelectionVariant};
pub use zone::Zone;
