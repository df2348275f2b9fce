//! The interactive selection state machine behind a date picker.
//!
//! A [`DateRangeSelectionController`] owns the current selection and the
//! visible month(s). The rendering surface forwards user input to it
//! (`click_day`, `click_today`, `apply_relative_range`, navigation) and the
//! controller reports every value change to the `on_change` observer, and
//! every visible-month change to `on_month_change`.
//!
//! # Range variant
//!
//! | State            | Day click D                                   |
//! |------------------|-----------------------------------------------|
//! | Empty            | Partial(startOfDay D)                         |
//! | Partial(X)       | Complete(startOfDay min(X, D), endOfDay max)  |
//! | Complete         | Partial(startOfDay D)                         |
//!
//! Clicking X again while Partial(X) completes a one-day range. Applying a
//! relative range jumps straight to Complete.
//!
//! # Single variant
//!
//! A day click always selects that day. The "Today" shortcut is special: if
//! today is disabled it only moves the visible month to today's month. The
//! range variant ignores the shortcut altogether.
//!
//! Disabled days never change the selection.

use log::debug;
use serde::Serialize;

use crate::clock::{self, Clock, SystemClock};
use crate::config::PickerConfig;
use crate::date::CalendarDate;
use crate::disabled::DisabledDays;
use crate::error::PickerError;
use crate::month::VisibleMonth;
use crate::range::{
    definitions_for, resolve, RangeGroup, RelativeRange, RelativeRangeDefinition, ResolveOptions,
    WeekStartDay,
};
use crate::value::{DateRangeValue, RangeState, SelectionValue, SelectionVariant};
use crate::zone::Zone;

pub type ChangeHandler = Box<dyn FnMut(SelectionValue, &Interaction)>;
pub type MonthChangeHandler = Box<dyn FnMut(VisibleMonth)>;
pub type SubmitHandler = Box<dyn FnMut()>;
pub type TooltipProvider = Box<dyn Fn(&CalendarDate) -> Option<String>>;

/// What triggered a value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "range", rename_all = "snake_case")]
pub enum InteractionSource {
    DayClick,
    TodayButton,
    RelativeRange(RelativeRange),
    Revert,
}

/// Metadata passed to `on_change` alongside the new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub source: InteractionSource,
    /// State of the clicked day as it was rendered before the click.
    pub day: Option<DayState>,
}

/// Everything a rendering surface needs to draw one day cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayState {
    pub disabled: bool,
    pub selected: bool,
    pub range_start: bool,
    pub range_end: bool,
    pub in_range: bool,
    pub today: bool,
    /// Not part of any visible month.
    pub outside: bool,
    pub tooltip: Option<String>,
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened (disabled day, or Today in the range variant).
    Ignored,
    /// The value changed and `on_change` fired.
    Changed,
    /// Only the visible month changed.
    MonthChanged,
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Configures and builds a [`DateRangeSelectionController`].
pub struct ControllerBuilder {
    variant: SelectionVariant,
    value: Option<SelectionValue>,
    zone: Zone,
    options: ResolveOptions,
    ranges: Vec<RangeGroup>,
    clock: Box<dyn Clock>,
    disabled: DisabledDays,
    on_change: Option<ChangeHandler>,
    on_month_change: Option<MonthChangeHandler>,
    on_submit: Option<SubmitHandler>,
    tooltip: Option<TooltipProvider>,
}

impl ControllerBuilder {
    pub fn new(variant: SelectionVariant) -> Self {
        Self {
            variant,
            value: None,
            zone: Zone::Local,
            options: ResolveOptions::default(),
            ranges: Vec::new(),
            clock: Box::new(SystemClock),
            disabled: DisabledDays::None,
            on_change: None,
            on_month_change: None,
            on_submit: None,
            tooltip: None,
        }
    }

    /// Start from a [`PickerConfig`]: variant, zone, week start, offered
    /// ranges and disabled days.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidTimezone`] if the configured timezone is unknown.
    pub fn from_config(config: &PickerConfig) -> Result<Self, PickerError> {
        let mut builder = Self::new(config.variant)
            .zone(config.zone()?)
            .week_start(config.week_start)
            .disabled_days(config.disabled_days());
        builder.ranges = config.ranges.clone();
        Ok(builder)
    }

    /// Initial value. Its shape must match the variant; its dates are
    /// re-read in the picker's zone.
    pub fn value(mut self, value: SelectionValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Set the zone from an optional IANA name (`None` = system local).
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidTimezone`] for an unknown name.
    pub fn timezone(self, name: Option<&str>) -> Result<Self, PickerError> {
        let zone = Zone::parse(name)?;
        Ok(self.zone(zone))
    }

    pub fn week_start(mut self, week_start: WeekStartDay) -> Self {
        self.options.week_start = week_start;
        self
    }

    /// Relative range groups offered to the user; empty means all.
    pub fn ranges(mut self, groups: &[RangeGroup]) -> Self {
        self.ranges = groups.to_vec();
        self
    }

    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn disabled_days(mut self, disabled: DisabledDays) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(SelectionValue, &Interaction) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_month_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(VisibleMonth) + 'static,
    {
        self.on_month_change = Some(Box::new(f));
        self
    }

    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn tooltip<F>(mut self, f: F) -> Self
    where
        F: Fn(&CalendarDate) -> Option<String> + 'static,
    {
        self.tooltip = Some(Box::new(f));
        self
    }

    /// # Errors
    ///
    /// Returns [`PickerError::MissingCallback`] if no `on_change` handler was
    /// registered, or [`PickerError::InvalidArgument`] if the initial value's
    /// shape does not match the variant.
    pub fn build(self) -> Result<DateRangeSelectionController, PickerError> {
        let on_change = self.on_change.ok_or(PickerError::MissingCallback("on_change"))?;
        if let Some(value) = &self.value {
            check_variant(self.variant, value)?;
        }
        let zone = self.zone;
        let value = self
            .value
            .map(|v| v.with_zone(zone))
            .unwrap_or(SelectionValue::empty(self.variant));

        let month_of = |date: CalendarDate| VisibleMonth::of(date.with_zone(zone).date());
        let this_month = month_of(clock::today(self.clock.as_ref(), zone));

        let current_month = value.anchor().map(month_of).unwrap_or(this_month);
        let (from, to) = value
            .as_range()
            .map(|r| (r.from(), r.to()))
            .unwrap_or((None, None));
        let start_month = from.map(month_of).unwrap_or(this_month);
        let end_month = match (from, to) {
            (Some(from), Some(to)) if month_of(from) == month_of(to) => month_of(from).shift(1),
            (Some(_), Some(to)) => month_of(to),
            _ => this_month.shift(1),
        };

        debug!(
            "building {:?} picker in {zone}, showing {current_month}",
            self.variant
        );

        Ok(DateRangeSelectionController {
            variant: self.variant,
            zone,
            options: self.options,
            ranges: self.ranges,
            clock: self.clock,
            disabled: self.disabled,
            value,
            committed: value,
            current_month,
            start_month,
            end_month,
            range_name: None,
            on_change,
            on_month_change: self.on_month_change,
            on_submit: self.on_submit,
            tooltip: self.tooltip,
        })
    }
}

fn check_variant(variant: SelectionVariant, value: &SelectionValue) -> Result<(), PickerError> {
    if value.variant() == variant {
        Ok(())
    } else {
        Err(PickerError::InvalidArgument(format!(
            "{:?} value given to a {variant:?} picker",
            value.variant()
        )))
    }
}

// ── Controller ──────────────────────────────────────────────────────────────

/// Tracks a single-date or date-range selection and the visible month(s).
pub struct DateRangeSelectionController {
    variant: SelectionVariant,
    zone: Zone,
    options: ResolveOptions,
    ranges: Vec<RangeGroup>,
    clock: Box<dyn Clock>,
    disabled: DisabledDays,
    value: SelectionValue,
    /// Last value confirmed with [`submit`](Self::submit).
    committed: SelectionValue,
    current_month: VisibleMonth,
    start_month: VisibleMonth,
    end_month: VisibleMonth,
    range_name: Option<RelativeRange>,
    on_change: ChangeHandler,
    on_month_change: Option<MonthChangeHandler>,
    on_submit: Option<SubmitHandler>,
    tooltip: Option<TooltipProvider>,
}

impl DateRangeSelectionController {
    pub fn builder(variant: SelectionVariant) -> ControllerBuilder {
        ControllerBuilder::new(variant)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn variant(&self) -> SelectionVariant {
        self.variant
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn value(&self) -> SelectionValue {
        self.value
    }

    pub fn committed(&self) -> SelectionValue {
        self.committed
    }

    /// `None` for the single variant.
    pub fn range_state(&self) -> Option<RangeState> {
        self.value.as_range().map(DateRangeValue::state)
    }

    pub fn current_month(&self) -> VisibleMonth {
        self.current_month
    }

    pub fn start_month(&self) -> VisibleMonth {
        self.start_month
    }

    pub fn end_month(&self) -> VisibleMonth {
        self.end_month
    }

    /// The relative range that produced the current value, until the next day click.
    pub fn range_name(&self) -> Option<RelativeRange> {
        self.range_name
    }

    /// Relative ranges this picker offers.
    pub fn relative_ranges(&self) -> Vec<&'static RelativeRangeDefinition> {
        definitions_for(&self.ranges)
    }

    /// Start of the current day in the picker's zone.
    pub fn today(&self) -> CalendarDate {
        clock::today(self.clock.as_ref(), self.zone)
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled.matches(date, self.zone)
    }

    pub fn day_state(&self, date: &CalendarDate) -> DayState {
        let date = date.with_zone(self.zone);
        let mut state = DayState {
            disabled: self.is_disabled(&date),
            today: self.today().same_day(&date),
            tooltip: self.tooltip.as_ref().and_then(|f| f(&date)),
            ..DayState::default()
        };

        match self.value {
            SelectionValue::Single(selected) => {
                state.selected = selected.is_some_and(|s| date.same_day(&s));
                state.outside = !self.current_month.contains(date.date());
            }
            SelectionValue::Range(range) => {
                state.range_start = range.from().is_some_and(|f| date.same_day(&f));
                state.range_end = range.to().is_some_and(|t| date.same_day(&t));
                state.in_range = range.contains_day(&date);
                state.selected = state.range_start || state.range_end || state.in_range;
                state.outside = !(self.start_month.contains(date.date())
                    || self.end_month.contains(date.date()));
            }
        }
        state
    }

    // ── Clicks ──────────────────────────────────────────────────────────

    /// Handle a click on a day cell.
    pub fn click_day(&mut self, date: CalendarDate) -> ClickOutcome {
        self.select_day(date.with_zone(self.zone), InteractionSource::DayClick)
    }

    /// Handle the "Today" shortcut.
    pub fn click_today(&mut self) -> ClickOutcome {
        if self.variant == SelectionVariant::Range {
            debug!("today shortcut ignored by range picker");
            return ClickOutcome::Ignored;
        }

        let today = self.today();
        if self.is_disabled(&today) {
            let month = VisibleMonth::of(today.date());
            debug!("today {} is disabled, showing {month}", today.date());
            self.current_month = month;
            self.notify_month(month);
            return ClickOutcome::MonthChanged;
        }

        self.select_day(today, InteractionSource::TodayButton)
    }

    fn select_day(&mut self, date: CalendarDate, source: InteractionSource) -> ClickOutcome {
        if self.is_disabled(&date) {
            debug!("click on disabled day {} ignored", date.date());
            return ClickOutcome::Ignored;
        }

        let day = self.day_state(&date);
        self.range_name = None;

        match self.value {
            SelectionValue::Range(range) => {
                let next = match range.state() {
                    RangeState::Empty | RangeState::Complete(..) => {
                        DateRangeValue::partial(date.start_of_day())
                    }
                    RangeState::Partial(anchor) => DateRangeValue::spanning(anchor, date),
                };
                debug!("range {:?} -> {:?}", range.state(), next.state());
                self.value = SelectionValue::Range(next);
            }
            SelectionValue::Single(_) => {
                debug!("selected {}", date.date());
                self.value = SelectionValue::Single(Some(date.start_of_day()));
                self.show_month(VisibleMonth::of(date.date()));
            }
        }

        self.emit_change(source, Some(day));
        ClickOutcome::Changed
    }

    // ── Relative ranges ─────────────────────────────────────────────────

    /// Replace the selection with a resolved relative range.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidArgument`] for the single variant or for
    /// a range whose group this picker does not offer.
    pub fn apply_relative_range(&mut self, range: RelativeRange) -> Result<(), PickerError> {
        if self.variant == SelectionVariant::Single {
            return Err(PickerError::InvalidArgument(format!(
                "relative range '{range}' needs a range picker"
            )));
        }
        if !self.ranges.is_empty() && !self.ranges.contains(&range.group()) {
            return Err(PickerError::InvalidArgument(format!(
                "relative range '{range}' is not offered by this picker"
            )));
        }

        let now = clock::now(self.clock.as_ref(), self.zone);
        let resolved = resolve(range, &now, &self.options)?;
        debug!("applying {range}: {resolved:?}");

        self.value = SelectionValue::Range(resolved);
        self.range_name = Some(range);

        if let Some(from) = resolved.from() {
            let month = VisibleMonth::of(from.date());
            let moved = self.current_month != month || self.start_month != month;
            self.current_month = month;
            self.start_month = month;
            if self.end_month <= month {
                self.end_month = month.shift(1);
            }
            if moved {
                self.notify_month(month);
            }
        }

        self.emit_change(InteractionSource::RelativeRange(range), None);
        Ok(())
    }

    /// [`apply_relative_range`](Self::apply_relative_range) by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidArgument`] for an unknown identifier.
    pub fn apply_relative_range_id(&mut self, id: &str) -> Result<(), PickerError> {
        self.apply_relative_range(id.parse()?)
    }

    // ── Navigation ──────────────────────────────────────────────────────

    pub fn set_visible_month(&mut self, month: VisibleMonth) {
        self.current_month = month;
        self.notify_month(month);
    }

    pub fn show_next_month(&mut self) {
        self.set_visible_month(self.current_month.shift(1));
    }

    pub fn show_previous_month(&mut self) {
        self.set_visible_month(self.current_month.shift(-1));
    }

    /// Navigate the first panel of a two-month range view.
    pub fn set_start_month(&mut self, month: VisibleMonth) {
        self.start_month = month;
        self.notify_month(month);
    }

    /// Navigate the second panel of a two-month range view.
    pub fn set_end_month(&mut self, month: VisibleMonth) {
        self.end_month = month;
        self.notify_month(month);
    }

    // ── Host synchronisation and commit ─────────────────────────────────

    /// Replace the value from the host without firing callbacks. The dates
    /// are re-read in the picker's zone.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidArgument`] if the value's shape does not
    /// match the variant.
    pub fn set_value(&mut self, value: SelectionValue) -> Result<(), PickerError> {
        check_variant(self.variant, &value)?;
        self.value = value.with_zone(self.zone);
        self.range_name = None;
        Ok(())
    }

    /// Commit the current value and notify `on_submit`.
    pub fn submit(&mut self) {
        debug!("committing {:?}", self.value);
        self.committed = self.value;
        if let Some(f) = self.on_submit.as_mut() {
            f();
        }
    }

    /// Discard uncommitted changes. Returns whether the value changed.
    pub fn revert(&mut self) -> bool {
        if self.value == self.committed {
            return false;
        }
        debug!("reverting to {:?}", self.committed);
        self.value = self.committed;
        self.range_name = None;
        self.emit_change(InteractionSource::Revert, None);
        true
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn emit_change(&mut self, source: InteractionSource, day: Option<DayState>) {
        if self.variant == SelectionVariant::Single {
            self.committed = self.value;
        }
        let interaction = Interaction { source, day };
        (self.on_change)(self.value, &interaction);
    }

    /// Move the single-month view to `month` if it is not already showing.
    fn show_month(&mut self, month: VisibleMonth) {
        if self.current_month != month {
            self.current_month = month;
            self.notify_month(month);
        }
    }

    fn notify_month(&mut self, month: VisibleMonth) {
        debug!("visible month -> {month}");
        if let Some(f) = self.on_month_change.as_mut() {
            f(month);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Change(SelectionValue, InteractionSource),
        Month(VisibleMonth),
        Submit,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    fn utc() -> Zone {
        Zone::parse(Some("UTC")).unwrap()
    }

    fn clock() -> FixedClock {
        // Wednesday, February 18, 2026, 14:30:00 UTC
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap())
    }

    fn day(m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(utc(), 2026, m, d).unwrap()
    }

    fn feb(d: u32) -> CalendarDate {
        day(2, d)
    }

    fn month(y: i32, m: u32) -> VisibleMonth {
        VisibleMonth::new(y, m).unwrap()
    }

    fn recording(variant: SelectionVariant) -> (ControllerBuilder, Log) {
        let log: Log = Rc::default();
        let changes = Rc::clone(&log);
        let months = Rc::clone(&log);
        let submits = Rc::clone(&log);
        let builder = ControllerBuilder::new(variant)
            .zone(utc())
            .clock(clock())
            .on_change(move |value, interaction| {
                changes
                    .borrow_mut()
                    .push(Event::Change(value, interaction.source))
            })
            .on_month_change(move |m| months.borrow_mut().push(Event::Month(m)))
            .on_submit(move || submits.borrow_mut().push(Event::Submit));
        (builder, log)
    }

    fn range_picker() -> (DateRangeSelectionController, Log) {
        let (builder, log) = recording(SelectionVariant::Range);
        (builder.build().unwrap(), log)
    }

    fn single_picker() -> (DateRangeSelectionController, Log) {
        let (builder, log) = recording(SelectionVariant::Single);
        (builder.build().unwrap(), log)
    }

    fn changes(log: &Log) -> Vec<SelectionValue> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Change(v, _) => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn month_events(log: &Log) -> Vec<VisibleMonth> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Month(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn test_build_without_on_change_fails() {
        let result = ControllerBuilder::new(SelectionVariant::Range).build();
        let err = result.err().unwrap().to_string();
        assert!(err.contains("on_change"), "got: {err}");
    }

    #[test]
    fn test_build_rejects_mismatched_value() {
        let (builder, _) = recording(SelectionVariant::Range);
        let result = builder.value(SelectionValue::Single(Some(feb(3)))).build();
        assert!(matches!(result, Err(PickerError::InvalidArgument(_))));
    }

    #[test]
    fn test_initial_months_without_value() {
        let (picker, log) = range_picker();
        assert_eq!(picker.current_month(), month(2026, 2));
        assert_eq!(picker.start_month(), month(2026, 2));
        assert_eq!(picker.end_month(), month(2026, 3));
        assert_eq!(picker.range_state(), Some(RangeState::Empty));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_initial_months_follow_value() {
        let (builder, _) = recording(SelectionVariant::Range);
        let picker = builder
            .value(SelectionValue::Range(DateRangeValue::spanning(
                day(4, 10),
                day(6, 2),
            )))
            .build()
            .unwrap();
        assert_eq!(picker.current_month(), month(2026, 4));
        assert_eq!(picker.start_month(), month(2026, 4));
        assert_eq!(picker.end_month(), month(2026, 6));
    }

    #[test]
    fn test_initial_end_month_skips_ahead_when_range_in_one_month() {
        let (builder, _) = recording(SelectionVariant::Range);
        let picker = builder
            .value(SelectionValue::Range(DateRangeValue::spanning(
                day(4, 10),
                day(4, 20),
            )))
            .build()
            .unwrap();
        assert_eq!(picker.start_month(), month(2026, 4));
        assert_eq!(picker.end_month(), month(2026, 5));
    }

    // ── Range variant ───────────────────────────────────────────────────

    #[test]
    fn test_range_click_then_earlier_day_completes_ordered() {
        let (mut picker, log) = range_picker();

        assert_eq!(picker.click_day(feb(10)), ClickOutcome::Changed);
        assert_eq!(picker.range_state(), Some(RangeState::Partial(feb(10))));

        assert_eq!(picker.click_day(feb(5)), ClickOutcome::Changed);
        assert_eq!(
            picker.range_state(),
            Some(RangeState::Complete(feb(5), feb(10).end_of_day()))
        );
        assert_eq!(changes(&log).len(), 2);
    }

    #[test]
    fn test_range_same_day_twice_spans_that_day() {
        let (mut picker, _) = range_picker();
        picker.click_day(feb(12).end_of_day());
        picker.click_day(feb(12));
        assert_eq!(
            picker.range_state(),
            Some(RangeState::Complete(feb(12), feb(12).end_of_day()))
        );
    }

    #[test]
    fn test_range_click_after_complete_starts_over() {
        let (mut picker, log) = range_picker();
        picker.click_day(feb(5));
        picker.click_day(feb(10));
        picker.click_day(feb(20));
        assert_eq!(picker.range_state(), Some(RangeState::Partial(feb(20))));
        assert_eq!(changes(&log).len(), 3);
    }

    #[test]
    fn test_range_disabled_day_is_ignored() {
        let (builder, log) = recording(SelectionVariant::Range);
        let mut picker = builder
            .disabled_days(DisabledDays::dates([feb(7).date()]))
            .build()
            .unwrap();

        picker.click_day(feb(5));
        assert_eq!(picker.click_day(feb(7)), ClickOutcome::Ignored);
        assert_eq!(picker.range_state(), Some(RangeState::Partial(feb(5))));
        assert_eq!(changes(&log).len(), 1);
    }

    #[test]
    fn test_range_today_shortcut_is_ignored() {
        let (mut picker, log) = range_picker();
        assert_eq!(picker.click_today(), ClickOutcome::Ignored);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_range_clicks_do_not_move_panels() {
        let (mut picker, log) = range_picker();
        picker.click_day(day(3, 20));
        assert_eq!(picker.start_month(), month(2026, 2));
        assert!(month_events(&log).is_empty());
    }

    // ── Relative ranges ─────────────────────────────────────────────────

    #[test]
    fn test_relative_range_completes_and_moves_month() {
        let (mut picker, log) = range_picker();
        picker.click_day(feb(5));
        picker.apply_relative_range(RelativeRange::LastMonth).unwrap();

        assert_eq!(
            picker.range_state(),
            Some(RangeState::Complete(day(1, 1), day(1, 31).end_of_day()))
        );
        assert_eq!(picker.range_name(), Some(RelativeRange::LastMonth));
        assert_eq!(picker.current_month(), month(2026, 1));
        assert_eq!(picker.start_month(), month(2026, 1));
        assert_eq!(month_events(&log), vec![month(2026, 1)]);

        let last = log.borrow().last().cloned().unwrap();
        assert!(matches!(
            last,
            Event::Change(_, InteractionSource::RelativeRange(RelativeRange::LastMonth))
        ));
    }

    #[test]
    fn test_relative_range_in_current_month_fires_no_month_change() {
        let (mut picker, log) = range_picker();
        picker.apply_relative_range_id("this week").unwrap();
        assert!(month_events(&log).is_empty());
        assert_eq!(
            picker.range_state(),
            Some(RangeState::Complete(feb(16), feb(22).end_of_day()))
        );
    }

    #[test]
    fn test_day_click_clears_range_name() {
        let (mut picker, _) = range_picker();
        picker.apply_relative_range(RelativeRange::Today).unwrap();
        picker.click_day(feb(3));
        assert_eq!(picker.range_name(), None);
    }

    #[test]
    fn test_relative_range_unknown_id_fails() {
        let (mut picker, log) = range_picker();
        assert!(picker.apply_relative_range_id("fortnight").is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_relative_range_rejected_by_single_picker() {
        let (mut picker, _) = single_picker();
        let result = picker.apply_relative_range(RelativeRange::ThisWeek);
        assert!(matches!(result, Err(PickerError::InvalidArgument(_))));
    }

    #[test]
    fn test_relative_range_outside_offered_groups_fails() {
        let (builder, _) = recording(SelectionVariant::Range);
        let mut picker = builder.ranges(&[RangeGroup::Week]).build().unwrap();
        assert_eq!(picker.relative_ranges().len(), 3);
        assert!(picker.apply_relative_range(RelativeRange::ThisYear).is_err());
        assert!(picker.apply_relative_range(RelativeRange::ThisWeek).is_ok());
    }

    #[test]
    fn test_relative_range_uses_week_start() {
        let (builder, _) = recording(SelectionVariant::Range);
        let mut picker = builder.week_start(WeekStartDay::Sunday).build().unwrap();
        picker.apply_relative_range(RelativeRange::ThisWeek).unwrap();
        assert_eq!(
            picker.range_state(),
            Some(RangeState::Complete(feb(15), feb(21).end_of_day()))
        );
    }

    // ── Single variant ──────────────────────────────────────────────────

    #[test]
    fn test_single_click_selects_start_of_day() {
        let (mut picker, log) = single_picker();
        let noon = CalendarDate::parse("2026-02-11T12:00:00Z", utc()).unwrap();
        assert_eq!(picker.click_day(noon), ClickOutcome::Changed);
        assert_eq!(picker.value(), SelectionValue::Single(Some(feb(11))));
        assert_eq!(changes(&log), vec![SelectionValue::Single(Some(feb(11)))]);
        assert!(month_events(&log).is_empty());
    }

    #[test]
    fn test_single_click_on_other_month_moves_view() {
        let (mut picker, log) = single_picker();
        picker.click_day(day(3, 2));
        assert_eq!(picker.current_month(), month(2026, 3));
        assert_eq!(month_events(&log), vec![month(2026, 3)]);
    }

    #[test]
    fn test_single_today_selects_today() {
        let (mut picker, log) = single_picker();
        assert_eq!(picker.click_today(), ClickOutcome::Changed);
        assert_eq!(picker.value(), SelectionValue::Single(Some(feb(18))));
        assert!(matches!(
            log.borrow()[0],
            Event::Change(_, InteractionSource::TodayButton)
        ));
    }

    #[test]
    fn test_single_disabled_today_only_changes_month() {
        let (builder, log) = recording(SelectionVariant::Single);
        let mut picker = builder
            .value(SelectionValue::Single(Some(day(5, 1))))
            .disabled_days(DisabledDays::dates([feb(18).date()]))
            .build()
            .unwrap();
        assert_eq!(picker.current_month(), month(2026, 5));

        assert_eq!(picker.click_today(), ClickOutcome::MonthChanged);
        assert_eq!(picker.current_month(), month(2026, 2));
        assert_eq!(picker.value(), SelectionValue::Single(Some(day(5, 1))));
        assert_eq!(*log.borrow(), vec![Event::Month(month(2026, 2))]);
    }

    #[test]
    fn test_single_disabled_day_is_ignored() {
        let (builder, log) = recording(SelectionVariant::Single);
        let mut picker = builder
            .disabled_days(DisabledDays::predicate(|d| d.date() < feb(18).date()))
            .build()
            .unwrap();
        assert_eq!(picker.click_day(feb(17)), ClickOutcome::Ignored);
        assert_eq!(picker.click_day(feb(18)), ClickOutcome::Changed);
        assert_eq!(changes(&log).len(), 1);
    }

    // ── Navigation ──────────────────────────────────────────────────────

    #[test]
    fn test_navigation_fires_month_change_only() {
        let (mut picker, log) = single_picker();
        picker.show_next_month();
        picker.show_next_month();
        picker.show_previous_month();
        assert_eq!(picker.current_month(), month(2026, 3));
        assert_eq!(
            month_events(&log),
            vec![month(2026, 3), month(2026, 4), month(2026, 3)]
        );
        assert!(changes(&log).is_empty());
    }

    #[test]
    fn test_range_panels_navigate_independently() {
        let (mut picker, log) = range_picker();
        picker.set_start_month(month(2025, 12));
        picker.set_end_month(month(2026, 6));
        assert_eq!(picker.start_month(), month(2025, 12));
        assert_eq!(picker.end_month(), month(2026, 6));
        assert_eq!(month_events(&log), vec![month(2025, 12), month(2026, 6)]);
    }

    // ── Commit / revert ─────────────────────────────────────────────────

    #[test]
    fn test_submit_then_revert_restores_committed_range() {
        let (mut picker, log) = range_picker();
        picker.click_day(feb(5));
        picker.click_day(feb(10));
        picker.submit();
        let committed = picker.value();
        assert_eq!(picker.committed(), committed);

        picker.click_day(feb(20));
        assert!(picker.revert());
        assert_eq!(picker.value(), committed);
        assert!(!picker.revert());

        let events = log.borrow();
        assert!(events.contains(&Event::Submit));
        assert!(matches!(
            events.last(),
            Some(Event::Change(_, InteractionSource::Revert))
        ));
    }

    #[test]
    fn test_single_variant_commits_on_change() {
        let (mut picker, _) = single_picker();
        picker.click_day(feb(3));
        assert_eq!(picker.committed(), SelectionValue::Single(Some(feb(3))));
        assert!(!picker.revert());
    }

    #[test]
    fn test_set_value_is_silent() {
        let (mut picker, log) = range_picker();
        picker
            .set_value(SelectionValue::Range(DateRangeValue::partial(feb(3))))
            .unwrap();
        assert_eq!(picker.range_state(), Some(RangeState::Partial(feb(3))));
        assert!(log.borrow().is_empty());
        assert!(picker.set_value(SelectionValue::Single(None)).is_err());
    }

    fn los_angeles() -> Zone {
        Zone::parse(Some("America/Los_Angeles")).unwrap()
    }

    #[test]
    fn test_set_value_reads_dates_in_picker_zone() {
        let (builder, _) = recording(SelectionVariant::Range);
        let mut picker = builder.zone(los_angeles()).build().unwrap();

        // Midnight UTC on Feb 10 is the afternoon of Feb 9 in Los Angeles
        picker
            .set_value(SelectionValue::Range(DateRangeValue::partial(feb(10))))
            .unwrap();
        let feb_12 = CalendarDate::from_ymd(los_angeles(), 2026, 2, 12).unwrap();
        picker.click_day(feb_12);

        let range = *picker.value().as_range().unwrap();
        assert_eq!(range.from().unwrap().to_rfc3339(), "2026-02-09T00:00:00.000-08:00");
        assert_eq!(range.to().unwrap().to_rfc3339(), "2026-02-12T23:59:59.999-08:00");
    }

    #[test]
    fn test_build_reads_initial_value_in_picker_zone() {
        let (builder, _) = recording(SelectionVariant::Single);
        let picker = builder
            .zone(los_angeles())
            .value(SelectionValue::Single(Some(feb(1))))
            .build()
            .unwrap();

        let selected = picker.value().anchor().unwrap();
        assert_eq!(selected.zone(), los_angeles());
        assert_eq!(selected.to_rfc3339(), "2026-01-31T16:00:00.000-08:00");
        assert_eq!(picker.current_month(), month(2026, 1));
        let jan_31 = CalendarDate::from_ymd(los_angeles(), 2026, 1, 31).unwrap();
        assert!(picker.day_state(&jan_31).selected);
    }

    // ── Day state ───────────────────────────────────────────────────────

    #[test]
    fn test_day_state_for_range() {
        let (builder, _) = recording(SelectionVariant::Range);
        let mut picker = builder
            .tooltip(|d| (d.date() == feb(7).date()).then(|| "Sold out".to_string()))
            .build()
            .unwrap();
        picker.click_day(feb(5));
        picker.click_day(feb(10));

        let start = picker.day_state(&feb(5));
        assert!(start.range_start && start.selected && start.in_range);
        assert!(!start.range_end);

        let middle = picker.day_state(&feb(7));
        assert!(middle.in_range && !middle.range_start && !middle.range_end);
        assert_eq!(middle.tooltip.as_deref(), Some("Sold out"));

        let end = picker.day_state(&feb(10));
        assert!(end.range_end);

        let after = picker.day_state(&feb(11));
        assert!(!after.selected && !after.in_range);

        assert!(picker.day_state(&feb(18)).today);
        assert!(picker.day_state(&day(4, 1)).outside);
        assert!(!picker.day_state(&day(3, 1)).outside);
    }

    #[test]
    fn test_interaction_carries_clicked_day_state() {
        let captured: Rc<RefCell<Option<Interaction>>> = Rc::default();
        let sink = Rc::clone(&captured);
        let mut picker = ControllerBuilder::new(SelectionVariant::Single)
            .zone(utc())
            .clock(clock())
            .on_change(move |_, interaction| *sink.borrow_mut() = Some(interaction.clone()))
            .build()
            .unwrap();

        picker.click_day(feb(18));
        let interaction = captured.borrow().clone().unwrap();
        assert_eq!(interaction.source, InteractionSource::DayClick);
        let day = interaction.day.unwrap();
        assert!(day.today);
        assert!(!day.selected);
    }

    #[test]
    fn test_builder_from_config() {
        let config = PickerConfig::from_json(
            r#"{"variant": "range", "timezone": "UTC", "disabled_weekdays": ["Sun"]}"#,
        )
        .unwrap();
        let mut picker = ControllerBuilder::from_config(&config)
            .unwrap()
            .clock(clock())
            .on_change(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(picker.variant(), SelectionVariant::Range);
        assert_eq!(picker.zone().name(), "UTC");
        // Feb 22, 2026 is a Sunday
        assert_eq!(picker.click_day(feb(22)), ClickOutcome::Ignored);
    }
}
