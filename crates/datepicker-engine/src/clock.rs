//! The "now" accessor.
//!
//! Everything that needs the current time goes through a [`Clock`] and a
//! [`Zone`], so "today" is the same day for the resolver and the controller,
//! and tests can pin the anchor with [`FixedClock`].

use chrono::{DateTime, Utc};

use crate::date::CalendarDate;
use crate::zone::Zone;

/// Source of the current instant.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The current instant viewed in `zone`.
pub fn now(clock: &dyn Clock, zone: Zone) -> CalendarDate {
    CalendarDate::from_instant(clock.now_utc(), zone)
}

/// Start of the current day in `zone`.
pub fn today(clock: &dyn Clock, zone: Zone) -> CalendarDate {
    now(clock, zone).start_of_day()
}
