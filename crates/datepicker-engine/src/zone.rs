//! Timezone handling for "now" and day boundaries.
//!
//! A [`Zone`] is either the system-local timezone or a named IANA timezone.
//! It is passed explicitly to everything that needs wall-clock time, so two
//! pickers configured with different zones never interfere with each other.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::PickerError;

/// How far before a DST gap to look for the offset that was in effect.
/// Gaps never exceed one day, so two days always land before the gap starts.
const GAP_LOOKBACK_DAYS: i64 = 2;

/// The timezone used to interpret wall-clock dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The operating system's local timezone.
    #[default]
    Local,
    /// A named IANA timezone (e.g. `America/Los_Angeles`).
    Named(Tz),
}

impl Zone {
    /// Parse an optional IANA name. `None` (or an empty string) selects [`Zone::Local`].
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidTimezone`] if the name is not a known IANA timezone.
    ///
    /// # Examples
    ///
    /// ```
    /// use datepicker_engine::Zone;
    ///
    /// assert_eq!(Zone::parse(None).unwrap(), Zone::Local);
    /// assert!(Zone::parse(Some("Invalid/Zone")).is_err());
    /// ```
    pub fn parse(name: Option<&str>) -> Result<Self, PickerError> {
        match name.map(str::trim) {
            None | Some("") => Ok(Zone::Local),
            Some(s) => s
                .parse::<Tz>()
                .map(Zone::Named)
                .map_err(|_| PickerError::InvalidTimezone(format!("'{s}'"))),
        }
    }

    /// The IANA name, or `"local"` for the system timezone.
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Local => "local",
            Zone::Named(tz) => tz.name(),
        }
    }

    /// Wall-clock time of `instant` in this zone.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => Local.from_utc_datetime(&instant.naive_utc()).naive_local(),
            Zone::Named(tz) => tz.from_utc_datetime(&instant.naive_utc()).naive_local(),
        }
    }

    /// UTC offset in effect at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::Local => Local.offset_from_utc_datetime(&instant.naive_utc()).fix(),
            Zone::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }

    /// The instant at which the wall clock in this zone reads `naive`.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
    /// inside a DST gap are read with the offset in effect before the gap,
    /// which lands them as far past the gap's end as they were past its
    /// start: 00:00 on a day whose midnight is skipped becomes 01:00, and a
    /// skipped calendar day maps onto the start of the next one.
    pub fn from_local(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        if let Some(dt) = self.earliest(naive) {
            return dt;
        }
        let as_utc = Utc.from_utc_datetime(&naive);
        let offset = as_utc
            .checked_sub_signed(Duration::days(GAP_LOOKBACK_DAYS))
            .map(|before| self.offset_at(before))
            .unwrap_or_else(|| self.offset_at(as_utc));
        log::trace!("{naive} falls in a DST gap in {self}, reading it at {offset}");
        as_utc
            .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .unwrap_or(as_utc)
    }

    fn earliest(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
