//! Time source for creation stamps and month boundaries.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Supplies "now" and the user's calendar. Injected so tests can pin both.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `at` in the user's time zone.
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate;

    /// Today's date in the user's time zone.
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }
}

/// Wall-clock time in the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
///
/// Calendar dates are taken at a fixed UTC offset, UTC unless
/// [`FixedClock::with_offset`] says otherwise.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_shared_between_clones() {
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 23, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        let handle = clock.clone();
        handle.advance(Duration::hours(2));
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2025, 2, 1, 1, 0, 0).unwrap());
        handle.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_local_date_follows_offset() {
        // 01:00 UTC on Feb 1 is still Jan 31 at UTC-5.
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 1, 0, 0).unwrap();
        let utc = FixedClock::new(at);
        let eastern = FixedClock::new(at).with_offset(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(eastern.today(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }
}
