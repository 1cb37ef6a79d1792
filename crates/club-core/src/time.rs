//! Working hours and the run timeline.
//!
//! Log events carry only a clock time (`HH:MM`). To bill sessions that cross
//! midnight, every clock time is anchored on a timeline that starts on the
//! opening day and only moves forward.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Opening and closing clock times of the club.
///
/// When `close <= open` the club closes on the following day, so the
/// interval always has a positive length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl WorkingHours {
    pub const fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    /// Clock time the club opens.
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    /// Clock time the club closes.
    pub const fn close(&self) -> NaiveTime {
        self.close
    }

    /// Returns true if closing happens on the day after opening.
    pub fn is_overnight(&self) -> bool {
        self.close <= self.open
    }

    /// Opening instant on the run timeline.
    pub fn opens_at(&self) -> NaiveDateTime {
        opening_day().and_time(self.open)
    }

    /// Closing instant on the run timeline.
    pub fn closes_at(&self) -> NaiveDateTime {
        let day = if self.is_overnight() {
            opening_day() + Duration::days(1)
        } else {
            opening_day()
        };
        day.and_time(self.close)
    }

    /// Length of the working day.
    pub fn length(&self) -> Duration {
        self.closes_at() - self.opens_at()
    }

    /// Returns true if `at` falls in `[open, close)`.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.opens_at() <= at && at < self.closes_at()
    }
}

/// The day every run starts on. Only differences between instants matter.
fn opening_day() -> NaiveDate {
    NaiveDate::default()
}

/// Anchors clock times of a chronological log onto the run timeline.
#[derive(Debug, Clone)]
pub struct Timeline {
    hours: WorkingHours,
    last: Option<NaiveDateTime>,
}

impl Timeline {
    pub const fn new(hours: WorkingHours) -> Self {
        Self { hours, last: None }
    }

    /// Places `clock` on the timeline.
    ///
    /// The first event lands on the opening day, or on the next day if the
    /// club is open overnight and `clock` is before closing. Later events
    /// land on the earliest day that keeps the timeline non-decreasing.
    pub fn anchor(&mut self, clock: NaiveTime) -> NaiveDateTime {
        let at = match self.last {
            None if self.hours.is_overnight() && clock < self.hours.close() => {
                (opening_day() + Duration::days(1)).and_time(clock)
            }
            None => opening_day().and_time(clock),
            Some(last) => {
                let candidate = last.date().and_time(clock);
                if candidate < last {
                    candidate + Duration::days(1)
                } else {
                    candidate
                }
            }
        };
        self.last = Some(at);
        at
    }
}
