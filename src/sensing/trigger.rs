//! At-most-once-per-hour write guard.
//!
//! The trigger owns the only piece of long-lived mutable state on the write
//! path: which hour was last logged. Evaluation is split from mutation so
//! the decision can be tested independently and the loop can mark the hour
//! consumed regardless of how the sensor read turned out.

use chrono::{NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyTrigger {
    /// Hour of day (0-23) that was last logged; `None` until the first fire
    /// after process start.
    last_logged_hour: Option<u32>,
}

impl Default for HourlyTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl HourlyTrigger {
    pub fn new() -> Self {
        Self {
            last_logged_hour: None,
        }
    }

    /// Whether a record should be written for this clock reading: we are on
    /// the hour boundary and this hour has not been logged yet. Safe to call
    /// at any cadence; only `mark_fired` changes the answer.
    pub fn should_fire(&self, now: NaiveDateTime) -> bool {
        now.minute() == 0 && self.last_logged_hour != Some(now.hour())
    }

    /// Consume the hour. Called exactly when the loop acts on `should_fire`,
    /// whether or not the sensor read was valid: an invalid read loses that
    /// hour's log opportunity rather than retrying within the hour.
    pub fn mark_fired(&mut self, now: NaiveDateTime) {
        self.last_logged_hour = Some(now.hour());
    }
}
