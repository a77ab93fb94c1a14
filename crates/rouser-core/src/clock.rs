//! Wall-clock access and calendar-minute decomposition.
//!
//! The engine never reads the system clock directly. Anything that needs
//! the current time takes a [`Clock`], so tests can drive evaluation with a
//! manual time source.

use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Read-only source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Calendar-minute granularity used to deduplicate alarm firings.
///
/// Two instants inside the same calendar minute produce equal keys; the
/// scheduler fires an alarm at most once per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl MinuteKey {
    pub fn of(at: DateTime<Local>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            minute: at.minute(),
        }
    }
}
