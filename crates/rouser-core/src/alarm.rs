//! Alarm records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::MinuteKey;
use crate::error::ValidationError;

/// A daily recurring time-of-day. There is no date component: 07:00 means
/// every day at 07:00, so a time "in the past" today is simply tomorrow's
/// firing and is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireTime {
    pub hour: u32,
    pub minute: u32,
}

impl FireTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Whether this time-of-day falls inside the given calendar minute.
    pub fn matches(&self, key: MinuteKey) -> bool {
        self.hour == key.hour && self.minute == key.minute
    }
}

impl fmt::Display for FireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A persisted alarm definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    pub fire_time: FireTime,
    pub enabled: bool,
    #[serde(default)]
    pub label: String,
    /// Ordered track ids to play on fire. Empty means "the library's
    /// selected playlist at fire time".
    #[serde(default)]
    pub track_ids: Vec<String>,
    /// The calendar minute this alarm last fired in. Written only by the
    /// scheduler; the at-most-once-per-minute guarantee lives here.
    #[serde(default)]
    pub last_fired: Option<MinuteKey>,
}

impl Alarm {
    pub fn new(fire_time: FireTime, label: String, track_ids: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            fire_time,
            enabled: true,
            label,
            track_ids,
            last_fired: None,
        }
    }
}
