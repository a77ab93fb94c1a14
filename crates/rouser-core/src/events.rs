//! Typed events and the subscriber bus.
//!
//! Every observable state change in the engine produces an [`Event`].
//! Subscribers receive them over plain channels, in the order the
//! underlying transitions occurred. Delivery is at-least-once; listeners
//! must tolerate duplicate identical events.

use std::sync::mpsc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::FireTime;
use crate::playback::PlaybackStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// An alarm was scheduled or re-enabled.
    AlarmArmed {
        id: String,
        fire_time: FireTime,
        at: DateTime<Utc>,
    },
    /// An alarm was cancelled or disabled.
    AlarmDisarmed {
        id: String,
        at: DateTime<Utc>,
    },
    /// The scheduler recognized a matching minute for an alarm.
    AlarmFired {
        id: String,
        label: String,
        at: DateTime<Utc>,
    },
    PlaybackStatusChanged {
        status: PlaybackStatus,
        at: DateTime<Utc>,
    },
    TrackChanged {
        index: usize,
        track_id: String,
        at: DateTime<Utc>,
    },
}

/// Fan-out of [`Event`]s to any number of subscribers.
///
/// Publishing happens under `&mut self`, so events leave the bus in
/// transition order. Subscribers whose receiver was dropped are pruned on
/// the next publish.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::Sender<Event>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: &Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disarmed(id: &str) -> Event {
        Event::AlarmDisarmed {
            id: id.into(),
            at: Utc::now(),
        }
    }

    #[test]
    fn subscribers_receive_in_publish_order() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        bus.publish(&disarmed("a"));
        bus.publish(&disarmed("b"));
        let ids: Vec<String> = rx
            .try_iter()
            .map(|e| match e {
                Event::AlarmDisarmed { id, .. } => id,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);
        bus.publish(&disarmed("a"));
        assert!(bus.subscribers.is_empty());
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let json = serde_json::to_value(disarmed("a")).unwrap();
        assert_eq!(json["type"], "alarm_disarmed");
        assert_eq!(json["id"], "a");
    }
}
