//! Playback session state machine.
//!
//! One session is alive at a time. It owns the active queue and the
//! position in it, issues one-way commands to the injected [`AudioEngine`],
//! and reports every observable transition as an [`Event`]. It does not
//! care why playback started -- an alarm fire and a manual play go through
//! the same `start`.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Playing <-> Paused -> Stopped
//! ```
//!
//! `Stopped` ends the session instance; `start` builds a fresh one in place
//! and implicitly stops whatever was live first.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::engine::{AudioEngine, EngineNotice, SkipDirection};
use super::track::TrackQueue;
use crate::error::PlaybackError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Stopped,
}

pub struct PlaybackSession {
    engine: Box<dyn AudioEngine>,
    queue: Option<TrackQueue>,
    current_index: usize,
    status: PlaybackStatus,
}

impl PlaybackSession {
    pub fn new(engine: Box<dyn AudioEngine>) -> Self {
        Self {
            engine,
            queue: None,
            current_index: 0,
            status: PlaybackStatus::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn queue(&self) -> Option<&TrackQueue> {
        self.queue.as_ref()
    }

    pub fn current_track(&self) -> Option<&super::track::Track> {
        self.queue.as_ref()?.get(self.current_index)
    }

    fn is_live(&self) -> bool {
        matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Paused)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new session over `queue`.
    ///
    /// Valid from any state. A live session is stopped first, but only
    /// after the new queue is validated: an [`PlaybackError::EmptyQueue`]
    /// failure leaves whatever is currently playing untouched.
    pub fn start(&mut self, queue: TrackQueue) -> Result<Vec<Event>, PlaybackError> {
        if queue.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }

        let mut events = Vec::new();
        if self.is_live() {
            // Implicit preemption: the old session reaches Stopped before
            // the new one reaches Playing.
            events.push(self.stop());
        }

        self.engine.enqueue(queue.tracks());
        self.engine.play();
        self.queue = Some(queue);
        self.current_index = 0;
        self.status = PlaybackStatus::Playing;
        events.push(Event::PlaybackStatusChanged {
            status: self.status,
            at: Utc::now(),
        });
        events.push(self.track_changed_event());
        Ok(events)
    }

    /// Valid only from `Playing`; silent no-op otherwise.
    pub fn pause(&mut self) -> Option<Event> {
        match self.status {
            PlaybackStatus::Playing => {
                self.engine.pause();
                self.status = PlaybackStatus::Paused;
                Some(Event::PlaybackStatusChanged {
                    status: self.status,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Valid only from `Paused`; silent no-op otherwise.
    pub fn resume(&mut self) -> Option<Event> {
        match self.status {
            PlaybackStatus::Paused => {
                self.engine.play();
                self.status = PlaybackStatus::Playing;
                Some(Event::PlaybackStatusChanged {
                    status: self.status,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Valid from any state; always succeeds. Releases the queue.
    pub fn stop(&mut self) -> Event {
        self.engine.stop();
        self.queue = None;
        self.current_index = 0;
        self.status = PlaybackStatus::Stopped;
        Event::PlaybackStatusChanged {
            status: self.status,
            at: Utc::now(),
        }
    }

    /// Advance to the next track, wrapping past the end. Valid from
    /// `Playing` or `Paused`; status is unchanged.
    pub fn next(&mut self) -> Option<Event> {
        let len = self.navigable_len()?;
        self.current_index = (self.current_index + 1) % len;
        self.engine.skip(SkipDirection::Forward);
        Some(self.track_changed_event())
    }

    /// Step back to the previous track, wrapping before the start. Valid
    /// from `Playing` or `Paused`; status is unchanged.
    pub fn previous(&mut self) -> Option<Event> {
        let len = self.navigable_len()?;
        self.current_index = (self.current_index + len - 1) % len;
        self.engine.skip(SkipDirection::Backward);
        Some(self.track_changed_event())
    }

    /// Adopt a state change reported by the engine itself.
    ///
    /// The engine may stop, pause, or move between tracks for reasons
    /// outside this session's API calls (an interruption, a track ending);
    /// the session takes the reported state as truth.
    pub fn handle_notice(&mut self, notice: EngineNotice) -> Option<Event> {
        match notice {
            EngineNotice::Playing => self.adopt_status(PlaybackStatus::Playing),
            EngineNotice::Paused => self.adopt_status(PlaybackStatus::Paused),
            EngineNotice::Stopped => {
                if self.status == PlaybackStatus::Stopped {
                    return None;
                }
                self.queue = None;
                self.current_index = 0;
                self.adopt_status(PlaybackStatus::Stopped)
            }
            EngineNotice::TrackChanged { index } => {
                let len = self.queue.as_ref()?.len();
                if index >= len || index == self.current_index {
                    return None;
                }
                self.current_index = index;
                Some(self.track_changed_event())
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn adopt_status(&mut self, status: PlaybackStatus) -> Option<Event> {
        if self.status == status {
            return None;
        }
        self.status = status;
        Some(Event::PlaybackStatusChanged {
            status,
            at: Utc::now(),
        })
    }

    fn navigable_len(&self) -> Option<usize> {
        if !self.is_live() {
            return None;
        }
        self.queue.as_ref().map(TrackQueue::len).filter(|&n| n > 0)
    }

    fn track_changed_event(&self) -> Event {
        Event::TrackChanged {
            index: self.current_index,
            track_id: self
                .current_track()
                .map(|t| t.id.clone())
                .unwrap_or_default(),
            at: Utc::now(),
        }
    }
}
