//! The orchestrating façade.
//!
//! The coordinator is the single public surface the composing application
//! talks to. It owns the alarm store, the scheduler, the playback session,
//! and the library, and it is the only place where a scheduler firing
//! decision turns into playback.
//!
//! Every method takes `&mut self`, so the scheduler's read-modify-write of
//! each alarm's fired-minute bookkeeping is atomic by construction. An
//! application with several triggers (a periodic timer, a foreground-resume
//! hook) shares one coordinator behind a `Mutex` and converges them on
//! [`AlarmCoordinator::on_tick`]; the guarantee does not depend on how
//! often or from where the ticks arrive.

use std::sync::mpsc;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::alarm::{Alarm, FireTime};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::events::{Event, EventBus};
use crate::library::Library;
use crate::playback::{AudioEngine, EngineNotice, PlaybackSession, PlaybackStatus};
use crate::scheduler::Scheduler;
use crate::storage::AlarmStore;

/// Serializable view of the coordinator state, for status displays.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub alarms: Vec<Alarm>,
    pub playback_status: PlaybackStatus,
    pub current_index: usize,
    pub current_track_id: Option<String>,
}

pub struct AlarmCoordinator<C: Clock = SystemClock> {
    store: AlarmStore,
    scheduler: Scheduler,
    session: PlaybackSession,
    library: Library,
    clock: C,
    bus: EventBus,
}

impl<C: Clock> AlarmCoordinator<C> {
    pub fn new(store: AlarmStore, library: Library, engine: Box<dyn AudioEngine>, clock: C) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(),
            session: PlaybackSession::new(engine),
            library,
            clock,
            bus: EventBus::new(),
        }
    }

    // ── Observers ────────────────────────────────────────────────────

    pub fn subscribe(&mut self) -> mpsc::Receiver<Event> {
        self.bus.subscribe()
    }

    // ── Ticking ──────────────────────────────────────────────────────

    /// Evaluate against the injected clock. The external trigger calls
    /// this at least once a minute while alarms may be due and once on
    /// resuming after any suspension gap.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        self.on_tick(now)
    }

    /// Evaluate at an explicit instant.
    ///
    /// Fired alarms start playback in creation order, so when several
    /// alarms share a minute the last one's session is the one left
    /// playing. The updated fired-minute bookkeeping is persisted before
    /// returning.
    ///
    /// # Errors
    /// Returns a storage error if persisting the alarm set failed after
    /// all fires were processed; the in-memory set stays authoritative.
    pub fn on_tick(&mut self, now: DateTime<Local>) -> Result<Vec<Event>> {
        let fired = self.scheduler.evaluate(now, self.store.alarms_mut());
        let mut events = Vec::new();
        for id in &fired {
            let Some(alarm) = self.store.get(id) else {
                continue;
            };
            let label = alarm.label.clone();
            let track_ids = alarm.track_ids.clone();
            events.push(Event::AlarmFired {
                id: id.clone(),
                label,
                at: Utc::now(),
            });

            let queue = self.library.resolve_queue(&track_ids);
            if queue.is_empty() {
                // Fire stands, but there is nothing to play; whatever is
                // currently live keeps playing.
                log::warn!("alarm {id} fired but its queue resolved to no playable tracks");
                continue;
            }
            match self.session.start(queue) {
                Ok(started) => events.extend(started),
                Err(e) => log::warn!("alarm {id} fired but playback did not start: {e}"),
            }
        }
        for event in &events {
            self.bus.publish(event);
        }
        if !fired.is_empty() {
            self.store.save()?;
        }
        Ok(events)
    }

    // ── Alarm management ─────────────────────────────────────────────

    /// Create and persist a new daily alarm.
    ///
    /// # Errors
    /// `InvalidTime` if the time-of-day is malformed; the alarm list is
    /// left unchanged. A time "in the past" today is not an error -- the
    /// alarm recurs daily.
    pub fn schedule_alarm(
        &mut self,
        hour: u32,
        minute: u32,
        label: impl Into<String>,
        track_ids: Vec<String>,
    ) -> Result<Alarm> {
        let fire_time = FireTime::new(hour, minute)?;
        let alarm = self.store.create(fire_time, label.into(), track_ids).clone();
        self.bus.publish(&Event::AlarmArmed {
            id: alarm.id.clone(),
            fire_time,
            at: Utc::now(),
        });
        self.store.save()?;
        Ok(alarm)
    }

    /// Cancel an alarm. Cancelling an id that is already gone is a
    /// success, so duplicate cancel requests are harmless.
    ///
    /// # Errors
    /// Only storage errors surface here.
    pub fn cancel_alarm(&mut self, id: &str) -> Result<()> {
        if self.store.remove(id) {
            self.bus.publish(&Event::AlarmDisarmed {
                id: id.to_string(),
                at: Utc::now(),
            });
            self.store.save()?;
        }
        Ok(())
    }

    /// Enable or disable an alarm without removing it.
    ///
    /// # Errors
    /// `NotFound` if the id is unknown.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        self.store.update(id, |a| a.enabled = enabled)?;
        if let Some(alarm) = self.store.get(id) {
            let event = if enabled {
                Event::AlarmArmed {
                    id: id.to_string(),
                    fire_time: alarm.fire_time,
                    at: Utc::now(),
                }
            } else {
                Event::AlarmDisarmed {
                    id: id.to_string(),
                    at: Utc::now(),
                }
            };
            self.bus.publish(&event);
        }
        self.store.save()?;
        Ok(())
    }

    // ── Playback control ─────────────────────────────────────────────

    /// Start playback manually over the given track ids (empty = the
    /// selected playlist), through the same path an alarm fire takes.
    ///
    /// # Errors
    /// `EmptyQueue` if nothing playable resolves; a live session keeps
    /// playing in that case.
    pub fn play_queue(&mut self, track_ids: &[String]) -> Result<()> {
        let queue = self.library.resolve_queue(track_ids);
        let events = self.session.start(queue)?;
        for event in &events {
            self.bus.publish(event);
        }
        Ok(())
    }

    /// Stop playback. Also the user-facing "stop alarm" action. Always
    /// succeeds; by the time this returns no further audio is commanded.
    pub fn stop_playback(&mut self) {
        let event = self.session.stop();
        self.bus.publish(&event);
    }

    pub fn pause(&mut self) {
        if let Some(event) = self.session.pause() {
            self.bus.publish(&event);
        }
    }

    pub fn resume(&mut self) {
        if let Some(event) = self.session.resume() {
            self.bus.publish(&event);
        }
    }

    pub fn next_track(&mut self) {
        if let Some(event) = self.session.next() {
            self.bus.publish(&event);
        }
    }

    pub fn previous_track(&mut self) {
        if let Some(event) = self.session.previous() {
            self.bus.publish(&event);
        }
    }

    /// Adopt a status change the audio engine reported on its own.
    pub fn handle_engine_notice(&mut self, notice: EngineNotice) {
        if let Some(event) = self.session.handle_notice(notice) {
            self.bus.publish(&event);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn alarms(&self) -> &[Alarm] {
        self.store.list()
    }

    pub fn playback_status(&self) -> PlaybackStatus {
        self.session.status()
    }

    pub fn current_track(&self) -> Option<&crate::playback::Track> {
        self.session.current_track()
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            alarms: self.store.list().to_vec(),
            playback_status: self.session.status(),
            current_index: self.session.current_index(),
            current_track_id: self.session.current_track().map(|t| t.id.clone()),
        }
    }
}
