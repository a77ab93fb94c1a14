//! # Rouser Core Library
//!
//! This library provides the core logic for Rouser, a music alarm: alarms
//! recur daily at a time-of-day and wake the user by starting playback of a
//! track queue. All behavior is available through the library; the CLI
//! binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Scheduler**: a wall-clock evaluation the caller must invoke at least
//!   once per minute while alarms may be due; firing is idempotent per
//!   (alarm, calendar minute), so extra invocations are harmless and the
//!   process does not have to be running continuously
//! - **Playback**: a single live session state machine commanding an
//!   injected audio engine
//! - **Storage**: JSON-persisted alarm set and TOML-based configuration
//! - **Events**: every observable state change is a typed [`Event`]
//!   delivered to subscribers in transition order
//!
//! ## Key Components
//!
//! - [`AlarmCoordinator`]: the façade binding scheduling to playback
//! - [`AlarmStore`]: durable alarm set, single writer of alarm state
//! - [`PlaybackSession`]: playback state machine
//! - [`Clock`]: injectable time source

pub mod alarm;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod library;
pub mod playback;
pub mod scheduler;
pub mod storage;

pub use alarm::{Alarm, FireTime};
pub use clock::{Clock, MinuteKey, SystemClock};
pub use coordinator::{AlarmCoordinator, Snapshot};
pub use error::{CoreError, PlaybackError, StorageError, StoreError, ValidationError};
pub use events::{Event, EventBus};
pub use library::{Library, Playlist};
pub use playback::{
    AudioEngine, EngineNotice, NullEngine, PlaybackSession, PlaybackStatus, SkipDirection, Track,
    TrackQueue, TrackSource,
};
pub use scheduler::Scheduler;
pub use storage::{AlarmStore, Config};
