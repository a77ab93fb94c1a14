//! The boundary to the external audio engine.
//!
//! The session issues one-way commands and never awaits their completion.
//! The engine reports state changes back asynchronously as
//! [`EngineNotice`]s, including ones the session did not cause (for
//! example, a stop due to an external interruption).

use serde::{Deserialize, Serialize};

use super::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Asynchronous status notification from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotice {
    Playing,
    Paused,
    Stopped,
    TrackChanged { index: usize },
}

/// Command surface of an external audio engine.
///
/// Implementations decode and output audio; the core only tells them what
/// to do. All commands are fire-and-forget.
pub trait AudioEngine: Send {
    fn enqueue(&mut self, tracks: &[Track]);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn skip(&mut self, direction: SkipDirection);
}

/// Engine that discards every command. Used headless and in tests that only
/// exercise session state.
#[derive(Debug, Default)]
pub struct NullEngine;

impl AudioEngine for NullEngine {
    fn enqueue(&mut self, _tracks: &[Track]) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn stop(&mut self) {}
    fn skip(&mut self, _direction: SkipDirection) {}
}
