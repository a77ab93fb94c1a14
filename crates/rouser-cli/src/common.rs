//! Shared plumbing for the CLI commands.

use rouser_core::{
    AlarmCoordinator, AlarmStore, AudioEngine, Config, SkipDirection, SystemClock, Track,
};

/// Audio engine that only logs the commands it receives. The CLI has no
/// audio output of its own; a real deployment injects an engine bound to
/// the platform player.
pub struct LogEngine;

impl AudioEngine for LogEngine {
    fn enqueue(&mut self, tracks: &[Track]) {
        log::info!("engine: enqueue {} tracks", tracks.len());
    }
    fn play(&mut self) {
        log::info!("engine: play");
    }
    fn pause(&mut self) {
        log::info!("engine: pause");
    }
    fn stop(&mut self) {
        log::info!("engine: stop");
    }
    fn skip(&mut self, direction: SkipDirection) {
        log::info!("engine: skip {direction:?}");
    }
}

/// Build a coordinator over the persisted alarm set and the configured
/// library.
pub fn coordinator() -> Result<AlarmCoordinator, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = AlarmStore::open()?;
    Ok(AlarmCoordinator::new(
        store,
        config.library(),
        Box::new(LogEngine),
        SystemClock,
    ))
}

/// Parse an `HH:MM` time-of-day into its components. Range validation
/// happens in the core.
pub fn parse_time(s: &str) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    let (hour, minute) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
    Ok((
        hour.trim().parse::<u32>()?,
        minute.trim().parse::<u32>()?,
    ))
}
