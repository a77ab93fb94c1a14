//! Tick-driven commands: single evaluation, the long-running loop, and the
//! status snapshot.

use std::time::Duration;

use rouser_core::Config;

use crate::common::coordinator;

/// One scheduler evaluation against the persisted alarm set. Meant for
/// external drivers (cron, a system timer unit) that provide the
/// at-least-once-per-minute trigger themselves.
pub fn tick() -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = coordinator()?;
    let events = coordinator.tick()?;
    for event in &events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

/// Foreground loop: evaluate at the configured interval until interrupted.
/// The interval is clamped to a minute so no calendar minute is skipped
/// while the loop runs.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let interval = Duration::from_secs(config.run.tick_interval_secs.clamp(1, 60));

    let mut coordinator = coordinator()?;
    log::info!("run loop started, ticking every {interval:?}");
    loop {
        let events = coordinator.tick()?;
        for event in &events {
            println!("{}", serde_json::to_string_pretty(event)?);
        }
        std::thread::sleep(interval);
    }
}

/// Print the alarm set and playback state as JSON.
pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = coordinator()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&coordinator.snapshot())?
    );
    Ok(())
}
