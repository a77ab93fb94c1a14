use clap::Subcommand;

use crate::common::{coordinator, parse_time};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Schedule a new daily alarm
    Add {
        /// Time of day as HH:MM (daily recurring)
        #[arg(long)]
        time: String,
        /// Display label
        #[arg(long, default_value = "Alarm")]
        label: String,
        /// Track id to play, repeatable; none means the selected playlist
        #[arg(long = "track")]
        tracks: Vec<String>,
    },
    /// List all alarms in creation order
    List,
    /// Cancel an alarm (cancelling twice is fine)
    Remove {
        id: String,
    },
    /// Re-enable an alarm
    Enable {
        id: String,
    },
    /// Disable an alarm without removing it
    Disable {
        id: String,
    },
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = coordinator()?;

    match action {
        AlarmAction::Add { time, label, tracks } => {
            let (hour, minute) = parse_time(&time)?;
            let alarm = coordinator.schedule_alarm(hour, minute, label, tracks)?;
            println!("{}", serde_json::to_string_pretty(&alarm)?);
        }
        AlarmAction::List => {
            println!("{}", serde_json::to_string_pretty(coordinator.alarms())?);
        }
        AlarmAction::Remove { id } => {
            coordinator.cancel_alarm(&id)?;
        }
        AlarmAction::Enable { id } => {
            coordinator.set_enabled(&id, true)?;
        }
        AlarmAction::Disable { id } => {
            coordinator.set_enabled(&id, false)?;
        }
    }

    Ok(())
}
