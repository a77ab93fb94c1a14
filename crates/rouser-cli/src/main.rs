use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "rouser", version, about = "Rouser music alarm CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm management
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run one scheduler evaluation against the stored alarms
    Tick,
    /// Keep evaluating at the configured interval, playing alarms as they fire
    Run,
    /// Print the alarm set and playback state as JSON
    Status,
}

fn main() {
    if let Err(e) = simple_file_logger::init_logger!("rouser") {
        eprintln!("warning: could not initialize logger: {e}");
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Alarm { action } => commands::alarm::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Tick => commands::run::tick(),
        Commands::Run => commands::run::run(),
        Commands::Status => commands::run::status(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
