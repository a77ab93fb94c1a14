mod alarms;
mod config;

pub use alarms::AlarmStore;
pub use config::Config;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/rouser[-dev]/` based on ROUSER_ENV.
///
/// Set ROUSER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROUSER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rouser-dev")
    } else {
        base_dir.join("rouser")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
