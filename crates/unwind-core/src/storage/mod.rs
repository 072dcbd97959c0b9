mod config;

pub use config::{BreathingConfig, Config, ExportConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/unwind[-dev]/` based on UNWIND_ENV.
///
/// Set UNWIND_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("UNWIND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("unwind-dev")
    } else {
        base_dir.join("unwind")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
