use anyhow::{Context, Result};
use std::path::PathBuf;

/// Centralized path management for hyprwall

const APP_DIR: &str = "hyprwall";

/// Get the hyprwall config directory (not created)
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join(APP_DIR))
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the hyprwall state directory, creating it if needed
pub fn state_dir() -> Result<PathBuf> {
    let state_dir = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .context("Unable to determine user state directory")?
        .join(APP_DIR);

    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("creating state directory at {}", state_dir.display()))?;

    Ok(state_dir)
}

/// File holding the 0/1 mode of the toggle command
pub fn toggle_state_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("toggle_state"))
}

/// Lock file shared by every command that changes wallpapers
pub fn lock_file() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(format!("{APP_DIR}.lock"))
}
