//! XDG Base Directory utilities for config and state locations.

use crate::error::CheckError;
use std::path::PathBuf;

const APP_DIR: &str = "sizecheck";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, CheckError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        CheckError::Config(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Get the sizecheck state directory
///
/// Returns `$XDG_STATE_HOME/sizecheck` if set, otherwise the platform state directory,
/// falling back to the platform local data directory where no state directory
/// exists (macOS, Windows).
pub fn state_home() -> Result<PathBuf, CheckError> {
    if let Ok(xdg_state_home) = std::env::var("XDG_STATE_HOME") {
        if !xdg_state_home.is_empty() {
            return Ok(PathBuf::from(xdg_state_home).join(APP_DIR));
        }
    }

    let project_dirs = directories::ProjectDirs::from("", "", APP_DIR).ok_or_else(|| {
        CheckError::Config("Could not determine platform state directory".to_string())
    })?;
    Ok(project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf())
}

/// `$XDG_CONFIG_HOME/sizecheck/config.toml`
pub fn global_config_path() -> Result<PathBuf, CheckError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// Default state file shared by every invocation.
pub fn default_state_file() -> Result<PathBuf, CheckError> {
    Ok(state_home()?.join("filesizes"))
}

/// Default log file when log output includes `file`.
pub fn default_log_file() -> Result<PathBuf, CheckError> {
    Ok(state_home()?.join("sizecheck.log"))
}
