//! Config and log file locations.
//!
//! Both live in one directory: `--dir` when given, otherwise
//! `~/.config/cinesearch`.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Log file written while the browser owns the terminal.
const LOG_FILE_NAME: &str = "cinesearch.log";

/// Returns the directory holding config and log files.
fn config_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("cinesearch"))
}

/// Resolves the config file path: `{dir}/config.toml`, or
/// `~/.config/cinesearch/config.toml` without `--dir`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    Ok(config_dir(dir)?.join(CONFIG_FILE_NAME))
}

/// Resolves the browser log file, next to the config file.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_log_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    Ok(config_dir(dir)?.join(LOG_FILE_NAME))
}
