//! Application configuration module.
//!
//! Manages the TOML config file holding the OMDb access key and
//! endpoint override.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, OmdbConfig};
pub use paths::{resolve_config_path, resolve_log_path};
