//! `AppConfig` struct, TOML read/write and access key resolution.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Access key used when nothing else is configured.
pub const DEFAULT_API_KEY: &str = "thewdb";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDb configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// Access key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint override (e.g. a local mirror).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Where the effective access key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// `--api-key` flag.
    Flag,
    /// `OMDB_API_KEY` environment variable.
    Env,
    /// `[omdb] api_key` in the config file.
    Config,
    /// Built-in default.
    BuiltIn,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "--api-key flag",
            Self::Env => "OMDB_API_KEY environment variable",
            Self::Config => "config file",
            Self::BuiltIn => "built-in default",
        })
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the access key: flag, then environment, then config file,
    /// then the built-in default. Blank values are skipped.
    #[must_use]
    pub fn resolve_api_key(&self, flag: Option<&str>, env: Option<&str>) -> (String, KeySource) {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        if let Some(key) = non_blank(flag) {
            return (key, KeySource::Flag);
        }
        if let Some(key) = non_blank(env) {
            return (key, KeySource::Env);
        }
        if let Some(key) = non_blank(self.omdb.api_key.as_deref()) {
            return (key, KeySource::Config);
        }
        (String::from(DEFAULT_API_KEY), KeySource::BuiltIn)
    }
}
