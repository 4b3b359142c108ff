//! Configuration module for Delete-A-Tweet
//!
//! Everything has a built-in default. A TOML file is only read when one is passed with
//! `--config`; nothing is ever written back.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Where `load` without a count gets its number from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadCountDefault {
    /// Use `default_load_count`
    #[default]
    Fixed,
    /// Use the signed-in user's total tweet count
    Statuses,
}

/// What the REPL does after a fetch or delete call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Print the error and keep reading commands
    #[default]
    Continue,
    /// Print the error and end the session with a failure status
    Exit,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL of the v1.1 REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of tweets `load` fetches when no count was ever given
    #[serde(default = "default_load_count")]
    pub default_load_count: usize,

    /// Whether a bare `load` uses the fixed count or the account's tweet total
    #[serde(default)]
    pub load_count_default: LoadCountDefault,

    /// Per-request timeout in seconds (0 = wait forever)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether a failed fetch/delete ends the session
    #[serde(default)]
    pub on_error: ErrorPolicy,

    /// Whether native retweets show up in the loaded timeline
    #[serde(default = "default_include_retweets")]
    pub include_retweets: bool,

    /// Whether replies are left out of the loaded timeline
    #[serde(default)]
    pub exclude_replies: bool,

    /// Column to wrap tweet text at (0 = no wrapping)
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_api_base_url() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_load_count() -> usize {
    50
}

fn default_request_timeout() -> u64 {
    30
}

fn default_include_retweets() -> bool {
    true
}

fn default_wrap_width() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_load_count: default_load_count(),
            load_count_default: LoadCountDefault::default(),
            request_timeout_secs: default_request_timeout(),
            on_error: ErrorPolicy::default(),
            include_retweets: default_include_retweets(),
            exclude_replies: false,
            wrap_width: default_wrap_width(),
        }
    }
}

impl Config {
    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Timeout applied to every outbound request
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
