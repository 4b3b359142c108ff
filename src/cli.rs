//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::auth::Credentials;
use crate::config::{Config, ErrorPolicy};

/// Review your recent tweets one at a time and delete the ones you no longer want
#[derive(Debug, Clone, Parser)]
#[command(name = "delete-a-tweet", version, about)]
pub struct Args {
    /// OAuth consumer (API) key
    #[arg(
        long,
        alias = "consumerKey",
        env = "TWITTER_CONSUMER_KEY",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub consumer_key: String,

    /// OAuth consumer (API) secret
    #[arg(
        long,
        alias = "consumerSecret",
        env = "TWITTER_CONSUMER_SECRET",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub consumer_secret: String,

    /// Access token for your account
    #[arg(
        long,
        alias = "accessToken",
        env = "TWITTER_ACCESS_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub access_token: String,

    /// Access token secret for your account
    #[arg(
        long,
        alias = "accessSecret",
        env = "TWITTER_ACCESS_SECRET",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub access_secret: String,

    /// TOML file with extra settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Default number of tweets for `load` (at least 1)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// End the session when a fetch or delete fails
    #[arg(long)]
    pub exit_on_error: bool,

    /// Log requests and state changes to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The four OAuth strings as given
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            self.access_token.clone(),
            self.access_secret.clone(),
        )
    }

    /// Let flags override whatever the config file said
    pub fn apply(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.default_load_count = usize::try_from(count).unwrap_or(usize::MAX);
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.exit_on_error {
            config.on_error = ErrorPolicy::Exit;
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "delete_a_tweet=debug,warn"
        } else {
            "warn"
        }
    }
}
