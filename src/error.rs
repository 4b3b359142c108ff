//! Error types

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Twitter's error code for "Rate limit exceeded"
pub const RATE_LIMIT_CODE: i32 = 88;

/// A single entry from an error payload returned by Twitter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwitterErrorCode {
    /// Numeric error code
    pub code: i32,
    /// Human-readable message
    pub message: String,
}

/// The `{"errors": [...]}` body Twitter sends back on a failed call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwitterErrors {
    /// Every error reported for the call
    pub errors: Vec<TwitterErrorCode>,
}

impl std::fmt::Display for TwitterErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "#{}: {}", e.code, e.message)?;
        }
        Ok(())
    }
}

/// Failure talking to the Twitter REST API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or protocol failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The request did not complete before the configured timeout
    #[error("request timed out")]
    Timeout,
    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Twitter answered with an error payload
    #[error("Twitter returned errors: {0}")]
    Twitter(TwitterErrors),
    /// Twitter reported code 88; carries the UTC epoch second when the window resets
    #[error("rate limit reached{}", reset_suffix(.0))]
    RateLimit(Option<i64>),
    /// Non-success status without a recognizable error payload
    #[error("unexpected status {0}")]
    BadStatus(StatusCode),
    /// The request could not be signed
    #[error("failed to sign request: {0}")]
    Signing(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

fn reset_suffix(reset: &Option<i64>) -> String {
    reset.map(|r| format!(", resets at {r}")).unwrap_or_default()
}

/// Credentials were missing or rejected
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// Consumer key or secret is empty
    #[error("Please provide a consumer key and secret")]
    MissingConsumer,
    /// Access token or secret is empty
    #[error("Must supply access token and secret for user context")]
    MissingAccess,
    /// The HTTP client could not be constructed
    #[error("Failed to set up the API client: {0}")]
    Connect(#[source] ApiError),
    /// Twitter refused the identity check
    #[error("Failed to validate credentials: {0}")]
    Rejected(#[source] ApiError),
}

/// Loading the user timeline failed
#[derive(Debug, Error)]
#[error("Failed to get user timeline: {0}")]
pub struct FetchError(#[source] pub ApiError);

/// Destroying a tweet failed
#[derive(Debug, Error)]
#[error("Failed to destroy tweet: {0}")]
pub struct DeleteError(#[source] pub ApiError);

/// Malformed argument to an interactive command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The count given to `load` is not a number
    #[error("failed to get tweet count from {0:?}")]
    InvalidCount(String),
    /// `load 0`
    #[error("failed to get tweet count: the count must be at least 1")]
    ZeroCount,
}
