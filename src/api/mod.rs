//! API client for the Twitter v1.1 REST endpoints

pub mod twitter;

use crate::error::ApiError;
use crate::models::{Post, User};

pub use twitter::TwitterClient;

/// Endpoint paths, relative to the configured API base URL
pub mod links {
    /// `GET account/verify_credentials`
    pub const VERIFY_CREDENTIALS: &str = "/account/verify_credentials.json";
    /// `GET statuses/user_timeline`
    pub const USER_TIMELINE: &str = "/statuses/user_timeline.json";
    /// `POST statuses/destroy/:id`
    pub const DELETE_STEM: &str = "/statuses/destroy";
}

/// Most tweets `statuses/user_timeline` hands out per request
pub const MAX_PAGE_SIZE: usize = 200;

/// Most tweets Twitter will page back through on a user timeline
pub const MAX_TIMELINE_DEPTH: usize = 3_200;

/// The remote operations the session needs
#[allow(async_fn_in_trait)]
pub trait TwitterApi {
    /// Verify credentials and get the signed-in user's identity
    async fn verify_credentials(&self) -> Result<User, ApiError>;

    /// Get up to `count` of the user's most recent tweets, newest first
    async fn user_timeline(&self, user_id: u64, count: usize) -> Result<Vec<Post>, ApiError>;

    /// Delete the given tweet, returning it as it was
    async fn destroy(&self, id: u64) -> Result<Post, ApiError>;
}
