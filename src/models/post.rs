//! Post model (a single tweet on the signed-in user's timeline)

use chrono::{DateTime, Utc};
use std::fmt;

/// A tweet posted by the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Numeric tweet ID (what `destroy` takes)
    pub id: u64,
    /// Full text with HTML entities decoded
    pub text: String,
    /// When the tweet was posted
    pub created_at: DateTime<Utc>,
    /// Number of likes
    pub favorite_count: u32,
    /// Number of retweets
    pub retweet_count: u32,
    /// Screen name this tweet replies to, if any
    pub reply_to: Option<String>,
    /// Original author's screen name when this is a native retweet
    pub retweet_of: Option<String>,
}

impl Post {
    /// Create a post with the given ID and text and zeroed counters
    pub fn new(id: u64, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            created_at: Utc::now(),
            favorite_count: 0,
            retweet_count: 0,
            reply_to: None,
            retweet_of: None,
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d %Y").to_string()
        }
    }

    /// Metadata shown under the text: age, counters, reply/retweet context
    pub fn detail_line(&self) -> String {
        let mut line = format!(
            "{} · ♥ {}  🔁 {}",
            self.relative_time(),
            self.favorite_count,
            self.retweet_count
        );
        if let Some(author) = &self.retweet_of {
            line.push_str(&format!(" · retweet of @{author}"));
        } else if let Some(name) = &self.reply_to {
            line.push_str(&format!(" · reply to @{name}"));
        }
        line
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.id, self.text)
    }
}
