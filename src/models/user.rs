//! User model for the signed-in account

/// The identity returned by `account/verify_credentials`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Numeric user ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Handle without the leading `@`
    pub screen_name: String,
    /// Total number of tweets the account has posted
    pub statuses_count: u64,
}

impl User {
    /// Create a user record
    pub fn new(id: u64, name: &str, screen_name: &str, statuses_count: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            screen_name: screen_name.to_string(),
            statuses_count,
        }
    }
}
