//! Authentication module (OAuth 1.0a user-context credentials)
//!
//! Twitter's v1.1 endpoints are called on behalf of a user by signing every request with
//! two key/secret pairs: the consumer pair that identifies the app, and the access pair that
//! represents the user's grant to it. Both are supplied at startup and never change.

pub mod oauth;

use std::borrow::Cow;
use std::fmt;

use crate::error::AuthenticationError;

/// A key/secret pair representing either the app (consumer) or the user grant (access token)
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Public half, sent in the `Authorization` header
    pub key: Cow<'static, str>,
    /// Private half, only ever used to derive the signing key
    pub secret: Cow<'static, str>,
}

impl KeyPair {
    /// Create a key pair from anything string-like
    pub fn new<K, S>(key: K, secret: S) -> Self
    where
        K: Into<Cow<'static, str>>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Whether either half is blank
    pub fn is_incomplete(&self) -> bool {
        self.key.trim().is_empty() || self.secret.trim().is_empty()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The four strings needed to act as a user: consumer key/secret and access token/secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The app's consumer key pair
    pub consumer: KeyPair,
    /// The user's access token pair
    pub access: KeyPair,
}

impl Credentials {
    /// Bundle the four credential strings
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer: KeyPair::new(consumer_key.into(), consumer_secret.into()),
            access: KeyPair::new(access_token.into(), access_secret.into()),
        }
    }

    /// Check that every credential is present before anything touches the network
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        if self.consumer.is_incomplete() {
            return Err(AuthenticationError::MissingConsumer);
        }
        if self.access.is_incomplete() {
            return Err(AuthenticationError::MissingAccess);
        }
        Ok(())
    }
}
