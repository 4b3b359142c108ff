//! Authenticated session: a connected API client plus the verified identity

use crate::api::TwitterApi;
use crate::auth::Credentials;
use crate::error::{ApiError, AuthenticationError};
use crate::models::User;

/// The authenticated context valid for one run
pub struct Session<A> {
    api: A,
    user: User,
}

impl<A: TwitterApi> Session<A> {
    /// Validate `credentials`, build a client with `connect`, and verify who we are.
    ///
    /// Empty credentials are rejected before `connect` is called, so no request is made.
    pub async fn login<F>(credentials: Credentials, connect: F) -> Result<Self, AuthenticationError>
    where
        F: FnOnce(Credentials) -> Result<A, ApiError>,
    {
        credentials.validate()?;

        let api = connect(credentials).map_err(AuthenticationError::Connect)?;
        let user = api
            .verify_credentials()
            .await
            .map_err(AuthenticationError::Rejected)?;

        tracing::debug!("Authenticated as {} (id {})", user.screen_name, user.id);

        Ok(Self { api, user })
    }
}

impl<A> Session<A> {
    /// Wrap an already-verified client
    pub const fn new(api: A, user: User) -> Self {
        Self { api, user }
    }

    /// The API client
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// The signed-in user
    pub const fn user(&self) -> &User {
        &self.user
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Post;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A call made against `FakeApi`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Verify,
        Timeline { user_id: u64, count: usize },
        Destroy(u64),
    }

    /// In-memory backend that records every call
    #[derive(Clone, Default)]
    pub struct FakeApi {
        pub posts: Rc<RefCell<Vec<Post>>>,
        pub calls: Rc<RefCell<Vec<Call>>>,
        pub reject_verify: bool,
        pub fail_timeline: bool,
        pub fail_destroy: bool,
    }

    impl FakeApi {
        pub fn with_posts(ids: &[u64]) -> Self {
            let posts = ids
                .iter()
                .map(|id| Post::new(*id, &format!("tweet number {id}")))
                .collect();
            Self {
                posts: Rc::new(RefCell::new(posts)),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    fn failure() -> ApiError {
        ApiError::BadStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }

    impl TwitterApi for FakeApi {
        async fn verify_credentials(&self) -> Result<User, ApiError> {
            self.calls.borrow_mut().push(Call::Verify);
            if self.reject_verify {
                return Err(failure());
            }
            Ok(User::new(99, "Test User", "tester", self.posts.borrow().len() as u64))
        }

        async fn user_timeline(&self, user_id: u64, count: usize) -> Result<Vec<Post>, ApiError> {
            self.calls
                .borrow_mut()
                .push(Call::Timeline { user_id, count });
            if self.fail_timeline {
                return Err(failure());
            }
            Ok(self.posts.borrow().iter().take(count).cloned().collect())
        }

        async fn destroy(&self, id: u64) -> Result<Post, ApiError> {
            self.calls.borrow_mut().push(Call::Destroy(id));
            if self.fail_destroy {
                return Err(failure());
            }
            let mut posts = self.posts.borrow_mut();
            let index = posts
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(failure)?;
            Ok(posts.remove(index))
        }
    }

    #[tokio::test]
    async fn test_login_verifies_identity() {
        let fake = FakeApi::with_posts(&[1, 2]);
        let session = Session::login(Credentials::new("ck", "cs", "at", "as"), |_| Ok(fake.clone()))
            .await
            .unwrap();
        assert_eq!(session.user().name, "Test User");
        assert_eq!(session.user().statuses_count, 2);
        assert_eq!(fake.calls(), vec![Call::Verify]);
    }

    #[tokio::test]
    async fn test_login_empty_credentials_makes_no_call() {
        let cases = [
            ("", "cs", "at", "as"),
            ("ck", "", "at", "as"),
            ("ck", "cs", "", "as"),
            ("ck", "cs", "at", ""),
        ];
        for (ck, cs, at, secret) in cases {
            let fake = FakeApi::default();
            let mut connected = false;
            let result = Session::login(Credentials::new(ck, cs, at, secret), |_| {
                connected = true;
                Ok(fake.clone())
            })
            .await;
            assert!(matches!(
                result,
                Err(AuthenticationError::MissingConsumer | AuthenticationError::MissingAccess)
            ));
            assert!(!connected);
            assert!(fake.calls().is_empty());
        }
    }

    #[test]
    fn test_login_rejected() {
        let fake = FakeApi {
            reject_verify: true,
            ..FakeApi::default()
        };
        let result = tokio_test::block_on(Session::login(
            Credentials::new("ck", "cs", "at", "as"),
            |_| Ok(fake.clone()),
        ));
        let err = result.err().unwrap();
        assert!(matches!(err, AuthenticationError::Rejected(_)));
        assert!(err.to_string().starts_with("Failed to validate credentials: "));
    }
}
