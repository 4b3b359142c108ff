//! Twitter v1.1 REST client (OAuth 1.0a user context)

use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::auth::Credentials;
use crate::auth::oauth::{ParamList, authorization_header, to_urlencoded};
use crate::config::Config;
use crate::error::{ApiError, RATE_LIMIT_CODE, TwitterErrors};
use crate::models::{Post, User};

use super::{MAX_PAGE_SIZE, MAX_TIMELINE_DEPTH, TwitterApi, links};

/// Twitter API client
pub struct TwitterClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    include_retweets: bool,
    exclude_replies: bool,
}

impl TwitterClient {
    /// Create a new client signing requests with `credentials`
    pub fn new(credentials: Credentials, config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
            include_retweets: config.include_retweets,
            exclude_replies: config.exclude_replies,
        })
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sign and send one request, decoding the JSON answer
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &ParamList,
    ) -> Result<T, ApiError> {
        let url = self.api_url(endpoint);
        let authorization = authorization_header(&self.credentials, &method, &url, params)?;
        let full_url = if params.is_empty() {
            url
        } else {
            format!("{}?{}", url, to_urlencoded(params))
        };

        tracing::debug!("{method} {endpoint}");

        let response = self
            .client
            .request(method, &full_url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let reset = response
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await?;

        parse_response(status, reset, &body)
    }

    fn timeline_params(&self, user_id: u64, page_size: usize, max_id: Option<u64>) -> ParamList {
        let mut params = ParamList::new();
        params.insert("user_id".into(), user_id.to_string());
        params.insert("count".into(), page_size.to_string());
        params.insert("tweet_mode".into(), "extended".into());
        params.insert("trim_user".into(), "true".into());
        params.insert("include_rts".into(), self.include_retweets.to_string());
        params.insert("exclude_replies".into(), self.exclude_replies.to_string());
        if let Some(max_id) = max_id {
            params.insert("max_id".into(), max_id.to_string());
        }
        params
    }
}

impl TwitterApi for TwitterClient {
    async fn verify_credentials(&self) -> Result<User, ApiError> {
        let mut params = ParamList::new();
        params.insert("skip_status".into(), "true".into());
        params.insert("include_email".into(), "false".into());

        let user: TwitterUser = self
            .call(Method::GET, links::VERIFY_CREDENTIALS, &params)
            .await?;
        Ok(user.into_user())
    }

    async fn user_timeline(&self, user_id: u64, count: usize) -> Result<Vec<Post>, ApiError> {
        let statuses = collect_timeline(count, |page_size, max_id| {
            let params = self.timeline_params(user_id, page_size, max_id);
            async move { self.call(Method::GET, links::USER_TIMELINE, &params).await }
        })
        .await?;
        Ok(statuses.into_iter().map(TwitterStatus::into_post).collect())
    }

    async fn destroy(&self, id: u64) -> Result<Post, ApiError> {
        let mut params = ParamList::new();
        params.insert("trim_user".into(), "true".into());
        params.insert("tweet_mode".into(), "extended".into());

        let endpoint = format!("{}/{}.json", links::DELETE_STEM, id);
        let status: TwitterStatus = self.call(Method::POST, &endpoint, &params).await?;
        Ok(status.into_post())
    }
}

/// Gather up to `count` statuses (capped at the timeline depth), newest first.
///
/// `fetch_page(page_size, max_id)` returns one page; paging walks backwards with `max_id`
/// until enough statuses arrived or a page comes back empty.
async fn collect_timeline<F, Fut>(
    count: usize,
    mut fetch_page: F,
) -> Result<Vec<TwitterStatus>, ApiError>
where
    F: FnMut(usize, Option<u64>) -> Fut,
    Fut: Future<Output = Result<Vec<TwitterStatus>, ApiError>>,
{
    let wanted = count.min(MAX_TIMELINE_DEPTH);
    let mut statuses = Vec::with_capacity(wanted.min(MAX_PAGE_SIZE));
    let mut max_id = None;

    while statuses.len() < wanted {
        let page_size = (wanted - statuses.len()).min(MAX_PAGE_SIZE);
        let page = fetch_page(page_size, max_id).await?;

        let Some(oldest) = page.last().map(|s| s.id) else {
            break;
        };
        tracing::debug!("Fetched {} tweets (oldest {oldest})", page.len());
        statuses.extend(page);

        if oldest <= 1 {
            break;
        }
        max_id = Some(oldest - 1);
    }

    statuses.truncate(wanted);
    Ok(statuses)
}

/// Turn a raw HTTP answer into `T` or the matching `ApiError`
pub(crate) fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    rate_limit_reset: Option<i64>,
    body: &str,
) -> Result<T, ApiError> {
    if let Ok(errors) = serde_json::from_str::<TwitterErrors>(body) {
        if errors.errors.iter().any(|e| e.code == RATE_LIMIT_CODE) {
            return Err(ApiError::RateLimit(rate_limit_reset));
        }
        return Err(ApiError::Twitter(errors));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimit(rate_limit_reset));
    }
    if !status.is_success() {
        return Err(ApiError::BadStatus(status));
    }

    Ok(serde_json::from_str(body)?)
}

// ==================== API Types ====================

#[derive(Debug, Deserialize)]
struct TwitterUser {
    id: u64,
    name: String,
    screen_name: String,
    #[serde(default)]
    statuses_count: u64,
}

#[derive(Debug, Deserialize)]
struct TwitterStatus {
    id: u64,
    #[serde(deserialize_with = "deserialize_datetime")]
    created_at: DateTime<Utc>,
    full_text: Option<String>,
    text: Option<String>,
    #[serde(default)]
    favorite_count: u32,
    #[serde(default)]
    retweet_count: u32,
    in_reply_to_screen_name: Option<String>,
    retweeted_status: Option<Box<RetweetedStatus>>,
}

#[derive(Debug, Deserialize)]
struct RetweetedStatus {
    user: Option<RetweetedUser>,
}

#[derive(Debug, Deserialize)]
struct RetweetedUser {
    screen_name: String,
}

impl TwitterUser {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            screen_name: self.screen_name,
            statuses_count: self.statuses_count,
        }
    }
}

impl TwitterStatus {
    fn into_post(self) -> Post {
        let raw = self.full_text.or(self.text).unwrap_or_default();
        let text = html_escape::decode_html_entities(&raw).to_string();

        Post {
            id: self.id,
            text,
            created_at: self.created_at,
            favorite_count: self.favorite_count,
            retweet_count: self.retweet_count,
            reply_to: self.in_reply_to_screen_name,
            retweet_of: self
                .retweeted_status
                .and_then(|rt| rt.user)
                .map(|u| u.screen_name),
        }
    }
}

/// Twitter timestamps look like `Wed Aug 27 13:08:45 +0000 2008`
fn deserialize_datetime<'de, D>(ser: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(ser)?;
    DateTime::parse_from_str(&s, "%a %b %d %T %z %Y")
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(D::Error::custom)
}
