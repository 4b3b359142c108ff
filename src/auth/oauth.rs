//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Every call carries an `Authorization: OAuth ...` header whose signature covers the HTTP
//! method, the bare endpoint URL, all query/body parameters and the `oauth_*` parameters
//! themselves. See <https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature>.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::Method;
use sha1::Sha1;

use super::{Credentials, KeyPair};
use crate::error::ApiError;

/// Request parameters, kept sorted so query strings come out deterministic
pub type ParamList = BTreeMap<String, String>;

const NONCE_LEN: usize = 32;

/// Percent-encode per RFC 3986: everything but ASCII alphanumerics and `-._~`
pub fn percent_encode(src: &str) -> Cow<'_, str> {
    urlencoding::encode(src)
}

/// Render parameters as `k1=v1&k2=v2` with both halves percent-encoded
pub fn to_urlencoded(params: &ParamList) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The unsigned `oauth_*` parameter set for one request
#[derive(Clone, Debug)]
pub struct OAuthParams {
    consumer: KeyPair,
    token: KeyPair,
    nonce: String,
    timestamp: i64,
}

impl OAuthParams {
    /// Fresh parameters for a request made with `credentials`: new nonce, current timestamp
    pub fn new(credentials: &Credentials) -> Self {
        let nonce = rand::rng()
            .sample_iter(Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        Self {
            consumer: credentials.consumer.clone(),
            token: credentials.access.clone(),
            nonce,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Pin the nonce and timestamp (reproducible signatures)
    pub fn with_nonce(self, nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
            ..self
        }
    }

    fn oauth_pairs(&self) -> BTreeMap<&'static str, String> {
        let mut pairs = BTreeMap::new();
        pairs.insert("oauth_consumer_key", self.consumer.key.to_string());
        pairs.insert("oauth_nonce", self.nonce.clone());
        pairs.insert("oauth_signature_method", "HMAC-SHA1".to_string());
        pairs.insert("oauth_timestamp", self.timestamp.to_string());
        pairs.insert("oauth_token", self.token.key.to_string());
        pairs.insert("oauth_version", "1.0".to_string());
        pairs
    }

    /// The string that gets signed: `METHOD&url&params`, each part percent-encoded
    pub fn signature_base(&self, method: &Method, uri: &str, params: &ParamList) -> String {
        let mut query = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(self.oauth_pairs().iter().map(|(k, v)| (*k, v.as_str())))
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>();
        query.sort();

        format!(
            "{}&{}&{}",
            percent_encode(method.as_str()),
            percent_encode(uri),
            percent_encode(&query.join("&"))
        )
    }

    /// Sign the request described by `method`, `uri` and `params`
    pub fn sign(
        self,
        method: &Method,
        uri: &str,
        params: &ParamList,
    ) -> Result<SignedHeader, ApiError> {
        let base_str = self.signature_base(method, uri, params);
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer.secret),
            percent_encode(&self.token.secret)
        );

        let mut digest = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .map_err(|e| ApiError::Signing(e.to_string()))?;
        digest.update(base_str.as_bytes());
        let signature = STANDARD.encode(digest.finalize().into_bytes());

        let mut params = self.oauth_pairs();
        params.insert("oauth_signature", signature);
        Ok(SignedHeader { params })
    }
}

/// Signed OAuth parameters, ready to be used as an `Authorization` header value
#[derive(Debug, Clone)]
pub struct SignedHeader {
    params: BTreeMap<&'static str, String>,
}

impl SignedHeader {
    /// The base64 signature
    pub fn signature(&self) -> &str {
        self.params
            .get("oauth_signature")
            .map_or("", String::as_str)
    }
}

impl fmt::Display for SignedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OAuth ")?;

        let mut first = true;
        for (k, v) in &self.params {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}=\"{}\"", k, percent_encode(v))?;
        }

        Ok(())
    }
}

/// Build the `Authorization` header for one request
pub fn authorization_header(
    credentials: &Credentials,
    method: &Method,
    uri: &str,
    params: &ParamList,
) -> Result<String, ApiError> {
    Ok(OAuthParams::new(credentials)
        .sign(method, uri, params)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Twitter's published signing walkthrough
    fn sample() -> (Credentials, ParamList, OAuthParams) {
        let creds = Credentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let mut params = ParamList::new();
        params.insert(
            "status".into(),
            "Hello Ladies + Gentlemen, a signed OAuth request!".into(),
        );
        params.insert("include_entities".into(), "true".into());
        let oauth = OAuthParams::new(&creds)
            .with_nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg", 1_318_622_958);
        (creds, params, oauth)
    }

    const UPDATE_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

    #[test]
    fn test_signature_base() {
        let (_, params, oauth) = sample();
        let base = oauth.signature_base(&Method::POST, UPDATE_URL, &params);
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_signature() {
        let (_, params, oauth) = sample();
        let header = oauth.sign(&Method::POST, UPDATE_URL, &params).unwrap();
        assert_eq!(header.signature(), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");

        let rendered = header.to_string();
        assert!(rendered.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(rendered.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(rendered.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(rendered.contains("oauth_version=\"1.0\""));
        assert!(!rendered.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
    }

    #[test]
    fn test_fresh_nonce() {
        let (creds, params, _) = sample();
        let a = authorization_header(&creds, &Method::GET, UPDATE_URL, &params).unwrap();
        let b = authorization_header(&creds, &Method::GET, UPDATE_URL, &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sign_with_blank_and_long_secrets() {
        let params = ParamList::new();
        let blank = Credentials::new("ck", "", "at", "");
        let header = authorization_header(&blank, &Method::GET, UPDATE_URL, &params).unwrap();
        assert!(header.contains("oauth_signature=\""));

        let long = "s".repeat(500);
        let creds = Credentials::new("ck", long.clone(), "at", long);
        assert!(authorization_header(&creds, &Method::POST, UPDATE_URL, &params).is_ok());
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(percent_encode("☃"), "%E2%98%83");

        let mut params = ParamList::new();
        params.insert("user_id".into(), "12".into());
        params.insert("count".into(), "50".into());
        assert_eq!(to_urlencoded(&params), "count=50&user_id=12");
    }
}
