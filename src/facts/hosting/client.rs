//! GitHub API client
//!
//! Minimal GitHub API client for the repository search and commit listing endpoints.
//! Every outbound request goes through [`Client::execute`], which applies the
//! concurrency and rate limits and turns every kind of failure into a [`Failure`] value.

use crate::Result;
use crate::facts::rate_limiter::RateLimiter;
use crate::facts::throttler::Throttler;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const LOG_TARGET: &str = "    client";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Response of the repository search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One repository as returned by the search endpoint.
///
/// `name` and `owner` are optional here so that one malformed item cannot spoil
/// decoding of the whole page; they are checked per item later on.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub name: Option<String>,
    pub owner: Option<Account>,
    pub stargazers_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub language: Option<String>,
}

/// A GitHub account reference
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: Option<String>,
}

/// One entry of the commit listing endpoint, with only the fields we need
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    /// The GitHub account linked to the commit author, if GitHub could match one
    pub author: Option<Account>,
    pub commit: Option<CommitDetails>,
}

/// Git-level commit metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetails {
    pub author: Option<Signature>,
}

/// Free-text author information recorded in the commit itself
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Signature {
    pub name: Option<String>,
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Why a request produced no usable data
#[derive(Debug)]
pub enum Failure {
    /// Connection, DNS, TLS or timeout failure
    Transport(reqwest::Error),

    /// The server answered with a non-success status
    Status(StatusCode),

    /// The response body could not be decoded
    Decode(reqwest::Error),
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Status(status) => write!(f, "unexpected HTTP status {status}"),
            Self::Decode(e) => write!(f, "malformed response body: {e}"),
        }
    }
}

impl core::error::Error for Failure {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Transport(e) | Self::Decode(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl Failure {
    /// Returns `true` when the server rejected our credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status(StatusCode::UNAUTHORIZED))
    }
}

/// Result of a hosting API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded - contains data and optional rate limit info
    Success(T, Option<RateLimitInfo>),

    /// Request failed - no retry is attempted
    Failed(Failure, Option<RateLimitInfo>),
}

impl<T> ApiResult<T> {
    /// Drop the rate limit info and keep only the outcome.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(data, _) => Ok(data),
            Self::Failed(failure, _) => Err(failure),
        }
    }
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    throttler: Arc<Throttler>,
    rate_limiter: Arc<RateLimiter>,
}

impl Client {
    /// Create a new client.
    ///
    /// `max_concurrent` bounds the requests in flight and `max_rps` the requests
    /// started per second. Both limits are shared by all clones of the client.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, max_concurrent: usize, max_rps: u32, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        let _ = headers.insert(HeaderName::from_static("x-github-api-version"), HeaderValue::from_static(GITHUB_API_VERSION));

        if let Some(t) = token.filter(|t| !t.is_empty()) {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}")).into_app_err("access token contains invalid characters")?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("repo-census/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            throttler: Throttler::new(max_concurrent),
            rate_limiter: Arc::new(RateLimiter::new(max_rps)),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the concurrency throttler shared by this client's requests
    #[must_use]
    pub const fn throttler(&self) -> &Arc<Throttler> {
        &self.throttler
    }

    /// Perform one API call and decode its JSON body.
    ///
    /// Waits for a concurrency slot, then for a rate limiter admission, then sends the
    /// request exactly once. Failures are logged and returned, never propagated as errors.
    pub async fn execute<T: DeserializeOwned>(&self, method: Method, endpoint: &str, params: &[(&str, String)]) -> ApiResult<T> {
        let _permit = self.throttler.acquire().await;
        let _ = self.rate_limiter.wait().await;

        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        log::debug!(target: LOG_TARGET, "{method} {url}");

        let resp = match self.client.request(method, &url).query(params).send().await {
            Ok(r) => r,
            Err(e) => {
                let failure = Failure::Transport(e);
                log::warn!(target: LOG_TARGET, "Could not fetch '{endpoint}': {failure}");
                return ApiResult::Failed(failure, None);
            }
        };

        let rate_limit = extract_rate_limit_from_headers(resp.headers());
        if let Some(rl) = &rate_limit {
            log::debug!(target: LOG_TARGET, "API rate limit: {} remaining, resets at {}", rl.remaining, rl.reset_at.format("%T"));
        }

        let status = resp.status();
        if !status.is_success() {
            let failure = Failure::Status(status);
            log::warn!(target: LOG_TARGET, "Could not fetch '{endpoint}': {failure}");
            return ApiResult::Failed(failure, rate_limit);
        }

        match resp.json::<T>().await {
            Ok(data) => ApiResult::Success(data, rate_limit),
            Err(e) => {
                let failure = if e.is_decode() { Failure::Decode(e) } else { Failure::Transport(e) };
                log::warn!(target: LOG_TARGET, "Could not read response for '{endpoint}': {failure}");
                ApiResult::Failed(failure, rate_limit)
            }
        }
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
