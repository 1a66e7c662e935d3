//! High-level Airtable client: credential, session, rate limiter, retry.
//!
//! This module provides `AirtableClient`, the single choke point every API
//! call passes through. Each attempt first claims a rate-limit slot keyed by
//! the base id, then executes; the retry policy wraps the whole attempt.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - The API key is skipped in tracing spans

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::client::AtHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::rate_limit::RateLimiter;
use crate::request::RequestBuilder;
use crate::retry::{with_retry, RetryConfig};

/// Environment variable read by [`AirtableClient::from_env`].
pub const API_KEY_ENV: &str = "AIRTABLE_API_KEY";

struct ClientInner {
    http: RwLock<Option<AtHttpClient>>,
    limiter: RateLimiter,
    api_key: String,
    api_url: Url,
    retry: RetryConfig,
    closed: AtomicBool,
}

/// High-level Airtable API client.
///
/// Cheap to clone: clones share one HTTP session and one rate limiter, so
/// every clone (and every base/table/record wrapper built on it) is
/// throttled together.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_at_client::{AirtableClient, RequestBuilder};
///
/// let client = AirtableClient::from_env()?;
/// let url = client.base_url("appXXXXXXXXXXXXXX")?;
/// let page: serde_json::Value = client
///     .request("appXXXXXXXXXXXXXX", &RequestBuilder::get(url.join("Tasks")?))
///     .await?;
/// client.close();
/// ```
#[derive(Clone)]
pub struct AirtableClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableClient")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.inner.api_url.as_str())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl AirtableClient {
    /// Create a new client with the given API key (personal access token).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config("API key is empty".to_string())));
        }

        let mut api_url = Url::parse(config.api_url.trim_end_matches('/'))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::InvalidUrl(config.api_url.clone())));
        }
        // Keep a trailing slash so `join` appends segments instead of replacing one.
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let limiter = RateLimiter::new(config.rate_limit.clone());
        let retry = config.retry.clone().unwrap_or_else(RetryConfig::no_retry);
        let http = AtHttpClient::new(config)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: RwLock::new(Some(http)),
                limiter,
                api_key,
                api_url,
                retry,
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Create a client from the `AIRTABLE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(ClientConfig::default())
    }

    /// Create a client from the `AIRTABLE_API_KEY` environment variable with custom configuration.
    pub fn from_env_with_config(config: ClientConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            Error::new(ErrorKind::Config(format!("{API_KEY_ENV} is not set")))
        })?;
        Self::with_config(api_key, config)
    }

    /// API root every base URL hangs off (always ends with `/`).
    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    /// URL of a base: `{api_url}/{base_id}/`.
    pub fn base_url(&self, base_id: &str) -> Result<Url> {
        append_segment(&self.inner.api_url, base_id)
    }

    /// The shared rate limiter.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.inner.limiter
    }

    /// Effective retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Execute `request` on behalf of `base_id` and decode the response.
    ///
    /// Every attempt (including retries) claims a rate-limit slot under
    /// `base_id` before touching the network. Only transient HTTP statuses
    /// are retried.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        base_id: &str,
        request: &RequestBuilder,
    ) -> Result<T> {
        with_retry(&self.inner.retry, || async move {
            let http = self.session()?;
            let permit = self.inner.limiter.acquire(base_id).await;
            debug!(key = permit.key(), "Rate limit slot acquired");
            http.execute(request, &self.inner.api_key).await
        })
        .await
    }

    /// Release the HTTP session and all rate-limiter state.
    ///
    /// Idempotent. Requests issued afterwards fail with
    /// [`ErrorKind::Closed`]; in-flight requests finish on the session they
    /// already hold. Dropping the last clone releases the same resources.
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let http = match self.inner.http.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        drop(http);
        self.inner.limiter.clear();
        debug!("Airtable client closed");
    }

    fn session(&self) -> Result<AtHttpClient> {
        let guard = match self.inner.http.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().cloned().ok_or_else(|| Error::new(ErrorKind::Closed))
    }
}

/// Append one percent-encoded path segment, leaving a trailing slash so the
/// result can be extended again.
pub fn append_segment(url: &Url, segment: &str) -> Result<Url> {
    if segment.is_empty() {
        return Err(Error::new(ErrorKind::InvalidUrl(
            "empty path segment".to_string(),
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::InvalidUrl(url.to_string())));
    }
    let mut url = url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment).push("");
    }
    Ok(url)
}

/// Strip the trailing empty segment left by [`append_segment`].
pub fn endpoint(url: &Url) -> Url {
    let mut url = url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty();
    }
    url
}
