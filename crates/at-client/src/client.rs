//! Single-shot HTTP executor.
//!
//! One call to [`AtHttpClient::execute`] is exactly one network request.
//! Retry and rate limiting are layered on top by
//! [`AirtableClient`](crate::AirtableClient).

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::{decode_body, parse_error_response};

/// HTTP client for the Airtable API: headers, encoding, decoding, error mapping.
#[derive(Debug, Clone)]
pub struct AtHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl AtHttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Send one request and decode the 2xx body into `T`.
    #[instrument(skip(self, request, api_key), fields(method = %request.method, url = %request.url))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &RequestBuilder,
        api_key: &str,
    ) -> Result<T> {
        let url = request.full_url()?;
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), url.clone())
            .bearer_auth(api_key);

        let mut body_bytes = None;
        if let Some(ref body) = request.body {
            let encoded = serde_json::to_vec(body)?;
            body_bytes = Some(encoded.len());
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(encoded);
        }

        // Payloads carry user data; only their size is logged.
        if self.config.enable_tracing {
            debug!(method = %request.method, url = %url, body_bytes, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            if self.config.enable_tracing {
                info!(status, content_length = response.content_length(), "Non-success response");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_response(
                status,
                request.method.as_str(),
                url.as_str(),
                &body,
            ));
        }

        let bytes = response.bytes().await?;
        if self.config.enable_tracing {
            debug!(status, content_length = bytes.len(), "Response received");
        }
        decode_body(&bytes)
    }
}
