//! HTTP request building.

use serde::Serialize;
use url::Url;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical API call: method, endpoint, ordered query and optional JSON body.
///
/// The builder is borrowed by every retry attempt, so it stays immutable
/// once handed to the client.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: Url,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: Url) -> Self {
        Self {
            method,
            url,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// GET request.
    pub fn get(url: Url) -> Self {
        Self::new(RequestMethod::Get, url)
    }

    /// POST request.
    pub fn post(url: Url) -> Self {
        Self::new(RequestMethod::Post, url)
    }

    /// PATCH request.
    pub fn patch(url: Url) -> Self {
        Self::new(RequestMethod::Patch, url)
    }

    /// DELETE request.
    pub fn delete(url: Url) -> Self {
        Self::new(RequestMethod::Delete, url)
    }

    /// Append a query parameter. Order is preserved and keys may repeat.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Append several query parameters in order.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Endpoint without query.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Query parameters in the order they will be sent.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Endpoint with the encoded query attached.
    pub fn full_url(&self) -> Result<Url> {
        let mut url = self.url.clone();
        if !self.query_params.is_empty() {
            let query = serde_urlencoded::to_string(&self.query_params)?;
            url.set_query(Some(&query));
        }
        Ok(url)
    }
}
