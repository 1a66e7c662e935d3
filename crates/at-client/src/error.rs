//! Error types for at-client.

/// Result type alias for at-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP statuses Airtable uses for transient failures.
///
/// 429 is the per-base rate limit; the gateway codes show up during
/// upstream hiccups and clear on their own.
pub const TRANSIENT_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Error type for at-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is a rate limit error (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Returns true if the operation was refused because the record is deleted.
    pub fn is_deleted(&self) -> bool {
        matches!(self.kind, ErrorKind::Deleted { .. })
    }

    /// Returns the HTTP status if this error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Non-2xx HTTP response.
    #[error("HTTP error: {status} {method} {url}: {message}")]
    Http {
        status: u16,
        method: String,
        url: String,
        message: String,
    },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed `createdTime` (or other timestamp) in a server response.
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),

    /// The server answered 2xx with a body that breaks the API contract.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Operation attempted on a record that has already been deleted.
    #[error("Record {record_id} is deleted")]
    Deleted { record_id: String },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The client was closed.
    #[error("Client is closed")]
    Closed,

    /// Retry ceiling reached.
    #[error("All {attempts} retry attempts exhausted")]
    RetriesExhausted { attempts: u32 },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    ///
    /// Only the transient HTTP statuses qualify; transport and decode
    /// failures are surfaced to the caller as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Http { status, .. } => is_transient_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is one of the transient statuses.
pub fn is_transient_status(status: u16) -> bool {
    TRANSIENT_STATUSES.contains(&status)
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}
