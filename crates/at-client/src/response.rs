//! Response decoding and error-body handling.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::security::sanitize_error_message;

/// Airtable error body.
///
/// Two shapes are seen in the wild: `{"error": {"type": ..., "message": ...}}`
/// and the bare `{"error": "NOT_FOUND"}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed {
        #[serde(rename = "type")]
        error_type: String,
        #[serde(default)]
        message: Option<String>,
    },
    Code(String),
}

/// Turn a non-2xx response into a structured error.
pub(crate) fn parse_error_response(status: u16, method: &str, url: &str, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed {
                error_type,
                message: Some(message),
            },
        }) => format!("{error_type}: {message}"),
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed { error_type, message: None },
        }) => error_type,
        Ok(ErrorEnvelope {
            error: ErrorBody::Code(code),
        }) => code,
        Err(_) => body.to_string(),
    };

    Error::new(ErrorKind::Http {
        status,
        method: method.to_string(),
        url: url.to_string(),
        message: sanitize_error_message(&message),
    })
}

/// Decode a 2xx body into `T`.
///
/// A shape mismatch is a contract problem between client and server, so it
/// maps to [`ErrorKind::Json`] and is never retried.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(Into::into)
}
