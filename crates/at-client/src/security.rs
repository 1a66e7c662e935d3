//! Credential hygiene for messages that leave the client.
//!
//! Error bodies from the API are echoed into [`crate::Error`] messages, which
//! end up in logs. Anything that looks like an Airtable credential is
//! redacted first, and long bodies are truncated.

use std::sync::OnceLock;

use regex_lite::Regex;

const MAX_LENGTH: usize = 500;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Personal access tokens: "pat" + 14 chars + "." + 64 hex chars.
    PATTERN.get_or_init(|| {
        Regex::new(r"pat[A-Za-z0-9]{14}\.[A-Fa-f0-9]{16,}").expect("valid token regex")
    })
}

fn legacy_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bkey[A-Za-z0-9]{14}\b").expect("valid key regex"))
}

fn bearer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)bearer\s+[A-Za-z0-9._-]+").expect("valid bearer regex"))
}

/// Sanitize an error message to prevent exposing credentials.
///
/// - Redacts personal access tokens and legacy API keys
/// - Redacts `Bearer ...` header values
/// - Truncates messages longer than 500 bytes
#[must_use]
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = token_pattern()
        .replace_all(message, "[REDACTED_TOKEN]")
        .into_owned();
    sanitized = legacy_key_pattern()
        .replace_all(&sanitized, "[REDACTED_KEY]")
        .into_owned();
    sanitized = bearer_pattern()
        .replace_all(&sanitized, "Bearer [REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
