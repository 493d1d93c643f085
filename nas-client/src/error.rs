// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::tree::Format;

/// Characters of an offending body kept for diagnostics
pub const SNIPPET_LEN: usize = 200;

/// Error types for every layer of the client
#[derive(Error, Debug)]
pub enum NasError {
    /// Network failure, timeout or non-2xx status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing, rejected or expired authentication
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Failed to decode {format} response: {reason} (body: {snippet:?})")]
    Decode {
        format: Format,
        reason: String,
        snippet: String,
    },

    /// A mandatory field was absent, or a present field did not parse
    #[error("Cannot read field `{field}` as {expected}: {reason}")]
    Coercion {
        field: String,
        expected: &'static str,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    State(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl NasError {
    pub fn decode(format: Format, reason: impl ToString, body: &str) -> Self {
        NasError::Decode {
            format,
            reason: reason.to_string(),
            snippet: snippet(body),
        }
    }

    pub fn coercion(field: &str, expected: &'static str, reason: impl Into<String>) -> Self {
        NasError::Coercion {
            field: field.to_string(),
            expected,
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str, expected: &'static str) -> Self {
        Self::coercion(field, expected, "mandatory field is missing")
    }

    pub fn not_loaded() -> Self {
        NasError::State("data not loaded; call refresh() first".to_string())
    }
}

impl From<reqwest::Error> for NasError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NasError::Transport(format!("request timed out: {err}"))
        } else {
            NasError::Transport(err.to_string())
        }
    }
}

/// First `SNIPPET_LEN` characters of `body`, cut on a char boundary
pub fn snippet(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, NasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(500);
        let cut = snippet(&body);
        assert_eq!(cut.len(), SNIPPET_LEN + 3);
        assert!(cut.ends_with("..."));

        assert_eq!(snippet("<short/>"), "<short/>");
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let body = "é".repeat(300);
        let cut = snippet(&body);
        assert_eq!(cut.chars().count(), SNIPPET_LEN + 3);
    }

    #[test]
    fn messages_name_the_field() {
        let err = NasError::missing("serial", "string");
        assert_eq!(
            err.to_string(),
            "Cannot read field `serial` as string: mandatory field is missing"
        );
        assert!(NasError::not_loaded().to_string().contains("data not loaded"));
    }
}
