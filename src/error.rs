//! Error types for tidfetch
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Transport failures are passed through unchanged; there is no separate
//! "retries exhausted" variant, the last attempt's error is surfaced as-is.

use thiserror::Error;

/// The main error type for tidfetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout at [{url}] after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Page Errors
    // ============================================================================
    #[error("Failed to decode page: {message}")]
    Decode { message: String },

    #[error("Last record of page has no usable cursor field '{field}'")]
    MissingCursor { field: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a timeout error for the given URL
    pub fn timeout(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_ms,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing cursor error
    pub fn missing_cursor(field: impl Into<String>) -> Self {
        Self::MissingCursor {
            field: field.into(),
        }
    }

    /// Check if this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

/// Result type alias for tidfetch
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::missing_cursor("tid");
        assert_eq!(
            err.to_string(),
            "Last record of page has no usable cursor field 'tid'"
        );
    }

    #[test]
    fn test_timeout_message_names_url() {
        let err = Error::timeout("https://testing.com?tid=7", 15);
        assert_eq!(
            err.to_string(),
            "Request timeout at [https://testing.com?tid=7] after 15ms"
        );
        assert!(err.is_timeout());
    }
}
