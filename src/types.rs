//! Common types used throughout tidfetch
//!
//! Request descriptions, pages and cursors shared by the HTTP and
//! pagination modules.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One fetched page: the ordered records returned by a single request.
/// An empty page means the source is exhausted.
pub type Page = Vec<JsonValue>;

/// Opaque cursor value sent back to the server to resume after a record
pub type Cursor = String;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// HTTP GET
    #[default]
    GET,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
        }
    }
}

/// A single request as handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Full URL including the cursor query parameter
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Upper bound for this attempt
    pub timeout: Duration,
}

// ============================================================================
// Request Spec
// ============================================================================

/// What to fetch and where to resume from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Base URL of the paginated endpoint
    pub url: String,
    /// Cursor of the page to fetch, `None` for the first page
    #[serde(default)]
    pub page: Option<Cursor>,
}

impl RequestSpec {
    /// Create a spec for the first page of `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page: None,
        }
    }

    /// Derive a spec for the same URL resuming at `page`
    #[must_use]
    pub fn with_page(&self, page: impl Into<Cursor>) -> Self {
        Self {
            url: self.url.clone(),
            page: Some(page.into()),
        }
    }

    /// Render the target URL, appending the cursor as `<cursor_param>=<page>`
    /// to the query string
    ///
    /// Without a page the base URL is returned as written. With one, the URL
    /// is re-serialized, so an existing query is extended and a fragment stays
    /// after the query.
    pub fn target_url(&self, cursor_param: &str) -> Result<String> {
        let mut url = Url::parse(&self.url)?;

        let Some(page) = &self.page else {
            return Ok(self.url.clone());
        };

        url.query_pairs_mut().append_pair(cursor_param, page);
        Ok(url.to_string())
    }

    /// Build the GET request for this spec
    pub fn to_request(&self, cursor_param: &str, timeout: Duration) -> Result<HttpRequest> {
        Ok(HttpRequest {
            url: self.target_url(cursor_param)?,
            method: Method::GET,
            timeout,
        })
    }
}

/// Read the cursor carried by `record[field]`
///
/// Strings are used as-is (an empty string is still a cursor and is sent as
/// `tid=`), numbers keep their JSON formatting. Anything else
/// (missing, null, objects) carries no cursor.
pub fn cursor_of(record: &JsonValue, field: &str) -> Option<Cursor> {
    match record.get(field)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_url_without_page() {
        let spec = RequestSpec::new("https://testing.com");
        assert_eq!(spec.target_url("tid").unwrap(), "https://testing.com");
    }

    #[test]
    fn test_target_url_appends_cursor() {
        let spec = RequestSpec::new("https://testing.com").with_page("42");
        assert_eq!(spec.target_url("tid").unwrap(), "https://testing.com/?tid=42");
    }

    #[test]
    fn test_target_url_keeps_fragment_after_query() {
        let spec = RequestSpec::new("https://testing.com/trades#top").with_page("42");
        let target = spec.target_url("tid").unwrap();
        assert_eq!(target, "https://testing.com/trades?tid=42#top");

        let parsed = Url::parse(&target).unwrap();
        assert_eq!(parsed.query(), Some("tid=42"));
        assert_eq!(parsed.fragment(), Some("top"));
    }

    #[test]
    fn test_target_url_sends_empty_cursor() {
        let spec = RequestSpec::new("https://testing.com/trades").with_page("");
        assert_eq!(spec.target_url("tid").unwrap(), "https://testing.com/trades?tid=");
    }

    #[test]
    fn test_target_url_extends_existing_query() {
        let spec = RequestSpec::new("https://testing.com/trades?symbol=btc").with_page("a b");
        assert_eq!(
            spec.target_url("tid").unwrap(),
            "https://testing.com/trades?symbol=btc&tid=a+b"
        );
    }

    #[test]
    fn test_target_url_rejects_invalid_url() {
        let spec = RequestSpec::new("not a url").with_page("1");
        assert!(matches!(
            spec.target_url("tid"),
            Err(crate::Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_to_request_shape() {
        let spec = RequestSpec::new("https://testing.com").with_page("9");
        let request = spec.to_request("tid", Duration::from_millis(1000)).unwrap();
        assert_eq!(request.url, "https://testing.com/?tid=9");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.timeout, Duration::from_millis(1000));
    }

    #[test]
    fn test_with_page_keeps_url() {
        let spec = RequestSpec::new("https://testing.com");
        let next = spec.with_page("abc");
        assert_eq!(next.url, spec.url);
        assert_eq!(next.page.as_deref(), Some("abc"));
        assert!(spec.page.is_none());
    }

    #[test]
    fn test_cursor_of() {
        assert_eq!(cursor_of(&json!({"tid": "x1"}), "tid"), Some("x1".to_string()));
        assert_eq!(cursor_of(&json!({"tid": 1234}), "tid"), Some("1234".to_string()));
        assert_eq!(cursor_of(&json!({"tid": ""}), "tid"), Some(String::new()));
        assert_eq!(cursor_of(&json!({"tid": null}), "tid"), None);
        assert_eq!(cursor_of(&json!({"id": 1}), "tid"), None);
        assert_eq!(cursor_of(&json!([1, 2]), "tid"), None);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
    }
}
