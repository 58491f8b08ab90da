//! Configuration for requesters and paginators
//!
//! Both configs are fixed at construction. Defaults are applied once, either
//! through `Default`, the builders, or `#[serde(default)]` when loading a
//! YAML/JSON file.
//!
//! ```yaml
//! max_retries: 4
//! retry_timeout_ms: 1000
//! max_request_timeout_ms: 1000
//! threshold_ms: 200
//! cursor_param: tid
//! cursor_field: tid
//! records_pointer: /data
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 4;
/// Default delay between attempts
pub const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_millis(1000);
/// Default upper bound for a single attempt
pub const DEFAULT_MAX_REQUEST_TIMEOUT: Duration = Duration::from_millis(1000);
/// Default delay between pages
pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(200);
/// Default cursor query parameter and record field
pub const DEFAULT_CURSOR_KEY: &str = "tid";

// ============================================================================
// Requester Config
// ============================================================================

/// Retry and timeout settings for a single logical request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequesterConfig {
    /// Total attempts before the last failure is surfaced (first attempt included)
    pub max_retries: u32,
    /// Delay between a failed attempt and the next one
    #[serde(rename = "retry_timeout_ms", with = "duration_ms")]
    pub retry_timeout: Duration,
    /// Upper bound for one attempt
    #[serde(rename = "max_request_timeout_ms", with = "duration_ms")]
    pub max_request_timeout: Duration,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
            max_request_timeout: DEFAULT_MAX_REQUEST_TIMEOUT,
        }
    }
}

impl RequesterConfig {
    /// Create a new config builder
    pub fn builder() -> RequesterConfigBuilder {
        RequesterConfigBuilder::default()
    }

    /// Attempts actually made for a persistently failing request
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

/// Builder for requester config
#[derive(Default)]
pub struct RequesterConfigBuilder {
    config: RequesterConfig,
}

impl RequesterConfigBuilder {
    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the delay between attempts
    pub fn retry_timeout(mut self, delay: Duration) -> Self {
        self.config.retry_timeout = delay;
        self
    }

    /// Set the per-attempt timeout
    pub fn max_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.max_request_timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> RequesterConfig {
        self.config
    }
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Requester settings plus the pagination-specific ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Retry and timeout settings for each page request
    #[serde(flatten)]
    pub requester: RequesterConfig,
    /// Delay enforced between successful page fetches
    #[serde(rename = "threshold_ms", with = "duration_ms")]
    pub threshold: Duration,
    /// Query parameter carrying the cursor
    pub cursor_param: String,
    /// Record field whose value becomes the next cursor
    pub cursor_field: String,
    /// JSON pointer to the record array when the body is an object
    pub records_pointer: Option<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            requester: RequesterConfig::default(),
            threshold: DEFAULT_THRESHOLD,
            cursor_param: DEFAULT_CURSOR_KEY.to_string(),
            cursor_field: DEFAULT_CURSOR_KEY.to_string(),
            records_pointer: None,
        }
    }
}

impl PaginationConfig {
    /// Create a new config builder
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }

    /// Check the values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.cursor_param.trim().is_empty() {
            return Err(Error::config("cursor_param must not be empty"));
        }
        if self.cursor_field.trim().is_empty() {
            return Err(Error::config("cursor_field must not be empty"));
        }
        if let Some(pointer) = &self.records_pointer {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                return Err(Error::config(format!(
                    "records_pointer '{pointer}' must be a JSON pointer starting with '/'"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for pagination config
#[derive(Default)]
pub struct PaginationConfigBuilder {
    config: PaginationConfig,
}

impl PaginationConfigBuilder {
    /// Replace the requester settings
    pub fn requester(mut self, requester: RequesterConfig) -> Self {
        self.config.requester = requester;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.requester.max_retries = retries;
        self
    }

    /// Set the delay between attempts
    pub fn retry_timeout(mut self, delay: Duration) -> Self {
        self.config.requester.retry_timeout = delay;
        self
    }

    /// Set the per-attempt timeout
    pub fn max_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.requester.max_request_timeout = timeout;
        self
    }

    /// Set the delay between pages
    pub fn threshold(mut self, threshold: Duration) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the cursor query parameter name
    pub fn cursor_param(mut self, param: impl Into<String>) -> Self {
        self.config.cursor_param = param.into();
        self
    }

    /// Set the record field the cursor is read from
    pub fn cursor_field(mut self, field: impl Into<String>) -> Self {
        self.config.cursor_field = field.into();
        self
    }

    /// Set the JSON pointer to the record array
    pub fn records_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.config.records_pointer = Some(pointer.into());
        self
    }

    /// Build the config
    pub fn build(self) -> PaginationConfig {
        self.config
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a pagination config from a YAML or JSON file
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn load_config(path: impl AsRef<Path>) -> Result<PaginationConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: PaginationConfig = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    config.validate()?;
    Ok(config)
}

/// Load a pagination config from a YAML string (JSON is valid YAML)
pub fn load_config_from_str(content: &str) -> Result<PaginationConfig> {
    let config: PaginationConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Serialize `Duration` as whole milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
