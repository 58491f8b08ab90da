//! Retrying requester
//!
//! Runs one logical fetch:
//! - each attempt raced against `max_request_timeout`
//! - failed attempts retried after a fixed `retry_timeout`
//! - at most `max_retries` attempts, the first one included
//!
//! Once the budget is spent the last failure is returned unchanged.

use super::sleep::{Sleeper, TokioSleeper};
use super::transport::{HttpTransport, Transport};
use crate::config::{RequesterConfig, DEFAULT_CURSOR_KEY};
use crate::error::{Error, Result};
use crate::types::{HttpRequest, JsonValue, Page, RequestSpec};
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempt counter passed by value from one attempt to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryContext {
    /// Number of the current attempt; 0 means no attempt made yet
    pub retries: u32,
}

impl RetryContext {
    /// Context of a first external call
    pub fn new() -> Self {
        Self::default()
    }

    /// Context resuming at the given attempt number
    pub fn with_retries(retries: u32) -> Self {
        Self { retries }
    }

    /// The first attempt counts as attempt 1
    fn first_attempt(self) -> Self {
        Self {
            retries: self.retries.max(1),
        }
    }

    fn next(self) -> Self {
        Self {
            retries: self.retries.saturating_add(1),
        }
    }
}

/// Called before every attempt with the spec and the attempt's context
pub type AttemptHook = Arc<dyn Fn(&RequestSpec, RetryContext) + Send + Sync>;

/// Request wrapper adding a timeout race and bounded retries to a transport
#[derive(Clone)]
pub struct Requester {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    config: RequesterConfig,
    cursor_param: String,
    records_pointer: Option<String>,
    attempt_hook: Option<AttemptHook>,
}

impl Requester {
    /// Create a requester over the reqwest transport with default config
    pub fn http() -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpTransport::new()?),
            RequesterConfig::default(),
        ))
    }

    /// Create a requester sleeping on the tokio timer
    pub fn new(transport: Arc<dyn Transport>, config: RequesterConfig) -> Self {
        Self::with_sleeper(transport, Arc::new(TokioSleeper), config)
    }

    /// Create a requester with a custom sleeper
    pub fn with_sleeper(
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        config: RequesterConfig,
    ) -> Self {
        Self {
            transport,
            sleeper,
            config,
            cursor_param: DEFAULT_CURSOR_KEY.to_string(),
            records_pointer: None,
            attempt_hook: None,
        }
    }

    /// Set the query parameter carrying the cursor
    #[must_use]
    pub fn with_cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = param.into();
        self
    }

    /// Read records from this JSON pointer instead of the body root
    #[must_use]
    pub fn with_records_pointer(mut self, pointer: Option<String>) -> Self {
        self.records_pointer = pointer;
        self
    }

    /// Observe every attempt
    #[must_use]
    pub fn with_attempt_hook(mut self, hook: AttemptHook) -> Self {
        self.attempt_hook = Some(hook);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &RequesterConfig {
        &self.config
    }

    /// Get the sleeper
    pub fn sleeper(&self) -> &Arc<dyn Sleeper> {
        &self.sleeper
    }

    /// Fetch one page, retrying failed attempts within the budget
    pub async fn handle_request(&self, spec: &RequestSpec, context: RetryContext) -> Result<Page> {
        let request = spec.to_request(&self.cursor_param, self.config.max_request_timeout)?;
        let mut context = context.first_attempt();
        let max_attempts = self.config.max_attempts();

        loop {
            if let Some(hook) = &self.attempt_hook {
                hook(spec, context);
            }
            debug!(
                url = %request.url,
                attempt = context.retries,
                max_attempts,
                "Requesting page"
            );

            match self.make_request(&request).await {
                Ok(body) => return extract_records(body, self.records_pointer.as_deref()),
                Err(e) if context.retries < max_attempts => {
                    warn!(
                        "Request to {} failed ({}), attempt {}/{}, retrying in {:?}",
                        request.url,
                        e,
                        context.retries,
                        max_attempts,
                        self.config.retry_timeout
                    );
                    self.sleeper.sleep(self.config.retry_timeout).await;
                    context = context.next();
                }
                Err(e) => {
                    warn!(
                        "Request to {} failed after {} attempt(s): {}",
                        request.url, context.retries, e
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Race one transport call against the request timeout
    ///
    /// When the timer wins the transport future is dropped, so a late
    /// response can never settle the call a second time.
    pub async fn make_request(&self, request: &HttpRequest) -> Result<JsonValue> {
        match tokio::time::timeout(request.timeout, self.transport.get(&request.url)).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(
                &request.url,
                request.timeout.as_millis() as u64,
            )),
        }
    }
}

impl std::fmt::Debug for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("config", &self.config)
            .field("cursor_param", &self.cursor_param)
            .field("records_pointer", &self.records_pointer)
            .field("has_attempt_hook", &self.attempt_hook.is_some())
            .finish_non_exhaustive()
    }
}

/// Pull the record array out of a response body
pub fn extract_records(body: JsonValue, pointer: Option<&str>) -> Result<Page> {
    let selected = match pointer {
        Some(pointer) if !pointer.is_empty() => {
            let mut body = body;
            body.pointer_mut(pointer)
                .map(JsonValue::take)
                .ok_or_else(|| Error::decode(format!("No value at '{pointer}'")))?
        }
        _ => body,
    };

    match selected {
        JsonValue::Array(records) => Ok(records),
        other => Err(Error::decode(format!(
            "Expected an array of records, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
