//! Transport abstraction and the reqwest-backed implementation
//!
//! A transport performs one GET and returns the parsed JSON body. It knows
//! nothing about retries, timeouts or cursors.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::Client;
use tracing::debug;

/// Issues a GET and parses the body as JSON
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and parse the response body
    async fn get(&self, url: &str) -> Result<JsonValue>;
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("tidfetch/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Placeholder kept in `HttpStatus` when the error body cannot be read
const UNREADABLE_BODY: &str = "<unreadable body>";

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<JsonValue> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(url, error = %e, "Failed to read error response body");
                    UNREADABLE_BODY.to_string()
                }
            };
            return Err(Error::http_status(status.as_u16(), body));
        }

        // Accumulate the streamed body before parsing
        let mut buffer = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
        }

        debug!(url, bytes = buffer.len(), "Response body received");
        Ok(serde_json::from_slice(&buffer)?)
    }
}
