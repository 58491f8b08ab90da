//! HTTP module
//!
//! Provides the transport seam and the retrying requester built on it.
//!
//! # Features
//!
//! - **Transport**: one GET, body accumulated and parsed as JSON
//! - **Timeout Race**: each attempt bounded by `max_request_timeout`
//! - **Fixed-Delay Retries**: up to `max_retries` attempts, `retry_timeout` apart
//! - **Injectable Sleep**: all delays go through a [`Sleeper`]

mod client;
mod sleep;
mod transport;

pub use client::{extract_records, AttemptHook, Requester, RetryContext};
pub use sleep::{RecordingSleeper, Sleeper, TokioSleeper};
pub use transport::{HttpTransport, Transport};
