// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # tidfetch
//!
//! Fetches paginated JSON from an HTTP endpoint one page at a time, retrying
//! failed requests and stopping once the server answers with an empty page.
//!
//! ## Features
//!
//! - **Timeout Race**: every attempt is bounded by `max_request_timeout`
//! - **Fixed-Delay Retries**: up to `max_retries` attempts per page
//! - **Cursor Pagination**: `?tid=<last tid>` taken from the previous page
//! - **Lazy Streams**: pages are fetched only when pulled
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use tidfetch::{PaginationConfig, Paginator, RequestSpec, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let paginator = Paginator::http(PaginationConfig::default())?;
//!     let spec = RequestSpec::new("https://api.example.com/trades").with_page("0");
//!
//!     let mut pages = std::pin::pin!(paginator.get_paginated(spec));
//!     while let Some(page) = pages.try_next().await? {
//!         println!("{} records", page.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ Paginator::get_paginated → Stream<Page>    │
//! │   sleep(threshold) · advance cursor        │
//! └─────────────────────┬──────────────────────┘
//! ┌─────────────────────┴──────────────────────┐
//! │ Requester::handle_request → Page           │
//! │   timeout race · sleep(retry_timeout)      │
//! └─────────────────────┬──────────────────────┘
//! ┌─────────────────────┴──────────────────────┐
//! │ Transport::get → JSON     Sleeper::sleep   │
//! └────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
#[allow(missing_docs)]
pub mod error;

/// Common types and type aliases
pub mod types;

/// Requester and pagination configuration
pub mod config;

/// Transport, sleeper and retrying requester
pub mod http;

/// Lazy cursor pagination
pub mod pagination;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, load_config_from_str, PaginationConfig, RequesterConfig};
pub use error::{Error, Result};
pub use http::{HttpTransport, Requester, RetryContext, Sleeper, TokioSleeper, Transport};
pub use pagination::Paginator;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
