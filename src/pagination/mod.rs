//! Pagination module
//!
//! Turns a sequence of retried requests into a lazy stream of pages.
//!
//! # Overview
//!
//! Each page is fetched with the cursor taken from the trailing record of
//! the previous one (`?tid=<last tid>`). An empty page ends the stream; a
//! fixed threshold delay separates consecutive requests.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{next_spec, PaginationState};
