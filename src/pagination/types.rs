//! Pagination types
//!
//! Cursor bookkeeping between two pulls of the page stream.

use crate::error::{Error, Result};
use crate::types::{cursor_of, JsonValue, Page, RequestSpec};

/// Where the page stream stands between two pulls
#[derive(Debug, Clone)]
pub enum PaginationState {
    /// Nothing fetched yet
    Start(RequestSpec),
    /// A page was yielded; the next pull sleeps, then advances past `last`
    Yielded {
        /// Spec the yielded page was fetched with
        spec: RequestSpec,
        /// Trailing record of the yielded page
        last: JsonValue,
        /// Pages yielded so far
        pages: usize,
    },
    /// Exhausted or failed
    Done,
}

impl PaginationState {
    /// State after yielding `page` fetched with `spec`
    ///
    /// Returns `None` for an empty page, which ends pagination.
    pub fn after_page(spec: RequestSpec, page: &Page, pages: usize) -> Option<Self> {
        page.last().map(|last| Self::Yielded {
            spec,
            last: last.clone(),
            pages: pages + 1,
        })
    }
}

/// Spec for the page following the one that ended with `last`
///
/// The cursor is replaced by the trailing record's `cursor_field`.
pub fn next_spec(spec: &RequestSpec, last: &JsonValue, cursor_field: &str) -> Result<RequestSpec> {
    cursor_of(last, cursor_field)
        .map(|cursor| spec.with_page(cursor))
        .ok_or_else(|| Error::missing_cursor(cursor_field))
}
