//! Lazy cursor pagination over a [`Requester`]

use super::types::{next_spec, PaginationState};
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::http::{AttemptHook, HttpTransport, Requester, RetryContext, Sleeper, TokioSleeper, Transport};
use crate::types::{Page, RequestSpec};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Drives a requester page by page, advancing the cursor from each page's
/// trailing record until the server answers with an empty page
#[derive(Debug, Clone)]
pub struct Paginator {
    requester: Requester,
    config: PaginationConfig,
}

impl Paginator {
    /// Create a paginator over the reqwest transport
    pub fn http(config: PaginationConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new()?), config))
    }

    /// Create a paginator sleeping on the tokio timer
    pub fn new(transport: Arc<dyn Transport>, config: PaginationConfig) -> Self {
        Self::with_sleeper(transport, Arc::new(TokioSleeper), config)
    }

    /// Create a paginator with a custom sleeper
    pub fn with_sleeper(
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        config: PaginationConfig,
    ) -> Self {
        let requester = Requester::with_sleeper(transport, sleeper, config.requester.clone())
            .with_cursor_param(config.cursor_param.clone())
            .with_records_pointer(config.records_pointer.clone());
        Self { requester, config }
    }

    /// Observe every request attempt
    #[must_use]
    pub fn with_attempt_hook(mut self, hook: AttemptHook) -> Self {
        self.requester = self.requester.with_attempt_hook(hook);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Get the underlying requester
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Fetch one page with a fresh retry budget
    pub async fn handle_request(&self, spec: &RequestSpec) -> Result<Page> {
        self.requester.handle_request(spec, RetryContext::new()).await
    }

    /// Lazy stream of pages starting at `initial`
    ///
    /// Each pull performs one sleep-fetch-advance cycle: `threshold` is slept
    /// before every request except the first. The stream ends on an empty
    /// page. A failure beyond the retry budget is yielded once as `Err`, then
    /// the stream ends. Dropping the stream stops pagination.
    pub fn get_paginated(
        &self,
        initial: RequestSpec,
    ) -> impl Stream<Item = Result<Page>> + Send + '_ {
        stream::unfold(PaginationState::Start(initial), move |state| async move {
            let (spec, pages) = match state {
                PaginationState::Start(spec) => (spec, 0),
                PaginationState::Yielded { spec, last, pages } => {
                    self.requester.sleeper().sleep(self.config.threshold).await;
                    match next_spec(&spec, &last, &self.config.cursor_field) {
                        Ok(next) => (next, pages),
                        Err(e) => return Some((Err(e), PaginationState::Done)),
                    }
                }
                PaginationState::Done => return None,
            };

            match self.handle_request(&spec).await {
                Ok(page) => {
                    debug!(
                        url = %spec.url,
                        cursor = spec.page.as_deref().unwrap_or(""),
                        records = page.len(),
                        "Fetched page"
                    );
                    match PaginationState::after_page(spec, &page, pages) {
                        Some(next) => Some((Ok(page), next)),
                        None => {
                            info!("Pagination finished after {} page(s)", pages);
                            None
                        }
                    }
                }
                Err(e) => Some((Err(e), PaginationState::Done)),
            }
        })
    }

    /// Collect pages until exhaustion or `max_pages`
    pub async fn collect_pages(
        &self,
        initial: RequestSpec,
        max_pages: Option<usize>,
    ) -> Result<Vec<Page>> {
        let pages = self.get_paginated(initial);
        match max_pages {
            Some(limit) => pages.take(limit).try_collect().await,
            None => pages.try_collect().await,
        }
    }
}
