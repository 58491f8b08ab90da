//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, PaginationConfig};
use crate::error::{Error, Result};
use crate::pagination::Paginator;
use crate::types::RequestSpec;
use futures::TryStreamExt;
use std::io::{self, Write};
use std::pin::pin;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        self.run_with_output(&mut io::stdout()).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = self.resolve_config()?;
        match &self.cli.command {
            Commands::Fetch {
                url,
                page,
                max_pages,
            } => {
                let spec = RequestSpec {
                    url: url.clone(),
                    page: page.clone(),
                };
                self.fetch(config, spec, *max_pages, out).await
            }
            Commands::Config => {
                let yaml = serde_yaml::to_string(&config)?;
                out.write_all(yaml.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<PaginationConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => PaginationConfig::default(),
        };

        if let Some(retries) = self.cli.max_retries {
            config.requester.max_retries = retries;
        }
        if let Some(ms) = self.cli.retry_timeout_ms {
            config.requester.retry_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.cli.request_timeout_ms {
            config.requester.max_request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.cli.threshold_ms {
            config.threshold = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Stream pages to `out`, one JSON array per line
    async fn fetch<W: Write>(
        &self,
        config: PaginationConfig,
        spec: RequestSpec,
        max_pages: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        if max_pages == Some(0) {
            return Err(Error::config("--max-pages must be at least 1"));
        }

        let start = Instant::now();
        let paginator = Paginator::http(config)?;
        let mut pages = pin!(paginator.get_paginated(spec));

        let mut page_count = 0usize;
        let mut record_count = 0usize;
        while let Some(page) = pages.try_next().await? {
            serde_json::to_writer(&mut *out, &page)?;
            out.write_all(b"\n")?;
            out.flush()?;

            page_count += 1;
            record_count += page.len();
            if max_pages.is_some_and(|limit| page_count >= limit) {
                break;
            }
        }

        info!(
            "Fetched {} page(s), {} record(s) in {:?}",
            page_count,
            record_count,
            start.elapsed()
        );
        Ok(())
    }
}
