//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch cursor-paginated JSON from an HTTP endpoint
#[derive(Parser, Debug)]
#[command(name = "tidfetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Attempts per request, first attempt included
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Delay between attempts in milliseconds
    #[arg(long, global = true)]
    pub retry_timeout_ms: Option<u64>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, global = true)]
    pub request_timeout_ms: Option<u64>,

    /// Delay between pages in milliseconds
    #[arg(long, global = true)]
    pub threshold_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch pages and print each one as a JSON line
    Fetch {
        /// Endpoint URL
        #[arg(short, long)]
        url: String,

        /// Cursor to start from
        #[arg(short, long)]
        page: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Print the effective configuration as YAML
    Config,
}
