//! CLI module
//!
//! # Commands
//!
//! - `fetch` - Stream pages from an endpoint to stdout
//! - `config` - Show the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
