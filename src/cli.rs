//! Command-line interface parsing for Zen Quotes CLI
//!
//! Running without arguments is the normal mode. The only option overrides
//! where the daily cache file lives.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cache::default_cache_file;
use crate::data::zenquotes::{REQUEST_TIMEOUT, ZEN_QUOTES_BASE_URL};

/// Zen Quotes CLI - Print today's quote and a random one
#[derive(Parser, Debug)]
#[command(name = "zenquotes")]
#[command(about = "Print the Zen quote of the day and a random quote, cached daily")]
#[command(version)]
pub struct Cli {
    /// Use this cache file instead of output/zen_quotes.json next to the executable
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,
}

/// Runtime configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Zen Quotes API base URL, without the mode suffix
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Location of the cached bundle
    pub cache_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: ZEN_QUOTES_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            cache_file: default_cache_file(),
        }
    }
}

impl Config {
    /// Creates a Config from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Config::default();
        if let Some(path) = &cli.cache_file {
            config.cache_file = path.clone();
        }
        config
    }
}
