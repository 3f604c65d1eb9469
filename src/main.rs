//! Zen Quotes CLI - Print the quote of the day and a random quote
//!
//! Quotes come from the Zen Quotes API and are cached on disk once per
//! calendar day, so repeated runs on the same day make no network requests.

use std::io;

use clap::Parser;

use zenquotes::cache::{CacheManager, QuoteStore};
use zenquotes::cli::{Cli, Config};
use zenquotes::data::ZenQuotesClient;

/// Initializes the process-wide logger; `RUST_LOG` overrides the default level
fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let client = ZenQuotesClient::with_base_url(config.base_url).with_timeout(config.timeout);
    let store = QuoteStore::with_path(config.cache_file);
    let mut manager = CacheManager::new(client, store);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    manager.run(&mut out).await?;

    Ok(())
}
