//! Cache manager for the daily quote bundle
//!
//! Provides a `CacheManager` that loads the stored bundle at startup, decides
//! whether it is stale for the current day, refreshes it from a
//! [`QuoteSource`] when needed, and renders the quotes.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use rand::Rng;
use thiserror::Error;

use super::store::{BundleStore, StoreError};
use crate::data::{QuoteBundle, QuoteMode, QuoteSource};

/// Line printed before a refresh
pub const REFRESH_NOTICE: &str = "Requesting new quotes";

/// Errors that abort a run
///
/// Fetch failures never show up here; they only cancel the refresh.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Persisting the refreshed bundle failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing to the console failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// The bundle held in memory, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing usable was loaded and no refresh has succeeded yet
    Absent,
    /// A displayable bundle
    Present(QuoteBundle),
}

/// Picks one index out of `len` candidates
pub trait QuoteSelector {
    /// Returns an index in `0..len`; `len` is never zero
    fn choose(&mut self, len: usize) -> usize;
}

/// Uniform random selection
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl QuoteSelector for RandomSelector {
    fn choose(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Owns the cached bundle and orchestrates fetching, persisting and printing
#[derive(Debug)]
pub struct CacheManager<S, T, R = RandomSelector> {
    source: S,
    store: T,
    selector: R,
    state: CacheState,
}

impl<S, T> CacheManager<S, T, RandomSelector>
where
    S: QuoteSource,
    T: BundleStore,
{
    /// Creates a manager, loading any bundle already in the store
    pub fn new(source: S, store: T) -> Self {
        Self::with_selector(source, store, RandomSelector)
    }
}

impl<S, T, R> CacheManager<S, T, R>
where
    S: QuoteSource,
    T: BundleStore,
    R: QuoteSelector,
{
    /// Creates a manager with a custom quote selector
    ///
    /// A missing or unreadable cache file leaves the manager without a bundle.
    pub fn with_selector(source: S, store: T, selector: R) -> Self {
        let state = match store.load() {
            Ok(bundle) => CacheState::Present(bundle),
            Err(e) => {
                debug!("Starting without cached quotes: {}", e);
                CacheState::Absent
            }
        };

        Self {
            source,
            store,
            selector,
            state,
        }
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// The held bundle, if any
    pub fn bundle(&self) -> Option<&QuoteBundle> {
        match &self.state {
            CacheState::Present(bundle) => Some(bundle),
            CacheState::Absent => None,
        }
    }

    /// Whether new quotes must be requested on `today`
    ///
    /// Only a bundle dated strictly before `today` is stale; a future date
    /// counts as fresh.
    pub fn is_update_required(&self, today: NaiveDate) -> bool {
        match &self.state {
            CacheState::Absent => true,
            CacheState::Present(bundle) => bundle.last_update() < today,
        }
    }

    /// Refreshes the bundle if stale for the local date, then prints it
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<(), CacheError> {
        self.run_on(Local::now().date_naive(), out).await
    }

    /// Same as [`CacheManager::run`] with an explicit current date
    pub async fn run_on<W: Write>(
        &mut self,
        today: NaiveDate,
        out: &mut W,
    ) -> Result<(), CacheError> {
        if self.is_update_required(today) {
            writeln!(out, "{}", REFRESH_NOTICE)?;
            self.refresh(today).await?;
        }

        self.render(out)?;
        Ok(())
    }

    /// Fetches both modes and replaces the bundle only if both succeed
    async fn refresh(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        let today_quotes = self.source.fetch(QuoteMode::Today).await;
        let quotes = self.source.fetch(QuoteMode::Quotes).await;

        let (today_quotes, quotes) = match (today_quotes, quotes) {
            (Ok(today_quotes), Ok(quotes)) => (today_quotes, quotes),
            _ => {
                info!("Refresh failed, keeping cached quotes");
                return Ok(());
            }
        };

        let bundle = match QuoteBundle::new(today, today_quotes, quotes) {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!("Refusing to cache fetched quotes: {}", e);
                return Ok(());
            }
        };

        self.store.save(&bundle)?;
        self.state = CacheState::Present(bundle);
        Ok(())
    }

    /// Prints the quote of the day and one random quote
    ///
    /// Prints nothing when no bundle is held.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let CacheState::Present(bundle) = &self.state else {
            return Ok(());
        };

        let index = self
            .selector
            .choose(bundle.quotes().len())
            .min(bundle.quotes().len() - 1);

        writeln!(out, "TODAY:")?;
        writeln!(out, "{}", bundle.today_quote())?;
        writeln!(out)?;
        writeln!(out, "RANDOM:")?;
        writeln!(out, "{}", bundle.quotes()[index])?;
        Ok(())
    }
}
