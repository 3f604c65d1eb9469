//! Cache module for the daily quote bundle
//!
//! `store` persists the bundle as a JSON file; `manager` decides when the
//! bundle is stale, refreshes it from the API and prints it. A failed refresh
//! leaves the previous bundle in place so stale quotes are still shown.

mod manager;
mod store;

pub use manager::{
    CacheError, CacheManager, CacheState, QuoteSelector, RandomSelector, REFRESH_NOTICE,
};
pub use store::{app_root, default_cache_file, BundleStore, QuoteStore, StoreError};
