//! Core data models for Zen Quotes CLI
//!
//! This module contains the quote types shared by the remote client, the
//! on-disk store and the cache manager.

pub mod zenquotes;

pub use zenquotes::{FetchError, QuoteSource, ZenQuotesClient};

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single quote with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself
    #[serde(rename = "quote")]
    pub text: String,
    /// Who said it
    pub author: String,
}

impl Quote {
    /// Creates a new Quote from its text and author
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.text, self.author)
    }
}

/// Which Zen Quotes endpoint to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// The quote of the day (a single-element list)
    Today,
    /// A batch of random quotes
    Quotes,
}

impl QuoteMode {
    /// Endpoint suffix appended to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            QuoteMode::Today => "today",
            QuoteMode::Quotes => "quotes",
        }
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Reason a bundle could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BundleError {
    /// The `today` list has no quotes
    #[error("today list is empty")]
    EmptyToday,
    /// The `quotes` list has no quotes
    #[error("quotes list is empty")]
    EmptyQuotes,
}

/// Quotes cached for one calendar day
///
/// Field order is the on-disk key order: `last_update`, `today`, `quotes`.
/// Both lists are non-empty, whether built with [`QuoteBundle::new`] or
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BundleFields")]
pub struct QuoteBundle {
    last_update: NaiveDate,
    today: Vec<Quote>,
    quotes: Vec<Quote>,
}

/// Unchecked shape of a bundle as read from disk
#[derive(Deserialize)]
struct BundleFields {
    last_update: NaiveDate,
    today: Vec<Quote>,
    quotes: Vec<Quote>,
}

impl TryFrom<BundleFields> for QuoteBundle {
    type Error = BundleError;

    fn try_from(fields: BundleFields) -> Result<Self, Self::Error> {
        QuoteBundle::new(fields.last_update, fields.today, fields.quotes)
    }
}

impl QuoteBundle {
    /// Builds a bundle, rejecting empty quote lists
    pub fn new(
        last_update: NaiveDate,
        today: Vec<Quote>,
        quotes: Vec<Quote>,
    ) -> Result<Self, BundleError> {
        if today.is_empty() {
            return Err(BundleError::EmptyToday);
        }
        if quotes.is_empty() {
            return Err(BundleError::EmptyQuotes);
        }
        Ok(Self {
            last_update,
            today,
            quotes,
        })
    }

    /// Day the quotes were fetched
    pub fn last_update(&self) -> NaiveDate {
        self.last_update
    }

    /// Quote of the day list, as returned by the API
    pub fn today(&self) -> &[Quote] {
        &self.today
    }

    /// Pool for the random pick
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// The fixed quote of the day
    pub fn today_quote(&self) -> &Quote {
        &self.today[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_quote_display() {
        let quote = Quote::new(
            "A crisis is an opportunity riding the dangerous wind.",
            "Chinese Proverb",
        );
        assert_eq!(
            quote.to_string(),
            "A crisis is an opportunity riding the dangerous wind. - Chinese Proverb"
        );
    }

    #[test]
    fn test_quote_equality_by_value() {
        assert_eq!(Quote::new("a", "b"), Quote::new("a", "b"));
        assert_ne!(Quote::new("a", "b"), Quote::new("a", "c"));
    }

    #[test]
    fn test_quote_serializes_with_quote_key() {
        let json = serde_json::to_string(&Quote::new("text", "someone")).unwrap();
        assert_eq!(json, r#"{"quote":"text","author":"someone"}"#);
    }

    #[test]
    fn test_quote_mode_endpoints() {
        assert_eq!(QuoteMode::Today.endpoint(), "today");
        assert_eq!(QuoteMode::Quotes.endpoint(), "quotes");
        assert_eq!(QuoteMode::Quotes.to_string(), "quotes");
    }

    #[test]
    fn test_bundle_new_rejects_empty_today() {
        let result = QuoteBundle::new(sample_date(), vec![], vec![Quote::new("a", "b")]);
        assert_eq!(result.unwrap_err(), BundleError::EmptyToday);
    }

    #[test]
    fn test_bundle_new_rejects_empty_quotes() {
        let result = QuoteBundle::new(sample_date(), vec![Quote::new("a", "b")], vec![]);
        assert_eq!(result.unwrap_err(), BundleError::EmptyQuotes);
    }

    #[test]
    fn test_bundle_today_quote_is_first() {
        let bundle = QuoteBundle::new(
            sample_date(),
            vec![Quote::new("first", "x"), Quote::new("second", "y")],
            vec![Quote::new("a", "b")],
        )
        .unwrap();
        assert_eq!(bundle.today_quote(), &Quote::new("first", "x"));
    }

    #[test]
    fn test_bundle_error_messages() {
        assert_eq!(BundleError::EmptyToday.to_string(), "today list is empty");
        assert_eq!(BundleError::EmptyQuotes.to_string(), "quotes list is empty");
    }

    #[test]
    fn test_bundle_accessors() {
        let bundle = QuoteBundle::new(
            sample_date(),
            vec![Quote::new("a", "b")],
            vec![Quote::new("c", "d"), Quote::new("e", "f")],
        )
        .unwrap();
        assert_eq!(bundle.last_update(), sample_date());
        assert_eq!(bundle.today().to_vec(), vec![Quote::new("a", "b")]);
        assert_eq!(bundle.quotes().len(), 2);
    }

    #[test]
    fn test_bundle_deserialize_rejects_empty_today() {
        let json = r#"{"last_update": "2024-07-15", "today": [], "quotes": [{"quote": "a", "author": "b"}]}"#;
        let err = serde_json::from_str::<QuoteBundle>(json).unwrap_err();
        assert!(err.to_string().contains("today list is empty"));
    }

    #[test]
    fn test_bundle_deserialize_rejects_empty_quotes() {
        let json = r#"{"last_update": "2024-07-15", "today": [{"quote": "a", "author": "b"}], "quotes": []}"#;
        assert!(serde_json::from_str::<QuoteBundle>(json).is_err());
    }

    #[test]
    fn test_bundle_deserialize_valid() {
        let json = r#"{"last_update": "2024-07-15", "today": [{"quote": "a", "author": "b"}], "quotes": [{"quote": "c", "author": "d"}]}"#;
        let bundle: QuoteBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.today_quote(), &Quote::new("a", "b"));
        assert_eq!(bundle.quotes().to_vec(), vec![Quote::new("c", "d")]);
    }

    #[test]
    fn test_bundle_date_serializes_as_iso() {
        let bundle = QuoteBundle::new(
            sample_date(),
            vec![Quote::new("a", "b")],
            vec![Quote::new("c", "d")],
        )
        .unwrap();
        let json = serde_json::to_string(&bundle).unwrap();
        assert!(json.starts_with(r#"{"last_update":"2024-07-15","today":"#));
    }
}
