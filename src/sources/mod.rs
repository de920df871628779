//! Card database sources with a trait-based seam.
//!
//! This module defines the [`CardSource`] trait the search panel talks to. The
//! production implementation is [`ScryfallSource`], which speaks to the public
//! Scryfall REST API; [`MockSource`] serves scripted replies for tests.
//!
//! A source only has to answer two questions:
//!
//! 1. Which card best matches this (possibly misspelled) name?
//! 2. What are all printings listed at this URI?
//!
//! Sources report failures as [`SourceError`] and leave it to the caller to
//! decide which user-facing message a failure turns into.

mod mock;
mod scryfall;

pub use mock::{make_card, MockReply, MockSource};
pub use scryfall::{ScryfallSource, SCRYFALL_API_BASE};

use crate::models::{Card, PrintList};
use async_trait::async_trait;

/// The CardSource trait defines the interface for card database backends.
#[async_trait]
pub trait CardSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "scryfall")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up the single card whose name best matches `query`
    async fn named_fuzzy(&self, query: &str) -> Result<Card, SourceError>;

    /// Fetch every printing listed at `prints_search_uri`
    async fn prints(&self, prints_search_uri: &str) -> Result<PrintList, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The server answered with a non-success status
    #[error("API returned status {status}: {details}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error details reported by the API, or the status reason
        details: String,
    },

    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    /// Whether the request was rejected rather than failing in transit
    ///
    /// Rejections are non-success statuses and requests that could not be
    /// formed at all. Everything else is an unexpected failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SourceError::Status { .. } | SourceError::InvalidRequest(_)
        )
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let status = SourceError::Status {
            status: 404,
            details: "No cards found".to_string(),
        };
        assert!(status.is_rejection());
        assert!(SourceError::InvalidRequest("empty".to_string()).is_rejection());
        assert!(!SourceError::Network("refused".to_string()).is_rejection());
        assert!(!SourceError::Parse("eof".to_string()).is_rejection());
        assert_eq!(status.to_string(), "API returned status 404: No cards found");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Card>("{").unwrap_err();
        let err: SourceError = err.into();
        assert!(matches!(err, SourceError::Parse(msg) if msg.starts_with("JSON:")));
    }
}
