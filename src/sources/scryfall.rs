//! Scryfall card database source.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::models::{Card, PrintList};
use crate::sources::{CardSource, SourceError};
use crate::utils::HttpClient;

/// Default Scryfall API endpoint
pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";

/// Scryfall card source
///
/// Uses the Scryfall REST API. Name lookups go through `/cards/named?fuzzy=`;
/// printings are fetched from the absolute URI carried by each card.
#[derive(Debug, Clone)]
pub struct ScryfallSource {
    client: Arc<Client>,
    base_url: String,
}

impl ScryfallSource {
    /// Create a source against the public API with default client settings
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&ApiConfig::default())
    }

    /// Create a source from API configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, SourceError> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_client(http.shared(), &config.base_url))
    }

    /// Create a source using an existing client and base URL
    pub fn with_client(client: Arc<Client>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the fuzzy name lookup URL
    fn named_url(&self, query: &str) -> String {
        format!(
            "{}/cards/named?fuzzy={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    async fn get(&self, url: &str) -> Result<Response, SourceError> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let details = match response.json::<ScryfallErrorBody>().await {
            Ok(body) => body.details,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        };

        tracing::debug!(status = status.as_u16(), %details, "Scryfall request rejected");

        Err(SourceError::Status {
            status: status.as_u16(),
            details,
        })
    }
}

#[async_trait]
impl CardSource for ScryfallSource {
    fn id(&self) -> &str {
        "scryfall"
    }

    fn name(&self) -> &str {
        "Scryfall"
    }

    async fn named_fuzzy(&self, query: &str) -> Result<Card, SourceError> {
        if query.is_empty() {
            return Err(SourceError::InvalidRequest(
                "card name must not be empty".to_string(),
            ));
        }

        let response = self.get(&self.named_url(query)).await?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn prints(&self, prints_search_uri: &str) -> Result<PrintList, SourceError> {
        if prints_search_uri.is_empty() {
            return Err(SourceError::InvalidRequest(
                "card has no prints_search_uri".to_string(),
            ));
        }

        let response = self.get(prints_search_uri).await?;
        let body = response.text().await?;

        let list: CardList = serde_json::from_str(&body)?;
        Ok(list.data)
    }
}

// ===== Scryfall API Types =====

#[derive(Debug, Deserialize)]
struct CardList {
    data: Vec<Card>,
}

#[derive(Debug, Deserialize)]
struct ScryfallErrorBody {
    details: String,
}
