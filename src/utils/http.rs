//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::sources::SourceError;

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with sensible defaults
///
/// No request timeout is applied unless one is configured; requests resolve or
/// fail according to the transport's own behavior.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client from API configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, SourceError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        Self::build(user_agent, config.timeout())
    }

    fn build(user_agent: &str, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get a shared handle to the underlying client
    pub fn shared(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("card-lookup/"));
    }

    #[test]
    fn test_build_with_timeout() {
        let config = ApiConfig {
            timeout_secs: Some(3),
            user_agent: Some("tests/1.0".to_string()),
            ..Default::default()
        };
        let http = HttpClient::from_config(&config).unwrap();
        assert!(Arc::ptr_eq(&http.shared(), &http.clone().shared()));
    }
}
