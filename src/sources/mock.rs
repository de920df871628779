//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{Card, PrintList};
use crate::sources::{CardSource, SourceError};

/// A scripted reply, optionally delayed
#[derive(Debug, Clone)]
pub struct MockReply<T> {
    result: Result<T, SourceError>,
    delay: Option<Duration>,
}

impl<T> MockReply<T> {
    /// Reply successfully
    pub fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            delay: None,
        }
    }

    /// Reply with an error
    pub fn err(error: SourceError) -> Self {
        Self {
            result: Err(error),
            delay: None,
        }
    }

    /// Reply with a non-success HTTP status
    pub fn status(status: u16) -> Self {
        Self::err(SourceError::Status {
            status,
            details: format!("status {}", status),
        })
    }

    /// Wait before replying
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A mock source that returns predefined replies and records every call.
///
/// Unscripted name lookups answer 404; unscripted printings URIs answer an
/// empty list.
#[derive(Debug, Default)]
pub struct MockSource {
    named: Mutex<HashMap<String, MockReply<Card>>>,
    prints: Mutex<HashMap<String, MockReply<PrintList>>>,
    named_calls: Mutex<Vec<String>>,
    prints_calls: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for a name lookup.
    pub fn on_named(&self, query: &str, reply: MockReply<Card>) {
        let mut guard = self.named.lock().unwrap();
        guard.insert(query.to_string(), reply);
    }

    /// Script the reply for a printings URI.
    pub fn on_prints(&self, uri: &str, reply: MockReply<PrintList>) {
        let mut guard = self.prints.lock().unwrap();
        guard.insert(uri.to_string(), reply);
    }

    /// Queries passed to `named_fuzzy`, in call order.
    pub fn named_calls(&self) -> Vec<String> {
        self.named_calls.lock().unwrap().clone()
    }

    /// URIs passed to `prints`, in call order.
    pub fn prints_calls(&self) -> Vec<String> {
        self.prints_calls.lock().unwrap().clone()
    }

    /// Total number of requests issued.
    pub fn request_count(&self) -> usize {
        self.named_calls.lock().unwrap().len() + self.prints_calls.lock().unwrap().len()
    }

    async fn reply<T: Clone>(reply: Option<MockReply<T>>, fallback: Result<T, SourceError>) -> Result<T, SourceError> {
        match reply {
            Some(reply) => {
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                reply.result
            }
            None => fallback,
        }
    }
}

#[async_trait]
impl CardSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn named_fuzzy(&self, query: &str) -> Result<Card, SourceError> {
        self.named_calls.lock().unwrap().push(query.to_string());
        let reply = self.named.lock().unwrap().get(query).cloned();
        Self::reply(
            reply,
            Err(SourceError::Status {
                status: 404,
                details: format!("No card matched {}", query),
            }),
        )
        .await
    }

    async fn prints(&self, prints_search_uri: &str) -> Result<PrintList, SourceError> {
        self.prints_calls
            .lock()
            .unwrap()
            .push(prints_search_uri.to_string());
        let reply = self.prints.lock().unwrap().get(prints_search_uri).cloned();
        Self::reply(reply, Ok(Vec::new())).await
    }
}

/// Helper function to create a mock card for testing.
///
/// The card's printings URI is `mock://prints/{id}`.
pub fn make_card(id: &str, name: &str, set_name: &str) -> Card {
    crate::models::CardBuilder::new(id, name, set_name)
        .images(format!("https://img.test/{}", id))
        .prints_search_uri(format!("mock://prints/{}", id))
        .build()
}
