//! The search panel: debounced input driving a card lookup.
//!
//! [`SearchPanel`] owns the text of the input field and everything derived
//! from it. Each call to [`SearchPanel::set_query`] updates the query right
//! away; once the input has been quiet for the configured period a lookup is
//! started for queries long enough to search. Shorter queries clear the
//! displayed card and printings immediately.
//!
//! Every edit stamps a new generation. A lookup that completes after a newer
//! edit is dropped, so the view only ever reflects the latest query. In-flight
//! requests are never aborted; their results are just ignored.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use card_lookup::config::SearchConfig;
//! use card_lookup::panel::SearchPanel;
//! use card_lookup::sources::ScryfallSource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(ScryfallSource::new()?);
//! let mut panel = SearchPanel::new(source, &SearchConfig::default());
//!
//! panel.set_query("lightning bolt");
//! panel.settle().await;
//!
//! let view = panel.view();
//! println!("{:?} ({} printings)", view.card.map(|c| c.name), view.prints.len());
//! # Ok(())
//! # }
//! ```

mod debounce;
mod lookup;

pub use debounce::Debouncer;
pub use lookup::{fetch_card_with_prints, LookupError};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::SearchConfig;
use crate::models::PanelView;
use crate::sources::CardSource;

/// Single search component: input, debounce, lookup, display state.
#[derive(Debug)]
pub struct SearchPanel {
    source: Arc<dyn CardSource>,
    min_query_chars: usize,
    view: Arc<watch::Sender<PanelView>>,
    generation: Arc<AtomicU64>,
    debouncer: Debouncer,
}

impl SearchPanel {
    /// Create a panel with an empty query.
    pub fn new(source: Arc<dyn CardSource>, settings: &SearchConfig) -> Self {
        let (view, _) = watch::channel(PanelView::default());
        Self {
            source,
            min_query_chars: settings.min_query_chars,
            view: Arc::new(view),
            generation: Arc::new(AtomicU64::new(0)),
            debouncer: Debouncer::new(settings.quiet_period()),
        }
    }

    /// Current display state
    pub fn view(&self) -> PanelView {
        self.view.borrow().clone()
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.view.subscribe()
    }

    /// Whether `query` is long enough to be looked up
    pub fn is_searchable(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_chars
    }

    /// Replace the text of the input field.
    ///
    /// Setting the same text again is a no-op. Must be called from within a
    /// tokio runtime.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.view.borrow().query == query {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let searchable = self.is_searchable(&query);

        self.view.send_modify(|view| {
            view.query = query.clone();
            if !searchable {
                view.clear_result();
            }
        });

        if !searchable {
            tracing::debug!(%query, "query too short, cleared result");
            self.debouncer.cancel();
            return;
        }

        let task = LookupTask {
            source: Arc::clone(&self.source),
            view: Arc::clone(&self.view),
            latest: Arc::clone(&self.generation),
            generation,
            query,
        };

        self.debouncer.schedule(move || {
            let started = task.begin();
            async move {
                if started {
                    task.run().await;
                }
            }
        });
    }

    /// Wait until no countdown is pending and no lookup is running
    pub async fn settle(&mut self) {
        self.debouncer.wait().await;
        let mut rx = self.view.subscribe();
        let _ = rx.wait_for(|view| !view.is_loading()).await;
    }

    /// Cancel the pending countdown. Lookups already running are left alone.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
    }
}

/// One scheduled lookup, stamped with the generation it was issued for
struct LookupTask {
    source: Arc<dyn CardSource>,
    view: Arc<watch::Sender<PanelView>>,
    latest: Arc<AtomicU64>,
    generation: u64,
    query: String,
}

impl LookupTask {
    fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Clear the error and mark the lookup as running. Returns false when a
    /// newer edit already superseded this lookup.
    fn begin(&self) -> bool {
        if !self.is_current() {
            return false;
        }

        self.view.send_modify(|view| {
            view.error = None;
            view.in_flight += 1;
        });
        true
    }

    async fn run(self) {
        tracing::debug!(query = %self.query, generation = self.generation, "lookup started");

        let result = fetch_card_with_prints(self.source.as_ref(), &self.query).await;
        let current = self.is_current();

        match (&result, current) {
            (_, false) => {
                tracing::debug!(query = %self.query, "discarding superseded lookup")
            }
            (Ok((card, prints)), true) => {
                tracing::info!(query = %self.query, card = %card.name, printings = prints.len(), "card found")
            }
            (Err(e), true) => {
                tracing::warn!(query = %self.query, cause = %e.cause(), "{}", e)
            }
        }

        self.view.send_modify(|view| {
            view.in_flight = view.in_flight.saturating_sub(1);
            if !current {
                return;
            }
            match result {
                Ok((card, prints)) => view.show_result(card, prints),
                Err(e) => view.show_error(e.to_string()),
            }
        });
    }
}
