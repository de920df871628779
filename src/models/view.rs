//! Display snapshot of the search panel.

use serde::Serialize;

use super::{Card, PrintList};

/// Everything the panel currently displays
///
/// `card` and `prints` are only ever replaced together. `error` and `card` are
/// never set at the same time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelView {
    /// Raw text of the input field
    pub query: String,

    /// Matched card, if the last sequence succeeded
    pub card: Option<Card>,

    /// Printings of the matched card
    pub prints: PrintList,

    /// User-visible error message
    pub error: Option<String>,

    /// Number of fetch sequences currently running
    #[serde(skip)]
    pub in_flight: usize,
}

impl PanelView {
    /// Whether a fetch sequence is running
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Whether a card is displayed
    pub fn has_result(&self) -> bool {
        self.card.is_some()
    }

    /// Replace card and printings in one step
    pub(crate) fn show_result(&mut self, card: Card, prints: PrintList) {
        self.error = None;
        self.card = Some(card);
        self.prints = prints;
    }

    /// Drop card and printings together
    pub(crate) fn clear_result(&mut self) {
        self.card = None;
        self.prints.clear();
    }

    /// Show an error, clearing any displayed result
    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.clear_result();
        self.error = Some(message.into());
    }
}
