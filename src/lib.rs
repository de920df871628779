//! # Card Lookup
//!
//! A debounced Magic: The Gathering card search backed by the Scryfall API.
//! Typing into the panel looks up the best fuzzy name match and lists every
//! printing of that card.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Card, PrintList, PanelView)
//! - [`sources`]: Card database backends behind the [`CardSource`] trait
//! - [`panel`]: The [`SearchPanel`] component, its debouncer and lookup sequence
//! - [`ui`]: Terminal rendering of the panel
//! - [`utils`]: HTTP client construction
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod panel;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{Card, PanelView};
pub use panel::SearchPanel;
pub use sources::{CardSource, ScryfallSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
