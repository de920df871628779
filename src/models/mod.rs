//! Core data models for cards, printings and the panel display state.

mod card;
mod view;

pub use card::{Card, CardBuilder, ImageUris, PrintList};
pub use view::PanelView;
