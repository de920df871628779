//! Utility modules shared by sources and the CLI.
//!
//! - [`HttpClient`]: reqwest client construction from [`ApiConfig`](crate::config::ApiConfig)

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
