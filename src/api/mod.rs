// Server API module.
// Provides the HTTP client, payload types, and the session service trait.

pub mod client;
pub mod endpoints;
pub mod service;
pub mod types;

pub use client::ApiClient;
pub use service::SessionApi;
pub use types::*;
