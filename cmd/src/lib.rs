pub mod api;
pub mod client;
pub mod error;
pub mod http;

use std::sync::Arc;

use client::GridApi;

/// Shared by every request; the API client is the only long-lived object.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn GridApi>,
}

impl AppState {
    pub fn new(api: impl GridApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }
}
