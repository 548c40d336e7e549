pub mod config;
pub mod error;
pub mod handlers;
pub mod report;
pub mod services;
pub mod startup;

use services::RelayClient;
use std::sync::Arc;

/// Shared application state containing the relay client
#[derive(Clone)]
pub struct AppState {
    pub relay_client: Arc<RelayClient>,
}

impl AppState {
    pub fn new(relay_client: Arc<RelayClient>) -> Self {
        Self { relay_client }
    }
}
