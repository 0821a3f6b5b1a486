//! Shared handler state

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::CategoryStore;

/// Read-only state cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<CategoryStore>,
    pub cache_max_age_secs: u64,
}

impl AppState {
    pub fn new(store: CategoryStore, config: &ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            cache_max_age_secs: config.cache_max_age().as_secs(),
        }
    }
}
