use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::storage::SongStore;

/// The shared application state.
///
/// Cloned into every handler by axum. Holds no per-request data; all song
/// state lives behind `store`.
#[derive(Clone)]
pub struct AppState {
    /// Song persistence. Production uses SQLite; tests swap in memory storage.
    pub store: Arc<dyn SongStore>,
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn SongStore>, config: AppConfig) -> Self {
        Self { store, config: Arc::new(config), metrics: Metrics::new() }
    }
}
