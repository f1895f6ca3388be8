//! Application Factory
//!
//! Builds an [`AppState`] from configuration.

use std::sync::Arc;
use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::BookStore;
use crate::system::metrics::Metrics;

/// Create AppState based on configuration
pub fn create_app_state(config: Config) -> Result<AppState> {
    let policy = config.store.id_policy;
    let seed = config.seed_books();
    tracing::info!("Initializing book store with {} seed records, id policy {}", seed.len(), policy);

    let store = Arc::new(BookStore::with_seed(seed, policy));
    let metrics = Arc::new(Metrics::new()?);
    metrics.books_stored.set(store.len() as i64);

    let app_state = AppState::new(store, metrics, config);
    tracing::info!("AppState created successfully");
    Ok(app_state)
}
