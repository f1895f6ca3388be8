//! Application State Management
//!
//! The central AppState holds the configured store, the resolver bound to it,
//! its metrics and the configuration. Each AppState owns its own store and
//! metrics registry, so several servers or test harnesses can run side by
//! side without sharing books or counters.

use std::sync::Arc;
use crate::core::config::Config;
use crate::resolver::Resolver;
use crate::storage::SharedStore;
use crate::system::metrics::Metrics;
use crate::system::health::HealthChecker;

/// Central application state holding all services and components
#[derive(Clone)]
pub struct AppState {
    /// Book store owned by this instance
    pub store: SharedStore,

    /// Operation routing table bound to `store`
    pub resolver: Resolver,

    /// Metrics for this instance, on their own registry
    pub metrics: Arc<Metrics>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Uptime tracking for health reports
    pub health: HealthChecker,
}

impl AppState {
    /// Create a new AppState around an existing store and metrics
    pub fn new(store: SharedStore, metrics: Arc<Metrics>, config: Config) -> Self {
        Self {
            resolver: Resolver::new(store.clone(), metrics.clone()),
            store,
            metrics,
            config: Arc::new(config),
            health: HealthChecker::new(),
        }
    }
}
