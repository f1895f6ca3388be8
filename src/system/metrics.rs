//! Metrics collection for the Bookshelf service
//!
//! Each application instance owns a [`Metrics`] on its own Prometheus
//! registry, so two stores in one process never report each other's numbers.

use crate::core::Result;
use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, register_int_gauge_with_registry, Histogram,
    IntCounter, IntCounterVec, IntGauge, Registry,
};
use std::time::Instant;

/// Counters and gauges for catalogue operations
pub struct Metrics {
    registry: Registry,
    /// Operations dispatched, labelled by operation name
    pub operations: IntCounterVec,
    /// Total number of books added since start-up
    pub books_added: IntCounter,
    /// Number of books currently held
    pub books_stored: IntGauge,
    /// Histogram of operation durations in seconds
    pub operation_duration: Histogram,
}

impl Metrics {
    /// Create metrics on a fresh registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Create metrics registered with the given registry
    pub fn with_registry(registry: Registry) -> Result<Self> {
        Ok(Self {
            operations: register_int_counter_vec_with_registry!(
                "bookshelf_operations_total",
                "Total number of operations dispatched",
                &["operation"],
                registry
            )?,
            books_added: register_int_counter_with_registry!(
                "bookshelf_books_added_total",
                "Total number of books added",
                registry
            )?,
            books_stored: register_int_gauge_with_registry!(
                "bookshelf_books_stored",
                "Number of books currently held",
                registry
            )?,
            operation_duration: register_histogram_with_registry!(
                "bookshelf_operation_duration_seconds",
                "Duration of catalogue operations in seconds",
                vec![0.00001, 0.0001, 0.001, 0.01, 0.1],
                registry
            )?,
            registry,
        })
    }

    /// Record one dispatch of the named operation
    pub fn record_operation(&self, operation: &str) {
        self.operations.with_label_values(&[operation]).inc();
    }

    /// Start timing an operation
    pub fn start_timer(&self) -> Timer {
        Timer::start(self.operation_duration.clone())
    }

    /// Collect and return all metrics as a Prometheus-formatted string
    pub fn collect(&self) -> String {
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families).unwrap_or_default()
    }
}

/// Timer for measuring operation duration with automatic histogram recording
pub struct Timer {
    start: Instant,
    histogram: Histogram,
}

impl Timer {
    /// Start a new timer
    pub fn start(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    /// Record the elapsed time and consume the timer
    pub fn finish(self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_record() {
        let metrics = Metrics::new().unwrap();

        metrics.record_operation("books");
        metrics.record_operation("books");
        metrics.books_added.inc();
        metrics.books_stored.set(3);
        metrics.start_timer().finish();

        assert_eq!(metrics.operations.with_label_values(&["books"]).get(), 2);
        assert_eq!(metrics.books_added.get(), 1);
        assert_eq!(metrics.books_stored.get(), 3);
        assert_eq!(metrics.operation_duration.get_sample_count(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();
        let _first = Metrics::with_registry(registry.clone()).unwrap();
        assert!(Metrics::with_registry(registry).is_err());
    }

    #[test]
    fn test_instances_do_not_share_values() {
        let first = Metrics::new().unwrap();
        let second = Metrics::new().unwrap();

        first.books_stored.set(7);
        second.books_stored.set(2);
        first.record_operation("book");

        assert!(first.collect().contains("bookshelf_books_stored 7"));
        assert!(second.collect().contains("bookshelf_books_stored 2"));
        assert!(!second.collect().contains("bookshelf_operations_total"));
    }
}
