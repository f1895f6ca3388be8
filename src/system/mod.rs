//! System utilities and monitoring
//!
//! Prometheus metrics plus the health report served on `/health`.

pub mod metrics;

pub mod health {
    //! Health checks
    use serde::{Deserialize, Serialize};
    use std::time::{Duration, Instant};

    /// Service health status levels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ServiceStatus {
        /// Service is operating normally
        Healthy,
    }

    /// Health report returned by the health endpoint
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct HealthStatus {
        /// Overall service health status
        pub status: ServiceStatus,
        /// Seconds since the checker was created
        pub uptime_secs: u64,
        /// Crate version
        pub version: String,
        /// Number of books currently held
        pub book_count: usize,
    }

    /// Tracks process uptime for health reports
    #[derive(Debug, Clone)]
    pub struct HealthChecker {
        started: Instant,
    }

    impl HealthChecker {
        /// Create a new health checker starting its uptime clock now
        pub fn new() -> Self {
            Self { started: Instant::now() }
        }

        /// Time since start-up
        pub fn uptime(&self) -> Duration {
            self.started.elapsed()
        }

        /// Build a health report for a store holding `book_count` books
        pub fn check(&self, book_count: usize) -> HealthStatus {
            HealthStatus {
                status: ServiceStatus::Healthy,
                uptime_secs: self.uptime().as_secs(),
                version: crate::VERSION.to_string(),
                book_count,
            }
        }
    }

    impl Default for HealthChecker {
        fn default() -> Self {
            Self::new()
        }
    }
}
