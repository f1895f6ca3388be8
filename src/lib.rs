//! Bookshelf - An In-Memory Book Catalogue over GraphQL
//!
//! Bookshelf keeps an ordered, in-memory collection of books and exposes it
//! through the `books` and `book(id)` queries and the `addBook` mutation.
//! The store and the resolver routing table are plain Rust and can be used
//! without the HTTP server; the `api` module wires them into `async-graphql`
//! and `axum`.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod storage;
pub mod resolver;
pub mod api;
pub mod system;

// Re-export commonly used items for convenience
pub use crate::core::{AppState, Book, BookId, CliOverrides, Config, Error, IdPolicy, Result};
pub use resolver::Resolver;
pub use storage::BookStore;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize tracing
///
/// The configured level is the default filter; `RUST_LOG` takes precedence
/// when set.
pub fn init_logging(logging: &crate::core::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match logging.format.as_str() {
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };
    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
