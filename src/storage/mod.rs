//! Storage layer
//!
//! The whole catalogue lives in memory for the lifetime of its owning store.

pub mod book_store;

// Re-export main storage types
pub use book_store::BookStore;

/// Store shared between the resolver layer and the HTTP server
pub type SharedStore = std::sync::Arc<BookStore>;
