//! Core system types and foundations
//!
//! Domain types, error handling, configuration and application state.

pub mod types;
pub mod error;
pub mod config;
pub mod app_state;
pub mod factory;

// Re-export commonly used items
pub use types::{Book, BookId, IdPolicy};
pub use error::{Error, ResolverError, Result, StoreError};
pub use config::{CliOverrides, Config};
pub use app_state::AppState;
pub use factory::create_app_state;
