//! Error types and handling for the Bookshelf service
//!
//! A lookup that finds nothing is not an error anywhere in this crate; these
//! types only cover start-up failures and calls that bypass the GraphQL schema.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Bookshelf service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resolver dispatch errors
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Errors raised by the operation routing table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// No handler registered under this name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Arguments did not match the operation's shape
    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// Name of the operation being dispatched
        operation: String,
        /// What was wrong with the arguments
        reason: String,
    },

    /// Result could not be encoded as JSON
    #[error("Failed to encode result: {0}")]
    Encoding(String),

    /// The store refused the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Book store errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No unused id is left for a new book
    #[error("Book id space exhausted")]
    IdSpaceExhausted,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a server error
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }
}

impl ResolverError {
    /// Create an invalid arguments error
    pub fn invalid_arguments(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
