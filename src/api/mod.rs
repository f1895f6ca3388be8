//! # API Module
//!
//! GraphQL schema and the HTTP surface serving it.
//!
//! ## Endpoints Overview
//!
//! - `POST /graphql` - Execute a GraphQL query or mutation
//! - `GET /graphql` - GraphiQL IDE (when enabled)
//! - `GET /schema.graphql` - Schema definition language text
//! - `GET /health` - Health check
//! - `GET /info` - Service info and registered operations
//! - `GET /metrics` - Prometheus metrics (when enabled)

pub mod handlers;
pub mod schema;
pub mod server;

// Re-export commonly used items
pub use schema::{build_schema, schema_sdl, BookSchema, MutationRoot, QueryRoot};
pub use server::{create_app, start_server, ApiState};
