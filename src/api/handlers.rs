//! HTTP request handlers for the Bookshelf API

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use super::server::ApiState;
use crate::system::health::HealthStatus;

/// Service description returned by `/info`
#[derive(Serialize)]
pub struct InfoResponse {
    /// Service name
    pub name: String,
    /// Crate version
    pub version: String,
    /// Id assignment policy of the store
    pub id_policy: String,
    /// Registered operations as `name (query|mutation)`
    pub operations: Vec<String>,
}

/// Execute a GraphQL request
pub async fn graphql_handler(
    State(state): State<ApiState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL IDE pointed at the configured endpoint
pub async fn graphiql(State(state): State<ApiState>) -> Response {
    if !state.app.config.server.enable_graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(
        GraphiQLSource::build()
            .endpoint(&state.app.config.server.graphql_path)
            .finish(),
    )
    .into_response()
}

/// Schema definition language text
pub async fn schema_sdl(State(state): State<ApiState>) -> String {
    state.schema.sdl()
}

/// Service landing document
pub async fn root_handler(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "Bookshelf",
        "version": crate::VERSION,
        "status": "operational",
        "endpoints": {
            "graphql": state.app.config.server.graphql_path,
            "schema": "/schema.graphql",
            "health": "/health",
            "info": "/info",
            "metrics": "/metrics"
        }
    }))
}

/// Health check
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthStatus> {
    Json(state.app.health.check(state.app.store.len()))
}

/// Service info and registered operations
pub async fn system_info(State(state): State<ApiState>) -> Json<InfoResponse> {
    let operations = state
        .app
        .resolver
        .operations()
        .into_iter()
        .map(|(name, kind)| format!("{} ({})", name, kind.as_str()))
        .collect();

    Json(InfoResponse {
        name: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        id_policy: state.app.store.policy().to_string(),
        operations,
    })
}

/// Prometheus metrics in text exposition format
pub async fn metrics_handler(State(state): State<ApiState>) -> Response {
    if !state.app.config.metrics.enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    let metrics = &state.app.metrics;
    metrics.books_stored.set(state.app.store.len() as i64);

    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.collect(),
    )
        .into_response()
}
