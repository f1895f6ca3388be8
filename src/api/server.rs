//! HTTP server implementation for the Bookshelf API

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::schema::{build_schema, BookSchema};
use crate::core::{AppState, Error, Result};

/// State shared by every handler
#[derive(Clone)]
pub struct ApiState {
    /// Application services
    pub app: AppState,
    /// Executable GraphQL schema bound to `app.resolver`
    pub schema: BookSchema,
}

/// Creates the main application router with all routes and middleware
pub fn create_app(app: AppState) -> Router {
    let schema = build_schema(app.resolver.clone());
    let graphql_path = app.config.server.graphql_path.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any);

    Router::new()
        .route("/", get(handlers::root_handler))

        // GraphQL routes
        .route(
            &graphql_path,
            get(handlers::graphiql).post(handlers::graphql_handler),
        )
        .route("/schema.graphql", get(handlers::schema_sdl))

        // System routes
        .route("/health", get(handlers::health_check))
        .route("/info", get(handlers::system_info))
        .route("/metrics", get(handlers::metrics_handler))

        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
        .with_state(ApiState { app, schema })
}

/// Start the HTTP server and run until `shutdown` resolves
pub async fn start_server<F>(addr: SocketAddr, app: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let graphql_path = app.config.server.graphql_path.clone();
    let router = create_app(app);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Server ready at: http://{}{}", local_addr, graphql_path);
    tracing::info!("Health check available at http://{}/health", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::server(format!("HTTP server failed: {}", e)))?;

    Ok(())
}
