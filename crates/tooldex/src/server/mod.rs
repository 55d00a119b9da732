//! REST API over an in-memory catalog
//!
//! Routes mirror the remote catalog contract consumed by
//! [`crate::backend::HttpBackend`], so the CLI can point `--api-url` at a
//! running `tooldex serve`.

pub mod cli;
mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tooldex_core::ingest::IngestOptions;

use crate::backend::{self, InMemoryBackend};
use crate::prelude::{eprintln, *};

/// Shared state handed to every route
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<InMemoryBackend>,
    /// Options applied to datasets posted to the import route
    pub ingest_options: IngestOptions,
}

impl AppState {
    pub fn new(catalog: Arc<InMemoryBackend>) -> Self {
        Self {
            catalog,
            ingest_options: IngestOptions::default(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/categories", get(routes::categories))
        .route("/api/tools/search", get(routes::search))
        .route("/api/tools/featured", get(routes::featured))
        .route("/api/tools/import", post(routes::import))
        .route("/api/tools/{id}/similar", get(routes::similar))
        .route("/api/tools/{id}/upvote", post(routes::upvote))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on an already bound listener until the process exits
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))
}

pub async fn run(options: cli::ServeOptions, global: crate::Global) -> Result<()> {
    let tools = backend::load_dataset(&global).await?;
    let state = AppState {
        catalog: Arc::new(InMemoryBackend::new(tools)),
        ingest_options: IngestOptions {
            add_mock_data: global.mock,
        },
    };

    let addr = format!("{}:{}", options.host, options.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Catalog API listening on http://{addr}");
    if global.verbose {
        eprintln!("Catalog API listening on http://{}", addr);
        eprintln!("Serving {} tools", state.catalog.tool_count().await);
        eprintln!("Search endpoint: http://{}/api/tools/search", addr);
    }

    serve(listener, state).await
}
