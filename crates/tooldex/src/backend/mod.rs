//! Catalog data sources
//!
//! The store and the CLI talk to a [`CatalogBackend`] and never care whether
//! the catalog lives behind a remote API or in this process.

use std::sync::Arc;

use async_trait::async_trait;
use tooldex_core::ingest::{ingest_json, IngestOptions};
use tooldex_core::models::{SearchParams, SearchResponse, Tool, UpvoteResponse};

use crate::prelude::{eprintln, *};

pub mod http;
pub mod local;

pub use http::HttpBackend;
pub use local::InMemoryBackend;

/// Remote-shaped catalog operations
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Filtered, sorted, paginated tool listing
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error>;

    /// Increment a tool's upvotes, returning the authoritative count
    async fn upvote(&self, id: &str) -> Result<UpvoteResponse, Error>;

    async fn categories(&self) -> Result<Vec<String>, Error>;

    async fn featured(&self) -> Result<Vec<Tool>, Error>;

    async fn similar(&self, id: &str) -> Result<Vec<Tool>, Error>;
}

/// Load and ingest the raw dataset file named on the command line
pub async fn load_dataset(global: &crate::Global) -> Result<Vec<Tool>> {
    let text = tokio::fs::read_to_string(&global.dataset)
        .await
        .with_context(|| f!("Failed to read dataset {}", global.dataset.display()))?;

    let options = IngestOptions {
        add_mock_data: global.mock,
    };
    let tools = ingest_json(&text, options)
        .map_err(|e| eyre!("{}: {}", global.dataset.display(), e))?;

    if global.verbose {
        eprintln!(
            "Loaded {} tools from {}",
            tools.len(),
            global.dataset.display()
        );
    }

    Ok(tools)
}

/// Pick the backend configured by the global flags
///
/// An API URL selects the HTTP client, otherwise the dataset file is ingested
/// into an in-memory catalog.
pub async fn from_global(global: &crate::Global) -> Result<Arc<dyn CatalogBackend>> {
    match &global.api_url {
        Some(base_url) => {
            if global.verbose {
                eprintln!("Using catalog API at {}", base_url);
            }
            Ok(Arc::new(HttpBackend::new(base_url.clone())))
        }
        None => {
            let tools = load_dataset(global).await?;
            Ok(Arc::new(InMemoryBackend::new(tools)))
        }
    }
}
