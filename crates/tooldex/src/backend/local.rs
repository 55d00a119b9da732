use async_trait::async_trait;
use tokio::sync::RwLock;
use tooldex_core::category::collect_categories;
use tooldex_core::filter::{
    apply_upvote, featured_tools, search_tools, similar_tools, FEATURED_LIMIT, SIMILAR_LIMIT,
};
use tooldex_core::models::{SearchParams, SearchResponse, Tool, UpvoteResponse};

use super::CatalogBackend;
use crate::prelude::*;

/// Catalog held in process memory for the lifetime of a session
///
/// Upvotes live only in memory and are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tools: RwLock<Vec<Tool>>,
}

impl InMemoryBackend {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            tools: RwLock::new(tools),
        }
    }

    /// Replace the whole catalog, as an admin upload does
    pub async fn replace(&self, tools: Vec<Tool>) {
        *self.tools.write().await = tools;
    }

    pub async fn tool_count(&self) -> usize {
        self.tools.read().await.len()
    }
}

#[async_trait]
impl CatalogBackend for InMemoryBackend {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        Ok(search_tools(&self.tools.read().await, params))
    }

    async fn upvote(&self, id: &str) -> Result<UpvoteResponse, Error> {
        let mut tools = self.tools.write().await;
        let upvotes = apply_upvote(&mut tools, id).ok_or_else(|| Error::NotFound(id.to_string()))?;

        Ok(UpvoteResponse {
            tool_id: id.to_string(),
            upvotes,
        })
    }

    async fn categories(&self) -> Result<Vec<String>, Error> {
        Ok(collect_categories(&self.tools.read().await))
    }

    async fn featured(&self) -> Result<Vec<Tool>, Error> {
        Ok(featured_tools(&self.tools.read().await, FEATURED_LIMIT))
    }

    async fn similar(&self, id: &str) -> Result<Vec<Tool>, Error> {
        Ok(similar_tools(&self.tools.read().await, id, SIMILAR_LIMIT))
    }
}
