use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tooldex_core::models::{ApiResponse, SearchParams, SearchResponse, Tool, UpvoteResponse};

use super::CatalogBackend;
use crate::prelude::*;

/// Client for a remote catalog API speaking the `ApiResponse` envelope
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check the status and unwrap the envelope of an API response
    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| "Not found".to_string());
            return Err(Error::NotFound(message));
        }

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(Error::InvalidFormat(format!("Unexpected response body: {e}")))
            }
            Err(_) => {
                return Err(Error::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        };

        let message = envelope
            .error
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if !envelope.success {
            return Err(Error::Generic(message));
        }

        envelope
            .data
            .ok_or_else(|| Error::InvalidFormat("Response is missing data".to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        Self::unwrap_envelope(response).await
    }
}

/// Query string pairs for a search request, omitting unset values
fn search_query(params: &SearchParams) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();

    if let Some(text) = params.query.as_deref().filter(|q| !q.is_empty()) {
        query.push(("query", text.to_string()));
    }
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        query.push(("category", category.to_string()));
    }
    if let Some(sort) = params.sort {
        query.push(("sort", sort.to_string()));
    }
    query.push(("page", params.page.to_string()));
    query.push(("limit", params.limit.to_string()));

    query
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let url = self.url("tools/search");
        log::debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .query(&search_query(params))
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    async fn upvote(&self, id: &str) -> Result<UpvoteResponse, Error> {
        let url = self.url(&format!("tools/{id}/upvote"));
        log::debug!("POST {url}");

        let response = self.client.post(&url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn categories(&self) -> Result<Vec<String>, Error> {
        self.get("categories").await
    }

    async fn featured(&self) -> Result<Vec<Tool>, Error> {
        self.get("tools/featured").await
    }

    async fn similar(&self, id: &str) -> Result<Vec<Tool>, Error> {
        self.get(&format!("tools/{id}/similar")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use serde_json::json;
    use std::sync::Arc;
    use tooldex_core::ingest::{ingest, IngestOptions};
    use tooldex_core::models::SortOrder;

    /// Serve a small catalog on an ephemeral port and return its API base
    async fn spawn_catalog() -> String {
        let raw = json!([
            {"name": "Ledger", "url": "https://ledger.dev", "category": "Finance", "upvotes": 10},
            {"name": "Rocket", "url": "https://rocket.dev", "category": "Startup", "upvotes": 50},
            {"name": "Budget", "url": "https://budget.dev", "category": "Finance", "upvotes": 30}
        ]);
        let state = Arc::new(InMemoryBackend::new(ingest(&raw, IngestOptions::default())));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(crate::server::serve(listener, crate::server::AppState::new(state)));

        format!("http://{addr}/api/")
    }

    #[test]
    fn test_search_query_omits_unset_values() {
        let query = search_query(&SearchParams::default());

        assert_eq!(
            query,
            vec![
                ("sort", "popular".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string())
            ]
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:3000/api/");
        assert_eq!(backend.url("categories"), "http://localhost:3000/api/categories");
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let backend = HttpBackend::new(spawn_catalog().await);

        let response = backend
            .search(&SearchParams {
                category: Some("Finance".to_string()),
                sort: Some(SortOrder::Name),
                ..Default::default()
            })
            .await
            .unwrap();

        let names: Vec<_> = response.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Budget", "Ledger"]);
        assert_eq!(response.total, 2);
        assert_eq!(response.total_pages, 1);
    }

    #[tokio::test]
    async fn test_upvote_round_trip() {
        let backend = HttpBackend::new(spawn_catalog().await);

        let response = backend.upvote("rocket-1").await.unwrap();

        assert_eq!(response.tool_id, "rocket-1");
        assert_eq!(response.upvotes, 51);
    }

    #[tokio::test]
    async fn test_upvote_unknown_tool_is_not_found() {
        let backend = HttpBackend::new(spawn_catalog().await);

        let err = backend.upvote("missing").await.unwrap_err();

        assert_eq!(err, Error::NotFound("Tool not found".to_string()));
    }

    #[tokio::test]
    async fn test_listing_endpoints() {
        let backend = HttpBackend::new(spawn_catalog().await);

        assert_eq!(
            backend.categories().await.unwrap(),
            vec!["Finance".to_string(), "Startup".to_string()]
        );
        assert_eq!(backend.featured().await.unwrap().len(), 3);
        assert_eq!(backend.similar("ledger-0").await.unwrap()[0].name, "Budget");
    }

    #[tokio::test]
    async fn test_plain_text_404_is_not_found() {
        let base = spawn_catalog().await;
        let backend = HttpBackend::new(base.replace("/api/", "/"));

        let err = backend.categories().await.unwrap_err();

        assert_eq!(err, Error::NotFound("Not found".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(format!("http://{addr}/api"));
        let err = backend.categories().await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
