use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tooldex_core::ingest::ingest_json;
use tooldex_core::models::{
    ApiResponse, SearchParams, SearchResponse, Tool, UpvoteResponse, DEFAULT_LIMIT,
};

use super::AppState;
use crate::backend::CatalogBackend;
use crate::prelude::*;

/// Largest page size a client may request
pub const MAX_LIMIT: usize = 100;

type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> ApiReply<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

fn failure<T>(context: &str, err: Error) -> ApiReply<T> {
    match err {
        Error::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Tool not found")),
        ),
        err => {
            log::warn!("Error {context}: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Internal server error")),
            )
        }
    }
}

/// Raw search query string; unknown sort values fall back to popular
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn into_params(self) -> SearchParams {
        SearchParams {
            query: self.query.filter(|q| !q.trim().is_empty()),
            category: self.category.filter(|c| !c.is_empty()),
            sort: self.sort.and_then(|s| s.parse().ok()),
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ImportResponse {
    pub imported: usize,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn categories(State(state): State<AppState>) -> ApiReply<Vec<String>> {
    match state.catalog.categories().await {
        Ok(categories) => ok(categories),
        Err(err) => failure("fetching categories", err),
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiReply<SearchResponse> {
    match state.catalog.search(&query.into_params()).await {
        Ok(response) => ok(response),
        Err(err) => failure("searching tools", err),
    }
}

pub async fn featured(State(state): State<AppState>) -> ApiReply<Vec<Tool>> {
    match state.catalog.featured().await {
        Ok(tools) => ok(tools),
        Err(err) => failure("fetching featured tools", err),
    }
}

pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiReply<Vec<Tool>> {
    match state.catalog.similar(&id).await {
        Ok(tools) => ok(tools),
        Err(err) => failure("fetching similar tools", err),
    }
}

pub async fn upvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiReply<UpvoteResponse> {
    match state.catalog.upvote(&id).await {
        Ok(response) => ok(response),
        Err(err) => failure("upvoting tool", err),
    }
}

/// Replace the served catalog with a raw dataset export posted as the body
pub async fn import(State(state): State<AppState>, body: String) -> ApiReply<ImportResponse> {
    match ingest_json(&body, state.ingest_options) {
        Ok(tools) => {
            let imported = tools.len();
            state.catalog.replace(tools).await;
            log::info!("Imported {imported} tools");
            ok(ImportResponse { imported })
        }
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(err.to_string())),
        ),
    }
}
