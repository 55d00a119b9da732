use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size used by the catalog views.
pub const DEFAULT_LIMIT: usize = 20;

/// Canonical tool record produced by the ingestion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub tagline: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(rename = "matchScore", default = "neutral_match_score")]
    pub match_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Match score assigned outside of mock mode
pub const NEUTRAL_MATCH_SCORE: f64 = 0.5;

fn neutral_match_score() -> f64 {
    NEUTRAL_MATCH_SCORE
}

/// Ordering applied to a tool listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Upvotes, highest first
    #[default]
    Popular,
    /// Name, A to Z
    Name,
    /// Creation time, newest first
    Recent,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::Name => "name",
            SortOrder::Recent => "recent",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popular" => Ok(SortOrder::Popular),
            "name" => Ok(SortOrder::Name),
            "recent" => Ok(SortOrder::Recent),
            other => Err(format!(
                "Invalid sort order: {}. Valid orders: popular, name, recent",
                other
            )),
        }
    }
}

/// Current filter selection of a tool listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub sort: SortOrder,
    pub query: String,
    pub page: usize,
    pub limit: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            sort: SortOrder::Popular,
            query: String::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Partial filter change
///
/// `category` is tri-state: `None` leaves the current value alone,
/// `Some(None)` clears it and `Some(Some(label))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub category: Option<Option<String>>,
    pub sort: Option<SortOrder>,
    pub query: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl FilterUpdate {
    pub fn category(label: impl Into<String>) -> Self {
        Self {
            category: Some(Some(label.into())),
            ..Default::default()
        }
    }

    pub fn clear_category() -> Self {
        Self {
            category: Some(None),
            ..Default::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }
}

impl FilterState {
    /// Merge a partial update into this state, returning the merged copy
    pub fn merged(&self, update: FilterUpdate) -> FilterState {
        FilterState {
            category: match update.category {
                Some(category) => category,
                None => self.category.clone(),
            },
            sort: update.sort.unwrap_or(self.sort),
            query: update.query.unwrap_or_else(|| self.query.clone()),
            page: update.page.unwrap_or(self.page),
            limit: update.limit.unwrap_or(self.limit),
        }
    }

    /// Search parameters for this filter selection
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            query: Some(self.query.clone()).filter(|q| !q.trim().is_empty()),
            category: self.category.clone(),
            sort: Some(self.sort),
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Parameters accepted by the search collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<SortOrder>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for SearchParams {
    fn default() -> Self {
        FilterState::default().to_params()
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tools: Vec<Tool>,
    pub total: usize,
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Result of an upvote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpvoteResponse {
    #[serde(rename = "toolId")]
    pub tool_id: String,
    pub upvotes: u64,
}

/// Wire envelope shared by every API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Lifecycle of one logical fetch operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}
