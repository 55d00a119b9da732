//! In-process catalog queries
//!
//! Search, featured and similar-tool selection over an ingested tool list.
//! These are the pure counterparts of the remote search endpoints and back
//! both the in-memory backend and the REST server.

use std::cmp::Ordering;

use crate::models::{SearchParams, SearchResponse, SortOrder, Tool};
use crate::pagination::{clamp_page, paginate, total_pages};

/// Number of tools shown in the featured strip
pub const FEATURED_LIMIT: usize = 6;

/// Number of related tools shown next to a tool
pub const SIMILAR_LIMIT: usize = 3;

/// Case-insensitive substring match over name, description and tagline
pub fn matches_query(tool: &Tool, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [&tool.name, &tool.description, &tool.tagline]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn by_popularity(a: &Tool, b: &Tool) -> Ordering {
    b.upvotes.cmp(&a.upvotes)
}

fn by_name(a: &Tool, b: &Tool) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Newest first, undated tools last
fn by_recency(a: &Tool, b: &Tool) -> Ordering {
    match (&a.created_at, &b.created_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort tools in place; ties keep their ingestion order
pub fn sort_tools(tools: &mut [Tool], sort: SortOrder) {
    match sort {
        SortOrder::Popular => tools.sort_by(by_popularity),
        SortOrder::Name => tools.sort_by(by_name),
        SortOrder::Recent => tools.sort_by(by_recency),
    }
}

/// Filter, sort and paginate a tool list
pub fn search_tools(tools: &[Tool], params: &SearchParams) -> SearchResponse {
    let query = params.query.as_deref().unwrap_or_default();
    let category = params.category.as_deref().filter(|c| !c.is_empty());

    let mut matched: Vec<Tool> = tools
        .iter()
        .filter(|tool| category.map_or(true, |c| tool.category == c))
        .filter(|tool| matches_query(tool, query))
        .cloned()
        .collect();

    sort_tools(&mut matched, params.sort.unwrap_or_default());

    let page = clamp_page(params.page);
    let limit = clamp_page(params.limit);
    let total = matched.len();

    SearchResponse {
        tools: paginate(&matched, page, limit),
        total,
        page,
        total_pages: total_pages(total, limit),
    }
}

/// Top `limit` tools by upvotes
pub fn featured_tools(tools: &[Tool], limit: usize) -> Vec<Tool> {
    let mut featured = tools.to_vec();
    sort_tools(&mut featured, SortOrder::Popular);
    featured.truncate(limit);
    featured
}

/// Top `limit` tools sharing the category of `id`, excluding `id` itself
///
/// Unknown ids yield an empty list.
pub fn similar_tools(tools: &[Tool], id: &str, limit: usize) -> Vec<Tool> {
    let Some(target) = tools.iter().find(|tool| tool.id == id) else {
        return Vec::new();
    };

    let mut similar: Vec<Tool> = tools
        .iter()
        .filter(|tool| tool.id != id && tool.category == target.category)
        .cloned()
        .collect();

    sort_tools(&mut similar, SortOrder::Popular);
    similar.truncate(limit);
    similar
}

/// Increment the upvotes of `id` in place, returning the new count
pub fn apply_upvote(tools: &mut [Tool], id: &str) -> Option<u64> {
    let tool = tools.iter_mut().find(|tool| tool.id == id)?;
    tool.upvotes = tool.upvotes.saturating_add(1);
    Some(tool.upvotes)
}
