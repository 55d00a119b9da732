//! Page arithmetic for catalog listings
//!
//! Pure functions that turn a page request into slice bounds. Out-of-range
//! requests are not an error here: a page past the end is simply empty, which
//! is what a listing view renders as "no results".

/// Clamp a page number or page size to the minimum of 1
pub fn clamp_page(value: usize) -> usize {
    value.max(1)
}

/// Number of pages needed to show `total` items, `limit` at a time
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(clamp_page(limit))
}

/// Calculate slice bounds for a given page
///
/// Returns `(start, end)` for slicing the items. Page and limit are clamped
/// to at least 1. Pages past the end return an empty `(total, total)` range.
pub fn calculate_pagination(total: usize, page: usize, limit: usize) -> (usize, usize) {
    let page = clamp_page(page);
    let limit = clamp_page(limit);

    let start = (page - 1).saturating_mul(limit);
    if start >= total {
        return (total, total);
    }

    let end = start.saturating_add(limit).min(total);
    (start, end)
}

/// Slice out one page of items
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Vec<T> {
    let (start, end) = calculate_pagination(items.len(), page, limit);
    items[start..end].to_vec()
}
