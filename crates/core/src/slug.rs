use std::sync::OnceLock;

use regex::Regex;

/// Convert text into a URL-safe slug
///
/// Lowercases the input, turns whitespace runs into a single hyphen, drops
/// anything outside `[A-Za-z0-9_-]`, collapses repeated hyphens and trims
/// hyphens from both ends. Empty input yields an empty slug. Slugs are not
/// unique; callers that need uniqueness append their own discriminator.
pub fn slugify(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    static RE_SPACE: OnceLock<Regex> = OnceLock::new();
    let re_space = RE_SPACE.get_or_init(|| Regex::new(r"\s+").unwrap());

    static RE_INVALID: OnceLock<Regex> = OnceLock::new();
    let re_invalid = RE_INVALID.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

    static RE_HYPHENS: OnceLock<Regex> = OnceLock::new();
    let re_hyphens = RE_HYPHENS.get_or_init(|| Regex::new(r"-{2,}").unwrap());

    let lowered = text.to_lowercase();
    let hyphenated = re_space.replace_all(&lowered, "-");
    let cleaned = re_invalid.replace_all(&hyphenated, "");
    let collapsed = re_hyphens.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}
