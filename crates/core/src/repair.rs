//! Field-shape repair for raw dataset records
//!
//! Dataset exports are unreliable: columns lose their headers and come out as
//! positional placeholder keys (`#untitled`, `#untitled--2`, ...), and rows get
//! shifted so that a URL lands in the description or category column. This
//! module recovers a best-guess set of fields from one such record.
//!
//! Repair is an ordered list of pure rules over a [`RepairDraft`]:
//!
//! 1. [`extract_fields`] reads canonical keys, falling back to positional aliases
//! 2. [`repair_url_position`] pulls a URL back out of description/category
//! 3. [`repair_name_position`] swaps name and url when they were exchanged
//! 4. [`validate`] gates the draft on a non-empty name and an HTTP(S) url
//! 5. [`derive`] fills defaults and normalizes the remaining fields
//!
//! The rules only undo common single-shift anomalies. They are order
//! sensitive and are not expected to recover every malformed record.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::category::{normalize_category, UNCATEGORIZED};

/// Description used when a record has none
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Number of description characters copied into a derived tagline
pub const TAGLINE_LENGTH: usize = 100;

/// Positional alias keys emitted by the dataset exporter for unnamed columns
pub mod alias {
    pub const IMAGE_URL: &str = "#untitled";
    pub const NAME: &str = "#untitled--2";
    pub const DESCRIPTION: &str = "#untitled--3";
    pub const CATEGORY: &str = "#untitled--4";
    pub const URL: &str = "#untitled--6";
}

/// Working values of a record while repair rules run
///
/// Values stay as raw JSON until the gate because a shifted column can hold
/// anything, not just strings.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairDraft {
    pub name: Value,
    pub url: Value,
    pub description: Value,
    pub category: Value,
    pub image_url: Value,
}

/// A repair rule: one pure step over the working values
pub type RepairRule = fn(RepairDraft) -> RepairDraft;

/// Rules applied after extraction, in order
pub const REPAIR_RULES: &[RepairRule] = &[repair_url_position, repair_name_position];

/// Record that passed the validity gate, with every field derived
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedRecord {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tagline: String,
    pub category: String,
    pub image_url: Option<String>,
    pub upvotes: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Loose JSON truthiness: `null`, `false`, `0` and `""` count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value among `keys`, or `fallback`
fn first_truthy(record: &Value, keys: &[&str], fallback: Value) -> Value {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_truthy(value))
        .cloned()
        .unwrap_or(fallback)
}

/// Check whether a string starts with an HTTP(S) scheme marker
pub fn is_http_url(text: &str) -> bool {
    has_prefix_ignore_case(text, "http://") || has_prefix_ignore_case(text, "https://")
}

fn has_prefix_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn looks_like_url(value: &Value) -> bool {
    value.as_str().map(is_http_url).unwrap_or(false)
}

/// Read the working values from a raw record
pub fn extract_fields(record: &Value) -> RepairDraft {
    RepairDraft {
        name: first_truthy(record, &["name", alias::NAME], Value::String(String::new())),
        url: first_truthy(record, &["url", alias::URL], Value::String(String::new())),
        description: first_truthy(
            record,
            &["description", alias::DESCRIPTION],
            Value::String(String::new()),
        ),
        category: first_truthy(
            record,
            &["category", alias::CATEGORY],
            Value::String(UNCATEGORIZED.to_string()),
        ),
        image_url: first_truthy(record, &["image_url", alias::IMAGE_URL], Value::Null),
    }
}

/// Move a URL that landed in description or category back into `url`
///
/// Description is checked first, so it wins when both columns hold a URL.
pub fn repair_url_position(mut draft: RepairDraft) -> RepairDraft {
    if looks_like_url(&draft.url) {
        return draft;
    }

    if looks_like_url(&draft.description) {
        std::mem::swap(&mut draft.url, &mut draft.description);
    } else if looks_like_url(&draft.category) {
        std::mem::swap(&mut draft.url, &mut draft.category);
    }

    draft
}

/// Swap `name` and `url` when the name looks like a bare host or filename
pub fn repair_name_position(mut draft: RepairDraft) -> RepairDraft {
    let name_suspicious = match draft.name.as_str() {
        Some(name) => name.contains('.') && !name.contains(' '),
        None => true,
    };
    let url_is_plain_text = draft
        .url
        .as_str()
        .map(|url| !is_http_url(url))
        .unwrap_or(false);

    if name_suspicious && url_is_plain_text {
        std::mem::swap(&mut draft.name, &mut draft.url);
    }

    draft
}

/// Validity gate: a non-blank name and an HTTP(S) url
///
/// Returns the name and url on success.
pub fn validate(draft: &RepairDraft) -> Option<(String, String)> {
    let name = draft.name.as_str().filter(|name| !name.trim().is_empty())?;
    let url = draft.url.as_str().filter(|url| is_http_url(url))?;
    Some((name.to_string(), url.to_string()))
}

/// Parse an upvote count, yielding 0 for anything unusable
///
/// Numbers are truncated, strings contribute their leading integer
/// ("42 votes" is 42) and negative values clamp to 0.
pub fn parse_upvotes(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_leading_integer(s),
        _ => 0,
    }
}

fn parse_leading_integer(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if negative || end == 0 {
        return 0;
    }

    digits[..end].parse::<u64>().unwrap_or(u64::MAX)
}

/// Keep an image URL only when it is served over https
pub fn secure_image_url(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|url| has_prefix_ignore_case(url, "https://"))
        .map(str::to_string)
}

fn non_empty_string(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Derive the canonical fields of a draft that passed the gate
pub fn derive(record: &Value, draft: &RepairDraft, name: String, url: String) -> RepairedRecord {
    let description = non_empty_string(&draft.description).map(str::to_string);

    let tagline = record
        .get("tagline")
        .and_then(non_empty_string)
        .map(str::to_string)
        .or_else(|| {
            description
                .as_ref()
                .map(|d| d.chars().take(TAGLINE_LENGTH).collect())
        })
        .unwrap_or_else(|| name.clone());

    let category = normalize_category(draft.category.as_str().unwrap_or_default());

    let created_at = record
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    RepairedRecord {
        name,
        url,
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        tagline,
        category,
        image_url: secure_image_url(&draft.image_url),
        upvotes: parse_upvotes(record.get("upvotes")),
        created_at,
    }
}

/// Run the full repair heuristic over one raw record
///
/// Returns `None` when the record cannot be recovered.
pub fn repair_record(record: &Value) -> Option<RepairedRecord> {
    let draft = REPAIR_RULES
        .iter()
        .fold(extract_fields(record), |draft, rule| rule(draft));

    let (name, url) = validate(&draft)?;
    Some(derive(record, &draft, name, url))
}
