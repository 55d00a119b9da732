//! Raw dataset ingestion
//!
//! Turns an uploaded or bundled JSON export into canonical [`Tool`] records.
//! Each element goes through [`repair_record`]; elements that cannot be
//! recovered are dropped and the survivors keep their original order.

use rand::Rng;
use serde_json::Value;

use crate::models::{Tool, NEUTRAL_MATCH_SCORE};
use crate::repair::repair_record;
use crate::slug::slugify;

/// Error type for ingestion entry points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid JSON format.")]
    InvalidFormat,

    #[error("Please upload a JSON file")]
    NotJson,
}

/// Knobs for a single ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Backfill missing upvotes and randomize match scores for demo data
    pub add_mock_data: bool,
}

impl IngestOptions {
    pub fn mock() -> Self {
        Self {
            add_mock_data: true,
        }
    }
}

/// Ingest a raw JSON value using the thread-local RNG for mock data
pub fn ingest(raw: &Value, options: IngestOptions) -> Vec<Tool> {
    ingest_with_rng(raw, options, &mut rand::thread_rng())
}

/// Ingest a raw JSON value with an explicit random source
///
/// Anything other than an array yields an empty list. The RNG is only
/// consulted in mock mode.
pub fn ingest_with_rng<R: Rng>(
    raw: &Value,
    options: IngestOptions,
    rng: &mut R,
) -> Vec<Tool> {
    let Some(records) = raw.as_array() else {
        log::warn!("Expected a JSON array of tools, got {}", value_kind(raw));
        return Vec::new();
    };

    let tools: Vec<Tool> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let repaired = repair_record(record)?;

            let (upvotes, match_score) = if options.add_mock_data {
                let upvotes = match repaired.upvotes {
                    0 => rng.gen_range(100..2100),
                    n => n,
                };
                (upvotes, rng.gen::<f64>())
            } else {
                (repaired.upvotes, NEUTRAL_MATCH_SCORE)
            };

            Some(Tool {
                id: slugify(&format!("{}-{}", repaired.name, index)),
                slug: slugify(&repaired.name),
                name: repaired.name,
                url: repaired.url,
                description: repaired.description,
                tagline: repaired.tagline,
                category: repaired.category,
                image_url: repaired.image_url,
                upvotes,
                match_score,
                created_at: repaired.created_at,
            })
        })
        .collect();

    let discarded = records.len() - tools.len();
    if discarded > 0 {
        log::debug!("Discarded {discarded} of {} raw records", records.len());
    }

    tools
}

/// Parse JSON text and ingest it
///
/// Syntax errors fail the whole batch; nothing is partially ingested.
pub fn ingest_json(text: &str, options: IngestOptions) -> Result<Vec<Tool>, IngestError> {
    let raw: Value = serde_json::from_str(text).map_err(|_| IngestError::InvalidFormat)?;
    Ok(ingest(&raw, options))
}

/// Reject uploads whose file name does not end in `.json`
pub fn validate_upload_name(file_name: &str) -> Result<(), IngestError> {
    if file_name.to_ascii_lowercase().ends_with(".json") {
        Ok(())
    } else {
        Err(IngestError::NotJson)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::HashSet;

    fn plain() -> IngestOptions {
        IngestOptions::default()
    }

    // ============================================================================
    // Worked scenarios
    // ============================================================================

    #[test]
    fn test_ingest_cleans_category_and_derives_id() {
        let raw = json!([{"name": "Foo Bar", "url": "https://foo.bar", "category": "🚀 Startup!!"}]);

        let tools = ingest(&raw, plain());

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].category, "Startup");
        assert_eq!(tools[0].id, "foo-bar-0");
        assert_eq!(tools[0].slug, "foo-bar");
        assert_eq!(tools[0].match_score, NEUTRAL_MATCH_SCORE);
        assert_eq!(tools[0].upvotes, 0);
    }

    #[test]
    fn test_ingest_positional_aliases() {
        let raw = json!([{"#untitled--2": "Baz", "#untitled--6": "https://baz.io"}]);

        let tools = ingest(&raw, plain());

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Baz");
        assert_eq!(tools[0].url, "https://baz.io");
    }

    #[test]
    fn test_ingest_swapped_name_and_url() {
        let raw = json!([{"name": "https://shifted.io", "url": "Shifted Tool"}]);

        let tools = ingest(&raw, plain());

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Shifted Tool");
        assert_eq!(tools[0].url, "https://shifted.io");
    }

    #[test]
    fn test_ingest_drops_record_without_url() {
        let raw = json!([{"name": "NoUrl"}]);
        assert!(ingest(&raw, plain()).is_empty());
    }

    // ============================================================================
    // Batch behavior
    // ============================================================================

    #[test]
    fn test_ingest_keeps_original_index_in_id() {
        let raw = json!([
            {"name": "Dropped"},
            {"name": "Kept", "url": "https://kept.dev"},
            "garbage",
            {"name": "Also Kept", "url": "http://also.dev"}
        ]);

        let tools = ingest(&raw, plain());

        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].id, "kept-1");
        assert_eq!(tools[1].id, "also-kept-3");
    }

    #[test]
    fn test_ingest_ids_unique_with_duplicate_names() {
        let raw = json!([
            {"name": "Twin", "url": "https://a.dev"},
            {"name": "Twin", "url": "https://b.dev"},
            {"name": "Twin", "url": "https://c.dev"}
        ]);

        let tools = ingest(&raw, plain());
        let ids: HashSet<_> = tools.iter().map(|t| t.id.clone()).collect();

        assert_eq!(ids.len(), 3);
        assert!(tools.iter().all(|t| t.slug == "twin"));
    }

    #[test]
    fn test_ingest_non_array_is_empty() {
        assert!(ingest(&json!({"name": "Foo"}), plain()).is_empty());
        assert!(ingest(&json!("tools"), plain()).is_empty());
        assert!(ingest(&Value::Null, plain()).is_empty());
    }

    #[test]
    fn test_ingest_output_satisfies_invariants() {
        let raw = json!([
            {"name": "Foo Bar", "url": "https://foo.bar", "category": "🚀 Startup!!"},
            {"#untitled--2": "Baz", "#untitled--6": "https://baz.io", "#untitled": "http://baz.io/a.png"},
            {"name": "https://shifted.io", "url": "Shifted Tool", "upvotes": "17"},
            {"name": "NoUrl"},
            {"name": "", "url": "https://nameless.dev"},
            {"name": "Emoji Only", "url": "https://e.dev", "category": "🔥🔥"},
            42,
            null
        ]);

        let tools = ingest(&raw, plain());

        assert!(tools.len() <= raw.as_array().unwrap().len());
        assert_eq!(tools.len(), 4);
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(tool.url.starts_with("http://") || tool.url.starts_with("https://"));
            assert!(!tool.category.is_empty());
            assert!(tool.image_url.as_deref().map_or(true, |u| u.starts_with("https://")));
        }
        assert_eq!(tools[2].upvotes, 17);
        assert_eq!(tools[3].category, "Uncategorized");
    }

    #[test]
    fn test_ingest_is_idempotent_on_output() {
        let raw = json!([
            {"name": "Foo Bar", "url": "https://foo.bar", "category": "🚀 Startup!!", "upvotes": 4},
            {"#untitled--2": "Baz", "#untitled--6": "https://baz.io", "#untitled--3": "Baz tool"},
            {"name": "https://shifted.io", "url": "Shifted Tool"}
        ]);

        let first = ingest(&raw, plain());
        let reserialized = serde_json::to_value(&first).unwrap();
        let second = ingest(&reserialized, plain());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.url, b.url);
            assert_eq!(a.category, b.category);
            assert_eq!(a.description, b.description);
            assert_eq!(a.upvotes, b.upvotes);
        }
    }

    // ============================================================================
    // Mock mode
    // ============================================================================

    #[test]
    fn test_mock_mode_backfills_missing_upvotes() {
        let raw = json!([
            {"name": "Fresh", "url": "https://fresh.dev"},
            {"name": "Known", "url": "https://known.dev", "upvotes": 7}
        ]);
        let mut rng = StdRng::seed_from_u64(7);

        let tools = ingest_with_rng(&raw, IngestOptions::mock(), &mut rng);

        assert!((100..2100).contains(&tools[0].upvotes));
        assert_eq!(tools[1].upvotes, 7);
        for tool in &tools {
            assert!((0.0..1.0).contains(&tool.match_score));
        }
    }

    #[test]
    fn test_mock_mode_is_deterministic_for_a_seed() {
        let raw = json!([{"name": "Fresh", "url": "https://fresh.dev"}]);

        let a = ingest_with_rng(&raw, IngestOptions::mock(), &mut StdRng::seed_from_u64(42));
        let b = ingest_with_rng(&raw, IngestOptions::mock(), &mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    // ============================================================================
    // ingest_json / validate_upload_name
    // ============================================================================

    #[test]
    fn test_ingest_json_valid() {
        let tools = ingest_json(r#"[{"name":"Foo","url":"https://foo.dev"}]"#, plain()).unwrap();
        assert_eq!(tools.len(), 1);
    }

    #[test]
    fn test_ingest_json_invalid() {
        let err = ingest_json("[{\"name\": ", plain()).unwrap_err();
        assert_eq!(err, IngestError::InvalidFormat);
        assert_eq!(err.to_string(), "Invalid JSON format.");
    }

    #[test]
    fn test_ingest_json_object_is_empty_not_error() {
        assert!(ingest_json(r#"{"tools": []}"#, plain()).unwrap().is_empty());
    }

    #[test]
    fn test_validate_upload_name() {
        assert!(validate_upload_name("tools.json").is_ok());
        assert!(validate_upload_name("TOOLS.JSON").is_ok());

        let err = validate_upload_name("tools.csv").unwrap_err();
        assert_eq!(err, IngestError::NotJson);
        assert_eq!(err.to_string(), "Please upload a JSON file");
        assert!(validate_upload_name("json").is_err());
    }
}
