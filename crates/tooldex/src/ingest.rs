//! Admin upload: validate, normalize and summarize a raw dataset export

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use tooldex_core::category::icon_for_category;
use tooldex_core::ingest::{ingest_json, validate_upload_name, IngestOptions};
use tooldex_core::models::Tool;

use crate::catalog::output_json;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Check what a dataset export turns into:
  tooldex ingest export.json

  # Write the normalized catalog next to it:
  tooldex ingest export.json --output data/tools.json

  # Inspect the normalized records:
  tooldex ingest export.json --json")]
pub struct UploadOptions {
    /// Raw JSON dataset export (must end in .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the normalized tools as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Write the normalized tools to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Per-category counts of an ingested batch
#[derive(Debug, Serialize, PartialEq)]
pub struct IngestSummary {
    pub tools: usize,
    pub categories: BTreeMap<String, usize>,
}

pub fn summarize(tools: &[Tool]) -> IngestSummary {
    let mut categories = BTreeMap::new();
    for tool in tools {
        *categories.entry(tool.category.clone()).or_insert(0) += 1;
    }

    IngestSummary {
        tools: tools.len(),
        categories,
    }
}

/// Run the upload pipeline on a file: name gate, parse, ingest
pub async fn ingest_file(path: &Path, options: IngestOptions) -> Result<Vec<Tool>> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_upload_name(&file_name)?;

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| f!("Failed to read {}", path.display()))?;

    Ok(ingest_json(&text, options)?)
}

pub async fn run(options: UploadOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Ingesting {}...", options.file.display());
    }

    let tools = ingest_file(
        &options.file,
        IngestOptions {
            add_mock_data: global.mock,
        },
    )
    .await?;

    if let Some(output) = &options.output {
        let json = serde_json::to_string_pretty(&tools)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        tokio::fs::write(output, json)
            .await
            .with_context(|| f!("Failed to write {}", output.display()))?;

        if global.verbose {
            eprintln!("Wrote {} tools to {}", tools.len(), output.display());
        }
    }

    if options.json {
        return output_json(&tools);
    }

    let summary = summarize(&tools);

    println!(
        "{} {}",
        summary.tools.to_string().bright_cyan().bold(),
        "tools ingested".bright_white()
    );

    if !summary.categories.is_empty() {
        let mut table = new_table();
        table.add_row(prettytable::row!["Category", "Tools", "Icon"]);
        for (category, count) in &summary.categories {
            table.add_row(prettytable::row![
                category,
                count,
                icon_for_category(category)
            ]);
        }
        table.printstd();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tooldex_core::ingest::IngestError;

    const EXPORT: &str = r##"[
        {"name": "Foo Bar", "url": "https://foo.bar", "category": "🚀 Startup!!"},
        {"#untitled--2": "Baz", "#untitled--6": "https://baz.io", "#untitled--4": "startup"},
        {"name": "https://shifted.io", "url": "Shifted Tool", "category": "Finance"},
        {"name": "NoUrl"}
    ]"##;

    fn write_export(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_ingest_file() {
        let file = write_export(".json", EXPORT);

        let tools = ingest_file(file.path(), IngestOptions::default()).await.unwrap();

        assert_eq!(tools.len(), 3);
        assert_eq!(tools[1].name, "Baz");
        assert_eq!(tools[2].name, "Shifted Tool");
    }

    #[tokio::test]
    async fn test_ingest_file_rejects_non_json_name() {
        let file = write_export(".csv", EXPORT);

        let err = ingest_file(file.path(), IngestOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<IngestError>(), Some(&IngestError::NotJson));
    }

    #[tokio::test]
    async fn test_ingest_file_rejects_malformed_json() {
        let file = write_export(".json", "[{\"name\": ");

        let err = ingest_file(file.path(), IngestOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid JSON format.");
    }

    #[tokio::test]
    async fn test_summarize_counts_categories() {
        let file = write_export(".json", EXPORT);
        let tools = ingest_file(file.path(), IngestOptions::default()).await.unwrap();

        let summary = summarize(&tools);

        assert_eq!(summary.tools, 3);
        assert_eq!(summary.categories.get("Startup"), Some(&2));
        assert_eq!(summary.categories.get("Finance"), Some(&1));
    }
}
