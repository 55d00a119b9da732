use colored::Colorize;
use tooldex_core::models::{Tool, UpvoteResponse};

use super::{format_header, format_tool_entry, output_json};
use crate::backend;
use crate::prelude::{eprintln, println, *};
use crate::store::ToolStore;

#[derive(Debug, clap::Args, Clone)]
pub struct UpvoteOptions {
    /// Tool ID (e.g. "foo-bar-0")
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SimilarOptions {
    /// Tool ID (e.g. "foo-bar-0")
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_upvote(options: UpvoteOptions, global: crate::Global) -> Result<()> {
    let backend = backend::from_global(&global).await?;
    let store = ToolStore::new(backend);

    if global.verbose {
        eprintln!("Upvoting {}...", options.id);
    }

    let upvotes = upvote_in_listing(&store, &options.id)
        .await
        .with_context(|| f!("Failed to upvote {}", options.id))?;

    if options.json {
        output_json(&UpvoteResponse {
            tool_id: options.id,
            upvotes,
        })
    } else {
        println!(
            "{} {} {}",
            "▲".bright_yellow().bold(),
            options.id.white().bold(),
            f!("now has {} upvotes", upvotes).bright_white()
        );
        Ok(())
    }
}

/// Load the listing so the upvote is applied optimistically, then upvote
pub async fn upvote_in_listing(store: &ToolStore, id: &str) -> Result<u64, Error> {
    if let Err(err) = store.load_tools().await {
        log::debug!("Upvoting {id} without a local listing: {err}");
    }

    store.upvote_tool(id).await
}

pub async fn run_similar(options: SimilarOptions, global: crate::Global) -> Result<()> {
    let backend = backend::from_global(&global).await?;

    let similar = backend
        .similar(&options.id)
        .await
        .with_context(|| f!("Failed to load tools similar to {}", options.id))?;

    if options.json {
        output_json(&similar)
    } else {
        print!("{}", format_similar_text(&options.id, &similar));
        Ok(())
    }
}

pub fn format_similar_text(id: &str, similar: &[Tool]) -> String {
    let mut result = format_header(&f!("SIMILAR TO {}", id));

    if similar.is_empty() {
        result.push_str(&f!(
            "\n{}\n",
            "No similar tools found (unknown ID or no other tools in its category).".yellow()
        ));
    }
    for (idx, tool) in similar.iter().enumerate() {
        result.push_str(&format_tool_entry(idx + 1, tool));
    }

    result.push('\n');
    result
}
