use colored::Colorize;
use serde::Serialize;
use tooldex_core::category::icon_for_category;
use tooldex_core::models::{FilterState, Tool};

use super::{format_header, format_tool_entry, output_json};
use crate::backend;
use crate::prelude::{eprintln, *};
use crate::store::{ToolStore, ToolStoreState};

#[derive(Debug, clap::Args, Clone)]
pub struct BrowseOptions {
    /// Number of tools in the main listing
    #[arg(short, long, env = "TOOLDEX_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the landing view shows at once
#[derive(Debug, Serialize)]
pub struct BrowseOutput {
    pub featured: Vec<Tool>,
    pub categories: Vec<String>,
    pub tools: Vec<Tool>,
    pub total: usize,
}

impl From<ToolStoreState> for BrowseOutput {
    fn from(state: ToolStoreState) -> Self {
        Self {
            featured: state.featured_tools,
            categories: state.categories,
            tools: state.tools,
            total: state.total,
        }
    }
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let backend = backend::from_global(&global).await?;
    let store = ToolStore::with_filters(
        backend,
        FilterState {
            limit: options.limit,
            ..Default::default()
        },
    );

    if global.verbose {
        eprintln!("Loading tools, categories and featured tools...");
        let mut receiver = store.subscribe();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let state = receiver.borrow_and_update().clone();
                eprintln!(
                    "tools: {:?}, categories: {:?}, featured: {:?}",
                    state.tools_state, state.categories_state, state.featured_state
                );
            }
        });
    }

    futures::try_join!(
        store.load_tools(),
        store.load_categories(),
        store.load_featured_tools()
    )
    .context("Failed to load the catalog")?;

    let output = BrowseOutput::from(store.get());

    if options.json {
        output_json(&output)
    } else {
        print!("{}", format_browse_text(&output));
        Ok(())
    }
}

pub fn format_browse_text(output: &BrowseOutput) -> String {
    let mut result = String::new();

    result.push_str(&format_header("FEATURED TOOLS"));
    if output.featured.is_empty() {
        result.push_str(&f!("\n{}\n", "Nothing featured yet.".yellow()));
    }
    for (idx, tool) in output.featured.iter().enumerate() {
        result.push_str(&format_tool_entry(idx + 1, tool));
    }

    result.push_str(&format_header(&f!(
        "CATEGORIES ({})",
        output.categories.len()
    )));
    result.push('\n');
    for category in &output.categories {
        result.push_str(&f!(
            "  {} {}\n",
            "•".bright_magenta(),
            f!("{} ({})", category, icon_for_category(category)).bright_white()
        ));
    }

    result.push_str(&format_header(&f!(
        "ALL TOOLS ({} of {})",
        output.tools.len(),
        output.total
    )));
    for (idx, tool) in output.tools.iter().enumerate() {
        result.push_str(&format_tool_entry(idx + 1, tool));
    }

    if output.total > output.tools.len() {
        result.push_str(&f!(
            "\n{}: {}\n",
            "More".green(),
            "tooldex search --page 2".cyan()
        ));
    }

    result.push('\n');
    result
}
