use colored::Colorize;
use tooldex_core::models::{FilterState, SearchResponse, SortOrder};

use super::{format_header, format_tool_entry, output_json};
use crate::backend;
use crate::prelude::{eprintln, *};
use crate::store::{ToolStore, ToolStoreState};

#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Most popular tools:
  tooldex search

  # Free-text search across name, description and tagline:
  tooldex search \"image upscaler\"

  # Newest tools in one category:
  tooldex search --category \"Generative Art\" --sort recent

  # Second page, 10 per page, as JSON:
  tooldex search --page 2 --limit 10 --json")]
pub struct SearchOptions {
    /// Text matched against name, description and tagline (case-insensitive)
    pub query: Option<String>,

    /// Only show tools in this category (exact label)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: popular, name, recent
    #[arg(short, long, default_value = "popular")]
    pub sort: SortOrder,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of tools per page
    #[arg(short, long, env = "TOOLDEX_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchOptions {
    fn filters(&self) -> FilterState {
        FilterState {
            category: self.category.clone(),
            sort: self.sort,
            query: self.query.clone().unwrap_or_default(),
            page: self.page,
            limit: self.limit,
        }
    }
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Searching with {:?}", options.filters());
    }

    let backend = backend::from_global(&global).await?;
    let store = ToolStore::with_filters(backend, options.filters());

    store.load_tools().await.context("Failed to search tools")?;
    let state = store.get();

    if options.json {
        output_json(&SearchResponse {
            tools: state.tools,
            total: state.total,
            page: state.filters.page,
            total_pages: state.total_pages,
        })
    } else {
        print!("{}", format_search_text(&state));
        Ok(())
    }
}

/// Command line reproducing `filters` with a different page
fn page_command(filters: &FilterState, page: usize) -> String {
    let mut command = String::from("tooldex search");

    if !filters.query.is_empty() {
        command.push_str(&f!(" \"{}\"", filters.query));
    }
    if let Some(category) = &filters.category {
        command.push_str(&f!(" --category \"{}\"", category));
    }
    if filters.sort != SortOrder::default() {
        command.push_str(&f!(" --sort {}", filters.sort));
    }
    command.push_str(&f!(" --page {}", page));

    command
}

pub fn format_search_text(state: &ToolStoreState) -> String {
    let filters = &state.filters;
    let mut result = String::new();

    let mut title = f!(
        "TOOLS BY {} (Page {} of {})",
        filters.sort.as_str().to_uppercase(),
        filters.page,
        state.total_pages.max(1)
    );
    if let Some(category) = &filters.category {
        title.push_str(&f!(" IN {}", category.to_uppercase()));
    }
    result.push_str(&format_header(&title));

    if state.tools.is_empty() {
        result.push_str(&f!("\n{}\n", "No tools match these filters.".yellow()));
    } else {
        let offset = (filters.page.max(1) - 1) * filters.limit.max(1);
        for (idx, tool) in state.tools.iter().enumerate() {
            result.push_str(&format_tool_entry(offset + idx + 1, tool));
        }
    }

    result.push_str(&f!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        filters.page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        state.total_pages.max(1).to_string().bright_cyan().bold(),
        state.total.to_string().bright_cyan().bold(),
        "matching tools".bright_white()
    ));

    if filters.page < state.total_pages {
        result.push_str(&f!(
            "  {}: {}\n",
            "Next page".green(),
            page_command(filters, filters.page + 1).cyan()
        ));
    }
    if filters.page > 1 {
        result.push_str(&f!(
            "  {}: {}\n",
            "Previous page".green(),
            page_command(filters, filters.page - 1).cyan()
        ));
    }

    result.push('\n');
    result
}
