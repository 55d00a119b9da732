//! Catalog commands: search, browse, categories, upvote and similar

use colored::Colorize;
use serde::Serialize;
use tooldex_core::category::icon_for_category;
use tooldex_core::models::Tool;

use crate::prelude::{println, *};

pub mod browse;
pub mod categories;
pub mod search;
pub mod tool;

const RULE_WIDTH: usize = 80;
const DESCRIPTION_WIDTH: usize = 160;

/// Print any serializable value as pretty JSON
pub fn output_json<T: Serialize>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

/// Banner heading used by every catalog view
pub fn format_header(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    f!(
        "\n{}\n{}\n{}\n",
        rule.bright_cyan(),
        title.bright_cyan().bold(),
        rule.bright_cyan()
    )
}

/// Cut text to at most `max_chars` characters, marking the cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        f!("{}...", cut.trim_end())
    }
}

/// One numbered tool entry
pub fn format_tool_entry(number: usize, tool: &Tool) -> String {
    let mut result = String::new();

    result.push_str(&f!(
        "\n{} {} {}\n",
        f!("[{number}]").yellow().bold(),
        tool.name.white().bold(),
        f!("▲ {}", tool.upvotes).bright_yellow()
    ));
    result.push_str(&f!("    {}\n", tool.tagline.bright_white()));
    result.push_str(&f!(
        "    {}: {}\n",
        "URL".green(),
        tool.url.cyan().underline()
    ));
    result.push_str(&f!(
        "    {}: {} ({}) | {}: {}\n",
        "Category".green(),
        tool.category.bright_magenta(),
        icon_for_category(&tool.category).bright_black(),
        "ID".green(),
        tool.id.bright_white()
    ));

    if tool.description != tool.tagline {
        result.push_str(&f!(
            "    {}\n",
            truncate_text(&tool.description, DESCRIPTION_WIDTH).bright_black()
        ));
    }

    result
}
