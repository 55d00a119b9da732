use serde::Serialize;
use tooldex_core::category::icon_for_category;

use super::output_json;
use crate::backend;
use crate::prelude::{println, *};
use crate::store::ToolStore;

#[derive(Debug, clap::Args, Clone)]
pub struct CategoriesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryEntry {
    pub name: String,
    pub icon: &'static str,
}

pub fn to_entries(categories: &[String]) -> Vec<CategoryEntry> {
    categories
        .iter()
        .map(|name| CategoryEntry {
            name: name.clone(),
            icon: icon_for_category(name),
        })
        .collect()
}

pub async fn run(options: CategoriesOptions, global: crate::Global) -> Result<()> {
    let backend = backend::from_global(&global).await?;
    let store = ToolStore::new(backend);

    store
        .load_categories()
        .await
        .context("Failed to load categories")?;
    let entries = to_entries(&store.get().categories);

    if options.json {
        return output_json(&entries);
    }

    if entries.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Category", "Icon"]);
    for entry in &entries {
        table.add_row(prettytable::row![entry.name, entry.icon]);
    }
    table.printstd();

    Ok(())
}
