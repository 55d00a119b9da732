#![allow(unused)]

use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod backend;
mod catalog;
mod error;
mod ingest;
mod prelude;
mod server;
mod store;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, search, upvote and curate a catalog of AI tools"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of a remote catalog API (e.g. http://localhost:3000/api)
    #[clap(long, env = "TOOLDEX_API_URL", global = true)]
    api_url: Option<String>,

    /// Raw JSON dataset used when no API URL is given
    #[clap(
        long,
        env = "TOOLDEX_DATASET",
        global = true,
        default_value = "data/tools.json"
    )]
    dataset: PathBuf,

    /// Backfill missing upvotes and randomize match scores when ingesting
    #[clap(long, env = "TOOLDEX_MOCK", global = true, default_value = "false")]
    mock: bool,

    /// Whether to display additional information.
    #[clap(long, env = "TOOLDEX_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Validate and normalize a raw JSON dataset export
    Ingest(crate::ingest::UploadOptions),

    /// Search the catalog
    Search(crate::catalog::search::SearchOptions),

    /// Show featured tools, categories and the first page of the catalog
    Browse(crate::catalog::browse::BrowseOptions),

    /// List categories with their icons
    Categories(crate::catalog::categories::CategoriesOptions),

    /// Upvote a tool
    Upvote(crate::catalog::tool::UpvoteOptions),

    /// Show tools similar to a given tool
    Similar(crate::catalog::tool::SimilarOptions),

    /// Serve the catalog over a REST API
    Serve(crate::server::cli::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Ingest(options) => crate::ingest::run(options, app.global).await,
        SubCommands::Search(options) => crate::catalog::search::run(options, app.global).await,
        SubCommands::Browse(options) => crate::catalog::browse::run(options, app.global).await,
        SubCommands::Categories(options) => {
            crate::catalog::categories::run(options, app.global).await
        }
        SubCommands::Upvote(options) => crate::catalog::tool::run_upvote(options, app.global).await,
        SubCommands::Similar(options) => {
            crate::catalog::tool::run_similar(options, app.global).await
        }
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
