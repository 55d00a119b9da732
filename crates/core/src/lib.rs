//! Core library for tooldex
//!
//! This crate implements the **Functional Core** of the tooldex application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`tooldex_core`** (this crate): Pure transformation functions with zero I/O
//! - **`tooldex`**: Store, backends, CLI and REST server (the Imperative Shell)
//!
//! Every function here is deterministic for a given input (mock-mode ingestion
//! takes its random source as an argument) and can be tested with fixture data
//! alone. The only side effect is logging through the `log` facade.
//!
//! # Module Organization
//!
//! - [`models`]: Canonical `Tool`, filter state and wire types
//! - [`slug`]: URL-safe identifiers
//! - [`category`]: Category label normalization and icon lookup
//! - [`repair`]: Ordered repair rules for malformed dataset records
//! - [`ingest`]: Raw JSON export to canonical tools
//! - [`filter`]: Search, featured and similar-tool queries
//! - [`pagination`]: Page arithmetic
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use tooldex_core::ingest::{ingest, IngestOptions};
//! use tooldex_core::filter::search_tools;
//! use tooldex_core::models::SearchParams;
//!
//! let raw = json!([{"name": "Foo Bar", "url": "https://foo.bar", "category": "🚀 Startup!!"}]);
//! let tools = ingest(&raw, IngestOptions::default());
//!
//! let page = search_tools(&tools, &SearchParams::default());
//! assert_eq!(page.tools[0].category, "Startup");
//! ```

pub mod category;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod pagination;
pub mod repair;
pub mod slug;
