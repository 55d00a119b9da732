//! Session state for the tool list view
//!
//! A [`ToolStore`] owns the current filters and the realized listing and is
//! shared by reference (`Arc<ToolStore>`) with whatever renders it. State lives
//! in a `watch` channel; every change is a single synchronous `send_modify`, so
//! subscribers never see a half-applied update and no lock is held across an
//! `.await`.
//!
//! Overlapping searches are ordered by a monotonic request sequence: only the
//! response to the most recently dispatched search may touch the state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tooldex_core::models::{FetchState, FilterState, FilterUpdate, Tool};
use tooldex_core::pagination::total_pages;

use crate::backend::CatalogBackend;
use crate::prelude::*;

/// Snapshot of everything the tool list view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolStoreState {
    pub filters: FilterState,
    pub tools: Vec<Tool>,
    pub total: usize,
    pub total_pages: usize,
    pub categories: Vec<String>,
    pub featured_tools: Vec<Tool>,
    pub tools_state: FetchState,
    pub categories_state: FetchState,
    pub featured_state: FetchState,
    /// Bumped whenever `tools` is replaced wholesale
    pub generation: u64,
    /// Bumped on every change to `tools`
    pub revision: u64,
}

/// Pre-mutation copy of the tool list taken by an optimistic upvote
#[derive(Debug)]
struct ToolsSnapshot {
    tools: Vec<Tool>,
    generation: u64,
    revision: u64,
}

pub struct ToolStore {
    backend: Arc<dyn CatalogBackend>,
    state: watch::Sender<ToolStoreState>,
    sequence: AtomicU64,
}

impl ToolStore {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self::with_filters(backend, FilterState::default())
    }

    pub fn with_filters(backend: Arc<dyn CatalogBackend>, filters: FilterState) -> Self {
        Self {
            backend,
            state: watch::Sender::new(ToolStoreState {
                filters,
                ..Default::default()
            }),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current state snapshot
    pub fn get(&self) -> ToolStoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<ToolStoreState> {
        self.state.subscribe()
    }

    /// Replace the session's tool list, as an admin upload does
    ///
    /// Any search still in flight is invalidated so it cannot overwrite the
    /// uploaded list.
    pub fn set_tools(&self, tools: Vec<Tool>) {
        self.sequence.fetch_add(1, Ordering::SeqCst);

        self.state.send_modify(|state| {
            state.total = tools.len();
            state.total_pages = total_pages(tools.len(), state.filters.limit);
            state.tools = tools;
            state.tools_state = FetchState::Loaded;
            state.generation += 1;
            state.revision += 1;
        });
    }

    /// Merge a filter change and reload the listing
    pub async fn set_filters(&self, update: FilterUpdate) -> Result<(), Error> {
        self.state
            .send_modify(|state| state.filters = state.filters.merged(update));

        self.load_tools().await
    }

    /// Run the search for the current filters
    ///
    /// On failure the previous listing is kept and the error is both recorded
    /// in `tools_state` and returned. A response that is no longer the latest
    /// dispatched search is dropped without touching the state.
    pub async fn load_tools(&self) -> Result<(), Error> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let params = self.state.borrow().filters.to_params();

        self.state
            .send_modify(|state| state.tools_state = FetchState::Loading);

        let result = self.backend.search(&params).await;

        if self.sequence.load(Ordering::SeqCst) != sequence {
            log::debug!("Discarding stale search response #{sequence}");
            return result.map(|_| ());
        }

        match result {
            Ok(response) => {
                self.state.send_modify(|state| {
                    state.total = response.total;
                    state.total_pages = response.total_pages;
                    state.filters.page = response.page;
                    state.tools = response.tools;
                    state.tools_state = FetchState::Loaded;
                    state.generation += 1;
                    state.revision += 1;
                });
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to load tools: {err}");
                self.state
                    .send_modify(|state| state.tools_state = FetchState::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn load_categories(&self) -> Result<(), Error> {
        self.state
            .send_modify(|state| state.categories_state = FetchState::Loading);

        match self.backend.categories().await {
            Ok(categories) => {
                self.state.send_modify(|state| {
                    state.categories = categories;
                    state.categories_state = FetchState::Loaded;
                });
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to load categories: {err}");
                self.state.send_modify(|state| {
                    state.categories_state = FetchState::Error(err.to_string())
                });
                Err(err)
            }
        }
    }

    pub async fn load_featured_tools(&self) -> Result<(), Error> {
        self.state
            .send_modify(|state| state.featured_state = FetchState::Loading);

        match self.backend.featured().await {
            Ok(featured) => {
                self.state.send_modify(|state| {
                    state.featured_tools = featured;
                    state.featured_state = FetchState::Loaded;
                });
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to load featured tools: {err}");
                self.state
                    .send_modify(|state| state.featured_state = FetchState::Error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Upvote a tool optimistically
    ///
    /// The local count is bumped before the remote call. On success it is set
    /// to the server's count. On failure the pre-upvote list is restored when
    /// nothing else touched it in the meantime; otherwise only this tool is
    /// decremented, and a list replaced by a newer load is left alone.
    pub async fn upvote_tool(&self, id: &str) -> Result<u64, Error> {
        let mut snapshot = None;

        self.state.send_if_modified(|state| {
            let Some(index) = state.tools.iter().position(|tool| tool.id == id) else {
                return false;
            };

            snapshot = Some(ToolsSnapshot {
                tools: state.tools.clone(),
                generation: state.generation,
                revision: state.revision,
            });

            let tool = &mut state.tools[index];
            tool.upvotes = tool.upvotes.saturating_add(1);
            state.revision += 1;
            true
        });

        if snapshot.is_none() {
            log::debug!("Tool {id} is not in the current listing, upvoting remotely only");
        }

        match self.backend.upvote(id).await {
            Ok(response) => {
                self.state.send_if_modified(|state| {
                    let Some(tool) = state.tools.iter_mut().find(|tool| tool.id == id) else {
                        return false;
                    };
                    tool.upvotes = response.upvotes;
                    state.revision += 1;
                    true
                });
                Ok(response.upvotes)
            }
            Err(err) => {
                log::warn!("Failed to upvote {id}: {err}");
                if let Some(snapshot) = snapshot {
                    self.rollback_upvote(id, snapshot);
                }
                Err(err)
            }
        }
    }

    fn rollback_upvote(&self, id: &str, snapshot: ToolsSnapshot) {
        self.state.send_if_modified(|state| {
            if state.generation != snapshot.generation {
                log::debug!("Tool list replaced since upvote of {id}, skipping rollback");
                return false;
            }

            if state.revision == snapshot.revision + 1 {
                state.tools = snapshot.tools;
            } else {
                let Some(tool) = state.tools.iter_mut().find(|tool| tool.id == id) else {
                    return false;
                };
                tool.upvotes = tool.upvotes.saturating_sub(1);
            }

            state.revision += 1;
            true
        });
    }
}
