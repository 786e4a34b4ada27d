//! Objects panel: debounced catalog search and asset selection.
//!
//! DESIGN
//! ======
//! Every search and fetch runs on its own tokio task and reports back through
//! an unbounded channel of [`PanelEvent`]s. Two shared values decide whether a
//! finished task may still deliver:
//!
//! - `generation` is bumped by every query change and by `unmount`. A search
//!   delivers only if the generation it captured is still current, so only
//!   the last stable query's results are ever shown.
//! - `mounted` is cleared by `unmount`. Nothing is delivered afterwards.
//!
//! Failures are logged and dropped; the panel keeps its previous results.

#[cfg(test)]
#[path = "objects_test.rs"]
mod objects_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::canvas::ObjectDescriptor;
use crate::catalog::{Catalog, CatalogItem};
use crate::config::CatalogConfig;
use crate::consts::DEFAULT_SEARCH_QUERY;

/// Output of the objects panel, consumed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Replace the displayed search results.
    Results(Vec<CatalogItem>),
    /// The user picked an item; add it to the canvas.
    AddObject(ObjectDescriptor),
}

pub struct ObjectsPanel {
    catalog: Arc<dyn Catalog>,
    events: mpsc::UnboundedSender<PanelEvent>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    mounted: Arc<AtomicBool>,
}

impl ObjectsPanel {
    /// Create an unmounted panel and the receiver for its events.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, debounce: Duration) -> (Self, mpsc::UnboundedReceiver<PanelEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let panel = Self {
            catalog,
            events,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            mounted: Arc::new(AtomicBool::new(false)),
        };
        (panel, rx)
    }

    /// Same as [`ObjectsPanel::new`] with the debounce from `config`.
    #[must_use]
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &CatalogConfig) -> (Self, mpsc::UnboundedReceiver<PanelEvent>) {
        Self::new(catalog, Duration::from_millis(config.debounce_ms))
    }

    /// Mark the panel live and run the default search immediately.
    pub fn mount(&self) -> JoinHandle<()> {
        self.mounted.store(true, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.spawn_search(DEFAULT_SEARCH_QUERY.to_string(), generation, Duration::ZERO)
    }

    /// Record a new query. The search runs once the query has been stable
    /// for the debounce interval. Blank queries never search.
    pub fn set_query(&self, query: impl Into<String>) -> JoinHandle<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.spawn_search(query.into(), generation, self.debounce)
    }

    /// Fetch the chosen item and emit an add-object request for it.
    pub fn choose(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();
        let mounted = Arc::clone(&self.mounted);
        tokio::spawn(async move {
            let source = match catalog.fetch_asset(&id).await {
                Ok(source) => source,
                Err(e) => {
                    warn!(error = %e, item = %id, "catalog fetch failed");
                    return;
                }
            };
            if !mounted.load(Ordering::SeqCst) {
                debug!(item = %id, "fetch finished after unmount; dropped");
                return;
            }
            deliver(&events, PanelEvent::AddObject(ObjectDescriptor::svg(source)));
        })
    }

    /// Stop delivering results. In-flight tasks finish but emit nothing.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    fn spawn_search(&self, query: String, generation: u64, delay: Duration) -> JoinHandle<()> {
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();
        let current = Arc::clone(&self.generation);
        let mounted = Arc::clone(&self.mounted);
        let live = move || mounted.load(Ordering::SeqCst) && current.load(Ordering::SeqCst) == generation;

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if !live() || query.trim().is_empty() {
                return;
            }
            let items = match catalog.search(&query).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, query = %query, "catalog search failed");
                    return;
                }
            };
            if !live() {
                debug!(query = %query, "stale search results dropped");
                return;
            }
            deliver(&events, PanelEvent::Results(items));
        })
    }
}

impl std::fmt::Debug for ObjectsPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectsPanel")
            .field("debounce", &self.debounce)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

fn deliver(events: &mpsc::UnboundedSender<PanelEvent>, event: PanelEvent) {
    if events.send(event).is_err() {
        debug!("panel receiver closed; event dropped");
    }
}
