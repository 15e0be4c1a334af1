//! Catalog service: current-index ownership and rebuild
//!
//! Owns the "current" [`CatalogIndex`] as an explicit value behind an
//! `RwLock<Arc<_>>`: a rebuild constructs the whole replacement index, then
//! swaps the reference in a single write. Resolver calls work against a
//! snapshot (`Arc` clone), so an in-flight render sees either the old index
//! in full or the new one in full, never a partial rebuild.
//!
//! Overlapping refresh triggers are the caller's problem to coalesce; the
//! service itself does not serialize rebuilds.

use crate::listing::ListingProvider;
use crate::loader::{build_index, CatalogIndex};
use crate::types::{CatalogConfig, CatalogStats};
use spd_common::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared catalog state: the listing provider plus the current index
pub struct CatalogService {
    provider: Arc<dyn ListingProvider>,
    config: CatalogConfig,
    current: RwLock<Arc<CatalogIndex>>,
}

impl CatalogService {
    /// Create a service with an empty index; queries succeed (and miss)
    /// before the first rebuild completes.
    pub fn new(provider: Arc<dyn ListingProvider>, config: CatalogConfig) -> Self {
        Self {
            provider,
            config,
            current: RwLock::new(Arc::new(CatalogIndex::empty())),
        }
    }

    /// Fetch the listing and rebuild the index from scratch.
    ///
    /// The await on the listing fetch is the only suspension point; index
    /// construction runs to completion synchronously. On fetch failure the
    /// previous index is retained unchanged and stays queryable
    /// (stale-but-available), and the error is returned to the caller.
    pub async fn rebuild(&self) -> Result<CatalogStats> {
        let objects = match self.provider.fetch().await {
            Ok(objects) => objects,
            Err(e) => {
                warn!(error = %e, "Listing fetch failed, keeping previous index");
                return Err(e);
            }
        };

        let (index, stats) = build_index(&objects, &self.config);

        *self.current.write().await = Arc::new(index);
        info!(
            objects = objects.len(),
            spaces_with_audio = stats.spaces_with_audio,
            "Catalog index swapped"
        );

        Ok(stats)
    }

    /// The current index snapshot. Callers resolve many spaces against one
    /// snapshot; a concurrent rebuild does not disturb it.
    pub async fn snapshot(&self) -> Arc<CatalogIndex> {
        self.current.read().await.clone()
    }

    /// The configuration slice resolvers share with the loader
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
