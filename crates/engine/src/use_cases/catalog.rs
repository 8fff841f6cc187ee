//! Catalog snapshot service.
//!
//! Holds the current validated catalog behind an `RwLock` swap. Draws and
//! collection views clone out an `Arc` snapshot and keep using it even if a
//! reload swaps the catalog mid-request.

use std::sync::Arc;

use gashapon_domain::{Catalog, DomainError};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{CatalogSource, CatalogSourceError};

/// Result of one reload.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReloadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] CatalogSourceError),
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Owns the catalog snapshot and its reload path.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    snapshot: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(None),
        }
    }

    /// Current snapshot, if any load has succeeded since startup.
    pub async fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.snapshot.read().await.clone()
    }

    /// Load from the source, validate, and swap the snapshot.
    ///
    /// On any failure the previous snapshot stays in place, so a bad file
    /// never takes a working catalog away.
    pub async fn reload(&self) -> Result<ReloadSummary, CatalogError> {
        let batch = self.source.load().await?;
        let catalog = Catalog::from_entries(batch.entries)?;
        let summary = ReloadSummary {
            loaded: catalog.len(),
            skipped: batch.skipped,
        };

        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(Arc::new(catalog));
        drop(snapshot);

        if summary.skipped > 0 {
            tracing::warn!(
                loaded = summary.loaded,
                skipped = summary.skipped,
                "Catalog reloaded with malformed rows skipped"
            );
        } else {
            tracing::info!(loaded = summary.loaded, "Catalog reloaded");
        }
        Ok(summary)
    }
}
