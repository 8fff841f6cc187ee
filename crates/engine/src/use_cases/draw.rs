//! Draw use case: the single-draw flow.
//!
//! Ordering matters here. The catalog snapshot is taken first so a missing
//! catalog costs no quota, then the quota slot is consumed, and only then is
//! the roll made against the snapshot already in hand.

use std::sync::Arc;

use gashapon_domain::{CatalogEntry, DomainError, UserId};
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::ports::{CollectionStore, QuotaStore, RandomPort, StoreError};
use crate::use_cases::catalog::CatalogService;

/// A completed draw.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReceipt {
    pub receipt_id: Uuid,
    pub entry: CatalogEntry,
    /// Draws left after this one.
    pub remaining: u32,
    /// True when this prize was not in the user's collection before.
    pub newly_collected: bool,
}

/// Outcome of a draw attempt. Running out of quota and having no catalog
/// are ordinary outcomes the caller renders, not errors.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrawOutcome {
    Prize(DrawReceipt),
    QuotaExceeded { remaining: u32 },
    CatalogUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] DomainError),
}

/// Executes single draws.
pub struct DrawGacha {
    catalog: Arc<CatalogService>,
    quota: Arc<dyn QuotaStore>,
    collection: Arc<dyn CollectionStore>,
    random: Arc<dyn RandomPort>,
}

impl DrawGacha {
    pub fn new(
        catalog: Arc<CatalogService>,
        quota: Arc<dyn QuotaStore>,
        collection: Arc<dyn CollectionStore>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            catalog,
            quota,
            collection,
            random,
        }
    }

    pub async fn execute(&self, user: UserId) -> Result<DrawOutcome, DrawError> {
        let Some(catalog) = self.catalog.snapshot().await else {
            tracing::warn!(%user, "Draw attempted with no catalog loaded");
            return Ok(DrawOutcome::CatalogUnavailable);
        };

        let outcome = self.quota.try_consume(user).await?;
        if !outcome.allowed {
            tracing::info!(%user, "Draw denied, quota exhausted");
            return Ok(DrawOutcome::QuotaExceeded {
                remaining: outcome.remaining,
            });
        }

        let roll = self.random.roll(catalog.total_weight());
        let entry = catalog.pick(roll)?.clone();
        let newly_collected = self
            .collection
            .record_if_new(user, entry.id.clone())
            .await?;

        let receipt = DrawReceipt {
            receipt_id: self.random.gen_uuid(),
            entry,
            remaining: outcome.remaining,
            newly_collected,
        };
        tracing::info!(
            %user,
            receipt_id = %receipt.receipt_id,
            entry = %receipt.entry.id,
            rarity = %receipt.entry.rarity,
            remaining = receipt.remaining,
            newly_collected = receipt.newly_collected,
            "Draw completed"
        );
        Ok(DrawOutcome::Prize(receipt))
    }
}
