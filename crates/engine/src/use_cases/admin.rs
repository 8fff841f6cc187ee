//! Administrative operations: quota resets, the reset schedule, and
//! catalog reload with cache warming.

use std::sync::Arc;

use chrono::NaiveDateTime;
use gashapon_domain::{ResetSchedule, UserId};

use crate::infrastructure::ports::{QuotaStore, StoreError};
use crate::infrastructure::prefetch::Prefetcher;
use crate::infrastructure::scheduler::ResetScheduler;
use crate::use_cases::catalog::{CatalogError, CatalogService, ReloadSummary};

pub struct GachaAdmin {
    quota: Arc<dyn QuotaStore>,
    scheduler: Arc<ResetScheduler>,
    catalog: Arc<CatalogService>,
    prefetcher: Arc<Prefetcher>,
}

impl GachaAdmin {
    pub fn new(
        quota: Arc<dyn QuotaStore>,
        scheduler: Arc<ResetScheduler>,
        catalog: Arc<CatalogService>,
        prefetcher: Arc<Prefetcher>,
    ) -> Self {
        Self {
            quota,
            scheduler,
            catalog,
            prefetcher,
        }
    }

    /// Restore one user's full allowance ahead of the weekly reset.
    pub async fn reset_user(&self, user: UserId) -> Result<u32, StoreError> {
        let remaining = self.quota.reset(user).await?;
        tracing::info!(%user, remaining, "Quota reset by admin");
        Ok(remaining)
    }

    /// Restore every tracked user's allowance.
    pub async fn reset_all(&self) -> Result<usize, StoreError> {
        let users_reset = self.quota.reset_all().await?;
        tracing::info!(users_reset, "All quotas reset by admin");
        Ok(users_reset)
    }

    /// Arm the weekly reset schedule. Returns the next fire time.
    pub async fn set_schedule(&self, schedule: ResetSchedule) -> NaiveDateTime {
        self.scheduler.set_schedule(schedule).await
    }

    pub async fn schedule_status(&self) -> Option<(ResetSchedule, NaiveDateTime)> {
        self.scheduler.status().await
    }

    /// Reload the catalog, then warm the image cache in the background.
    /// The reload result does not wait on image downloads.
    pub async fn reload_catalog(&self) -> Result<ReloadSummary, CatalogError> {
        let summary = self.catalog.reload().await?;
        if let Some(catalog) = self.catalog.snapshot().await {
            let prefetcher = Arc::clone(&self.prefetcher);
            tokio::spawn(async move {
                prefetcher.prefetch(catalog.entries()).await;
            });
        }
        Ok(summary)
    }
}
