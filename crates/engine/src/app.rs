// App struct holds shared handles - some fields for future features
#![allow(dead_code)]

//! Application state and composition.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{CatalogSource, ClockPort, CollectionStore, ImageFetchPort, QuotaStore, RandomPort},
    prefetch::{ImageCache, PrefetchConfig, Prefetcher},
    scheduler::ResetScheduler,
};
use crate::use_cases::{CatalogService, CollectionView, DrawGacha, GachaAdmin};

/// Wiring knobs read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub collection_page_size: usize,
    pub reset_tz: FixedOffset,
    pub prefetch: PrefetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection_page_size: 20,
            // JST, where the bot's communities live.
            reset_tz: FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix()),
            prefetch: PrefetchConfig::default(),
        }
    }
}

/// Main application state.
///
/// Holds the stores and use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub stores: Stores,
    pub use_cases: UseCases,
    pub scheduler: Arc<ResetScheduler>,
    pub image_cache: Arc<ImageCache>,
    pub prefetcher: Arc<Prefetcher>,
}

/// Container for the injected state stores.
pub struct Stores {
    pub quota: Arc<dyn QuotaStore>,
    pub collection: Arc<dyn CollectionStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub draw: Arc<DrawGacha>,
    pub collection: Arc<CollectionView>,
    pub catalog: Arc<CatalogService>,
    pub admin: Arc<GachaAdmin>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        catalog_source: Arc<dyn CatalogSource>,
        image_fetcher: Arc<dyn ImageFetchPort>,
        quota: Arc<dyn QuotaStore>,
        collection: Arc<dyn CollectionStore>,
        config: AppConfig,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

        let catalog = Arc::new(CatalogService::new(catalog_source));
        let image_cache = Arc::new(ImageCache::default());
        let prefetcher = Arc::new(Prefetcher::new(
            image_fetcher,
            Arc::clone(&image_cache),
            config.prefetch,
        ));
        let scheduler = Arc::new(ResetScheduler::new(
            Arc::clone(&quota),
            clock,
            config.reset_tz,
        ));

        let draw = Arc::new(DrawGacha::new(
            Arc::clone(&catalog),
            Arc::clone(&quota),
            Arc::clone(&collection),
            random,
        ));
        let collection_view = Arc::new(CollectionView::new(
            Arc::clone(&catalog),
            Arc::clone(&collection),
            config.collection_page_size,
        ));
        let admin = Arc::new(GachaAdmin::new(
            Arc::clone(&quota),
            Arc::clone(&scheduler),
            Arc::clone(&catalog),
            Arc::clone(&prefetcher),
        ));

        Self {
            stores: Stores { quota, collection },
            use_cases: UseCases {
                draw,
                collection: collection_view,
                catalog,
                admin,
            },
            scheduler,
            image_cache,
            prefetcher,
        }
    }
}
