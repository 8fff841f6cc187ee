//! Prize image prefetcher.
//!
//! Warms an in-memory image cache after every catalog reload so draw
//! responses never wait on a download. Failures are absorbed: an image
//! that cannot be fetched after retries is left uncached and the draw
//! flow carries on without it.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures_util::future::join_all;
use gashapon_domain::CatalogEntry;

use crate::infrastructure::ports::ImageFetchPort;

/// In-memory store of fetched image bytes, keyed by URL.
#[derive(Default)]
pub struct ImageCache {
    images: DashMap<String, Vec<u8>>,
}

impl ImageCache {
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.images.get(url).map(|bytes| bytes.clone())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    pub fn insert(&self, url: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(url.into(), bytes);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Configuration for per-image retry behavior.
#[derive(Debug, Clone)]
pub struct PrefetchConfig {
    /// Total attempts per image (first try included).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(2000),
        }
    }
}

/// Tally of one prefetch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    pub fetched: usize,
    pub failed: usize,
    pub skipped: usize,
}

enum FetchOutcome {
    Fetched,
    Failed,
    Skipped,
}

/// Downloads catalog images concurrently into the cache.
pub struct Prefetcher {
    fetcher: Arc<dyn ImageFetchPort>,
    cache: Arc<ImageCache>,
    config: PrefetchConfig,
}

impl Prefetcher {
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, cache: Arc<ImageCache>, config: PrefetchConfig) -> Self {
        Self {
            fetcher,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> Arc<ImageCache> {
        Arc::clone(&self.cache)
    }

    /// Fetch every entry's image concurrently. Already-cached URLs are
    /// skipped, so calling this after each reload only downloads new prizes.
    pub async fn prefetch(&self, entries: &[CatalogEntry]) -> PrefetchReport {
        let outcomes = join_all(entries.iter().map(|entry| self.fetch_one(entry))).await;

        let mut report = PrefetchReport::default();
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Fetched => report.fetched += 1,
                FetchOutcome::Failed => report.failed += 1,
                FetchOutcome::Skipped => report.skipped += 1,
            }
        }

        tracing::info!(
            fetched = report.fetched,
            failed = report.failed,
            skipped = report.skipped,
            "Image prefetch finished"
        );
        report
    }

    async fn fetch_one(&self, entry: &CatalogEntry) -> FetchOutcome {
        if self.cache.contains(&entry.image_url) {
            return FetchOutcome::Skipped;
        }

        for attempt in 1..=self.config.max_attempts {
            match self.fetcher.fetch(&entry.image_url).await {
                Ok(bytes) => {
                    if attempt > 1 {
                        tracing::info!(
                            entry = %entry.id,
                            attempt,
                            "Image fetch succeeded after retry"
                        );
                    }
                    self.cache.insert(entry.image_url.clone(), bytes);
                    return FetchOutcome::Fetched;
                }
                Err(e) if attempt < self.config.max_attempts => {
                    tracing::warn!(
                        entry = %entry.id,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        error = %e,
                        "Image fetch failed, retrying..."
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        entry = %entry.id,
                        attempts = self.config.max_attempts,
                        error = %e,
                        "Image fetch failed after all attempts, leaving entry uncached"
                    );
                }
            }
        }
        FetchOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use gashapon_domain::{EntryId, Rarity};

    use super::*;
    use crate::infrastructure::ports::ImageFetchError;

    /// Fetcher that fails a configurable number of times before succeeding.
    struct FailingMockFetcher {
        failures_remaining: AtomicU32,
        error: ImageFetchError,
    }

    impl FailingMockFetcher {
        fn new(failure_count: u32) -> Self {
            Self {
                failures_remaining: AtomicU32::new(failure_count),
                error: ImageFetchError::RequestFailed("connection reset".to_string()),
            }
        }
    }

    #[async_trait]
    impl ImageFetchPort for FailingMockFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
            let remaining = self.failures_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_remaining.fetch_sub(1, Ordering::SeqCst);
                Err(self.error.clone())
            } else {
                Ok(url.as_bytes().to_vec())
            }
        }
    }

    /// Fetcher that fails only for one specific URL.
    struct SelectiveFetcher {
        failing_url: String,
    }

    #[async_trait]
    impl ImageFetchPort for SelectiveFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
            if url == self.failing_url {
                Err(ImageFetchError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            } else {
                Ok(url.as_bytes().to_vec())
            }
        }
    }

    fn entry(id: &str, url: &str) -> CatalogEntry {
        CatalogEntry {
            id: EntryId::new(id),
            name: id.to_string(),
            title: "Gacha!".to_string(),
            rarity: Rarity::Common,
            image_url: url.to_string(),
            weight: 1.0,
        }
    }

    fn fast_config() -> PrefetchConfig {
        PrefetchConfig {
            max_attempts: 3,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn caches_after_transient_failures() {
        let fetcher = Arc::new(FailingMockFetcher::new(2));
        let cache = Arc::new(ImageCache::default());
        let prefetcher = Prefetcher::new(fetcher, Arc::clone(&cache), fast_config());

        let report = prefetcher
            .prefetch(&[entry("prize_a", "https://img.example/a.png")])
            .await;

        assert_eq!(report.fetched, 1);
        assert_eq!(report.failed, 0);
        assert!(cache.contains("https://img.example/a.png"));
    }

    #[tokio::test]
    async fn gives_up_after_all_attempts() {
        let fetcher = Arc::new(FailingMockFetcher::new(10));
        let cache = Arc::new(ImageCache::default());
        let prefetcher = Prefetcher::new(fetcher, Arc::clone(&cache), fast_config());

        let report = prefetcher
            .prefetch(&[entry("prize_a", "https://img.example/a.png")])
            .await;

        assert_eq!(report.fetched, 0);
        assert_eq!(report.failed, 1);
        assert!(!cache.contains("https://img.example/a.png"));
    }

    #[tokio::test]
    async fn one_failing_image_does_not_block_the_rest() {
        let fetcher = Arc::new(SelectiveFetcher {
            failing_url: "https://img.example/broken.png".to_string(),
        });
        let cache = Arc::new(ImageCache::default());
        let prefetcher = Prefetcher::new(fetcher, Arc::clone(&cache), fast_config());

        let report = prefetcher
            .prefetch(&[
                entry("prize_a", "https://img.example/a.png"),
                entry("prize_b", "https://img.example/broken.png"),
                entry("prize_c", "https://img.example/c.png"),
            ])
            .await;

        assert_eq!(report.fetched, 2);
        assert_eq!(report.failed, 1);
        assert!(cache.contains("https://img.example/a.png"));
        assert!(cache.contains("https://img.example/c.png"));
        assert!(!cache.contains("https://img.example/broken.png"));
    }

    #[tokio::test]
    async fn cached_urls_are_skipped() {
        let fetcher = Arc::new(FailingMockFetcher::new(u32::MAX));
        let cache = Arc::new(ImageCache::default());
        cache.insert("https://img.example/a.png", vec![1, 2, 3]);
        let prefetcher = Prefetcher::new(fetcher, Arc::clone(&cache), fast_config());

        let report = prefetcher
            .prefetch(&[entry("prize_a", "https://img.example/a.png")])
            .await;

        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(cache.get("https://img.example/a.png"), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn shared_urls_are_fetched_once_across_runs() {
        let fetcher = Arc::new(FailingMockFetcher::new(0));
        let cache = Arc::new(ImageCache::default());
        let prefetcher = Prefetcher::new(fetcher, Arc::clone(&cache), fast_config());

        let first = prefetcher
            .prefetch(&[entry("prize_a", "https://img.example/a.png")])
            .await;
        let second = prefetcher
            .prefetch(&[
                entry("prize_a", "https://img.example/a.png"),
                entry("prize_b", "https://img.example/b.png"),
            ])
            .await;

        assert_eq!(first.fetched, 1);
        assert_eq!(second.fetched, 1);
        assert_eq!(second.skipped, 1);
        assert_eq!(cache.len(), 2);
    }
}
