//! Collection view: the full catalog, paged, with ownership flags.
//!
//! Every catalog entry appears whether owned or not, so the view doubles
//! as a want-list. Page numbers out of range clamp to the nearest valid
//! page instead of erroring.

use std::sync::Arc;

use gashapon_domain::{CatalogEntry, UserId};
use serde::Serialize;

use crate::infrastructure::ports::{CollectionStore, StoreError};
use crate::use_cases::catalog::CatalogService;

/// One catalog entry with the viewer's ownership flag.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionItem {
    pub entry: CatalogEntry,
    pub owned: bool,
}

/// One page of the collection view.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionPage {
    /// Zero-based page actually rendered (after clamping).
    pub page: usize,
    pub total_pages: usize,
    /// Owned prizes still present in the current catalog.
    pub total_owned: usize,
    pub total_entries: usize,
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum CollectionViewError {
    #[error("No catalog loaded")]
    CatalogUnavailable,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Renders paged collection views.
pub struct CollectionView {
    catalog: Arc<CatalogService>,
    collection: Arc<dyn CollectionStore>,
    page_size: usize,
}

impl CollectionView {
    pub fn new(
        catalog: Arc<CatalogService>,
        collection: Arc<dyn CollectionStore>,
        page_size: usize,
    ) -> Self {
        Self {
            catalog,
            collection,
            page_size: page_size.max(1),
        }
    }

    pub async fn execute(
        &self,
        user: UserId,
        page: usize,
    ) -> Result<CollectionPage, CollectionViewError> {
        let catalog = self
            .catalog
            .snapshot()
            .await
            .ok_or(CollectionViewError::CatalogUnavailable)?;
        let owned = self.collection.owned(user).await?;

        let total_entries = catalog.len();
        let total_pages = total_entries.div_ceil(self.page_size).max(1);
        let page = page.min(total_pages - 1);

        let items: Vec<CollectionItem> = catalog
            .entries()
            .iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .map(|entry| CollectionItem {
                owned: owned.contains(&entry.id),
                entry: entry.clone(),
            })
            .collect();
        let total_owned = catalog
            .entries()
            .iter()
            .filter(|entry| owned.contains(&entry.id))
            .count();

        Ok(CollectionPage {
            page,
            total_pages,
            total_owned,
            total_entries,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use gashapon_domain::{EntryId, Rarity};

    use super::*;
    use crate::infrastructure::ports::{CatalogBatch, MockCatalogSource, MockCollectionStore};

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: EntryId::new(id),
            name: format!("Prize {id}"),
            title: "Gacha!".to_string(),
            rarity: Rarity::Common,
            image_url: format!("https://img.example/{id}.png"),
            weight: 1.0,
        }
    }

    async fn loaded_catalog(ids: &[&str]) -> Arc<CatalogService> {
        let entries: Vec<CatalogEntry> = ids.iter().map(|id| entry(id)).collect();
        let mut source = MockCatalogSource::new();
        source
            .expect_load()
            .returning(move || Ok(CatalogBatch {
                entries: entries.clone(),
                skipped: 0,
            }));
        let service = Arc::new(CatalogService::new(Arc::new(source)));
        service.reload().await.expect("catalog loads");
        service
    }

    fn owning(ids: &[&str]) -> MockCollectionStore {
        let owned: HashSet<EntryId> = ids.iter().map(|id| EntryId::new(*id)).collect();
        let mut collection = MockCollectionStore::new();
        collection
            .expect_owned()
            .returning(move |_| Ok(owned.clone()));
        collection
    }

    #[tokio::test]
    async fn first_page_flags_owned_entries() {
        let catalog = loaded_catalog(&["a", "b", "c"]).await;
        let view = CollectionView::new(catalog, Arc::new(owning(&["b"])), 20);

        let page = view.execute(UserId::new(7), 0).await.unwrap();

        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_entries, 3);
        assert_eq!(page.total_owned, 1);
        let flags: Vec<bool> = page.items.iter().map(|item| item.owned).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[tokio::test]
    async fn pages_split_at_the_configured_size() {
        let catalog = loaded_catalog(&["a", "b", "c", "d", "e"]).await;
        let view = CollectionView::new(catalog, Arc::new(owning(&[])), 2);

        let page = view.execute(UserId::new(7), 1).await.unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].entry.id.as_str(), "c");
        assert_eq!(page.items[1].entry.id.as_str(), "d");
    }

    #[tokio::test]
    async fn out_of_range_page_clamps_to_the_last() {
        let catalog = loaded_catalog(&["a", "b", "c"]).await;
        let view = CollectionView::new(catalog, Arc::new(owning(&[])), 2);

        let page = view.execute(UserId::new(7), 99).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].entry.id.as_str(), "c");
    }

    #[tokio::test]
    async fn owned_ids_no_longer_in_the_catalog_are_not_counted() {
        let catalog = loaded_catalog(&["a", "b"]).await;
        let view = CollectionView::new(catalog, Arc::new(owning(&["a", "retired_prize"])), 20);

        let page = view.execute(UserId::new(7), 0).await.unwrap();

        assert_eq!(page.total_owned, 1);
    }

    #[tokio::test]
    async fn missing_catalog_is_reported() {
        let mut source = MockCatalogSource::new();
        source.expect_load().times(0);
        let catalog = Arc::new(CatalogService::new(Arc::new(source)));
        let view = CollectionView::new(catalog, Arc::new(owning(&[])), 20);

        let err = view.execute(UserId::new(7), 0).await.unwrap_err();

        assert!(matches!(err, CollectionViewError::CatalogUnavailable));
    }
}
