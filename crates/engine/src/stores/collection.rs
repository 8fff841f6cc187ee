//! In-memory collection store.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use gashapon_domain::{EntryId, UserId};

use crate::infrastructure::ports::{CollectionStore, StoreError};

/// DashMap-backed collection store. One grow-only owned-set per user.
#[derive(Default)]
pub struct InMemoryCollectionStore {
    owned: DashMap<UserId, HashSet<EntryId>>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn record_if_new(&self, user: UserId, entry: EntryId) -> Result<bool, StoreError> {
        let mut set = self.owned.entry(user).or_default();
        Ok(set.insert(entry))
    }

    async fn owned(&self, user: UserId) -> Result<HashSet<EntryId>, StoreError> {
        Ok(self
            .owned
            .get(&user)
            .map(|set| set.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_record_is_new_second_is_not() {
        let store = InMemoryCollectionStore::new();
        let user = UserId::new(1);

        assert!(store
            .record_if_new(user, EntryId::new("a"))
            .await
            .unwrap());
        assert!(!store
            .record_if_new(user, EntryId::new("a"))
            .await
            .unwrap());

        let owned = store.owned(user).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert!(owned.contains(&EntryId::new("a")));
    }

    #[tokio::test]
    async fn collections_are_per_user() {
        let store = InMemoryCollectionStore::new();
        store
            .record_if_new(UserId::new(1), EntryId::new("a"))
            .await
            .unwrap();

        assert!(store.owned(UserId::new(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owned_returns_a_snapshot() {
        let store = InMemoryCollectionStore::new();
        let user = UserId::new(1);
        store.record_if_new(user, EntryId::new("a")).await.unwrap();

        let snapshot = store.owned(user).await.unwrap();
        store.record_if_new(user, EntryId::new("b")).await.unwrap();

        // The earlier snapshot is unaffected by later draws.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.owned(user).await.unwrap().len(), 2);
    }
}
