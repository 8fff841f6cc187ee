//! In-memory quota store.

use async_trait::async_trait;
use dashmap::DashMap;
use gashapon_domain::UserId;

use crate::infrastructure::ports::{ConsumeOutcome, QuotaStore, StoreError};

/// DashMap-backed quota store. Values are draws remaining.
///
/// `try_consume` does its whole check-and-decrement under one shard entry
/// guard with no await inside, so concurrent draws for the same user
/// serialize and the count can never go below zero.
pub struct InMemoryQuotaStore {
    remaining: DashMap<UserId, u32>,
    max_per_user: u32,
}

impl InMemoryQuotaStore {
    pub fn new(max_per_user: u32) -> Self {
        Self {
            remaining: DashMap::new(),
            max_per_user,
        }
    }

    pub fn max_per_user(&self) -> u32 {
        self.max_per_user
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn try_consume(&self, user: UserId) -> Result<ConsumeOutcome, StoreError> {
        let mut entry = self.remaining.entry(user).or_insert(self.max_per_user);
        if *entry == 0 {
            return Ok(ConsumeOutcome {
                allowed: false,
                remaining: 0,
            });
        }
        *entry -= 1;
        Ok(ConsumeOutcome {
            allowed: true,
            remaining: *entry,
        })
    }

    async fn remaining(&self, user: UserId) -> Result<u32, StoreError> {
        Ok(self
            .remaining
            .get(&user)
            .map(|entry| *entry)
            .unwrap_or(self.max_per_user))
    }

    async fn reset(&self, user: UserId) -> Result<u32, StoreError> {
        self.remaining.insert(user, self.max_per_user);
        Ok(self.max_per_user)
    }

    async fn reset_all(&self) -> Result<usize, StoreError> {
        let mut count = 0;
        for mut entry in self.remaining.iter_mut() {
            *entry = self.max_per_user;
            count += 1;
        }
        Ok(count)
    }
}
