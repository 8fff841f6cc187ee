// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! Store port traits for per-user draw state.

use std::collections::HashSet;

use async_trait::async_trait;
use gashapon_domain::{EntryId, UserId};

use super::error::StoreError;

/// Result of a quota consumption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeOutcome {
    /// Whether a draw slot was granted.
    pub allowed: bool,
    /// Draws left after this attempt.
    pub remaining: u32,
}

/// Per-user draw allowance.
///
/// The check-and-decrement in `try_consume` must not suspend in between;
/// implementations keep the whole read-check-write under one guard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Atomically consume one draw if any remain. Users start at the
    /// configured maximum on first access; a denied attempt mutates nothing.
    async fn try_consume(&self, user: UserId) -> Result<ConsumeOutcome, StoreError>;

    /// Remaining draws without consuming. Untracked users report the maximum.
    async fn remaining(&self, user: UserId) -> Result<u32, StoreError>;

    /// Restore a single user to the full allowance, creating the record if
    /// needed. Returns the restored count.
    async fn reset(&self, user: UserId) -> Result<u32, StoreError>;

    /// Restore every tracked user to the full allowance. Returns how many
    /// records were reset. Untracked users are not pre-created.
    async fn reset_all(&self) -> Result<usize, StoreError>;
}

/// Per-user set of owned prizes. Grows monotonically; nothing removes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Record ownership. Returns true when the prize was not owned before.
    async fn record_if_new(&self, user: UserId, entry: EntryId) -> Result<bool, StoreError>;

    /// Snapshot of the prizes a user owns.
    async fn owned(&self, user: UserId) -> Result<HashSet<EntryId>, StoreError>;
}
