//! In-memory state storage modules.
//!
//! Stores hold the per-user draw state for the lifetime of the process:
//! - `InMemoryQuotaStore` - draws remaining per user
//! - `InMemoryCollectionStore` - owned prizes per user

pub mod collection;
pub mod quota;

// Re-export store types
pub use collection::InMemoryCollectionStore;
pub use quota::InMemoryQuotaStore;
