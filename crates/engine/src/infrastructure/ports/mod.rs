// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Draw state stores (could swap in-memory -> Redis)
//! - Catalog ingestion (could swap delimited file -> HTTP source)
//! - Image fetching (for the prefetch cache)
//! - Clock/Random (for testing)

mod error;
mod external;
mod stores;
mod testing;

// =============================================================================
// Store Ports
// =============================================================================
pub use stores::*;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{CatalogBatch, CatalogSource, ImageFetchPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use stores::{MockCollectionStore, MockQuotaStore};

#[cfg(test)]
pub use external::{MockCatalogSource, MockImageFetchPort};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{CatalogSourceError, ImageFetchError, StoreError};
