// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! External service ports: catalog ingestion and image fetching.

use async_trait::async_trait;
use gashapon_domain::CatalogEntry;

use super::error::{CatalogSourceError, ImageFetchError};

/// Parsed catalog rows plus the count of rows rejected during parsing.
#[derive(Debug, Clone)]
pub struct CatalogBatch {
    pub entries: Vec<CatalogEntry>,
    pub skipped: usize,
}

/// Source of catalog rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and parse all rows. Malformed rows are dropped and counted,
    /// never errors; a load only fails when the source itself cannot be
    /// read or decoded.
    async fn load(&self) -> Result<CatalogBatch, CatalogSourceError>;
}

/// Fetcher for prize image bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetch the raw bytes of one image.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError>;
}
