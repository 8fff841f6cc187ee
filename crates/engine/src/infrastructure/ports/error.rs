// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! Error types for port operations.

/// Store operation errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }
}

/// Catalog source failures. The source itself was unreadable; malformed
/// rows inside a readable source are skipped and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("Failed to read catalog source {path}: {message}")]
    Io { path: String, message: String },

    #[error("Catalog source {path} is not decodable text")]
    Undecodable { path: String },
}

impl CatalogSourceError {
    /// Create an Io error with path context.
    pub fn io(path: impl ToString, message: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an Undecodable error.
    pub fn undecodable(path: impl ToString) -> Self {
        Self::Undecodable {
            path: path.to_string(),
        }
    }
}

/// Image fetch failures. Absorbed by the prefetcher after retries; a failed
/// image only costs the cache entry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageFetchError {
    #[error("Image request failed: {0}")]
    RequestFailed(String),

    #[error("Image fetch returned status {status} for {url}")]
    Status { status: u16, url: String },
}
