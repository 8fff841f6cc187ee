//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies and the
//! background machinery built on them.

pub mod catalog_file;
pub mod clock;
pub mod image_client;
pub mod ports;
pub mod prefetch;
pub mod scheduler;
