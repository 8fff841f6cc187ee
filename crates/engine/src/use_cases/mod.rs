//! Use cases: one struct per operation the bot exposes.

pub mod admin;
pub mod catalog;
pub mod collection;
pub mod draw;

pub use admin::GachaAdmin;
pub use catalog::{CatalogError, CatalogService, ReloadSummary};
pub use collection::{CollectionPage, CollectionView, CollectionViewError};
pub use draw::{DrawError, DrawGacha, DrawOutcome, DrawReceipt};
