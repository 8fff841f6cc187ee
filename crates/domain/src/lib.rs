extern crate self as gashapon_domain;

pub mod catalog;
pub mod error;
pub mod ids;
pub mod rarity;
pub mod schedule;

pub use catalog::{Catalog, CatalogEntry};
pub use error::DomainError;
pub use ids::{EntryId, UserId};
pub use rarity::Rarity;
pub use schedule::ResetSchedule;
