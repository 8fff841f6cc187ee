//! Gashapon Engine library.
//!
//! This crate contains all server-side code for the gacha draw engine.
//!
//! ## Structure
//!
//! - `stores/` - In-memory state behind the store ports
//! - `use_cases/` - Draw, collection view, catalog, and admin orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
