// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform roll in `[0, total)`. Callers only pass positive totals.
    fn roll(&self, total: f64) -> f64;
    fn gen_uuid(&self) -> Uuid;
}
