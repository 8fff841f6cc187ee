//! API entry points.

pub mod http;
