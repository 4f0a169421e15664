//! Freshness cache for upstream payloads.
//!
//! - [`config::CacheConfig`]: namespace to TTL table, fixed at startup
//! - [`freshness::FreshnessCache`]: concurrent keyed store answering "may this
//!   value still be served"

pub mod config;
pub mod freshness;

pub use config::{namespace, CacheConfig};
pub use freshness::{CacheEntry, FreshnessCache};
