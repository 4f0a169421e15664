//! Delivery deduplication.
//!
//! - [`config::DedupConfig`]: capacity and eviction policy
//! - [`guard::DeliveryGuard`]: bounded, thread-safe processed-id set

pub mod config;
pub mod guard;

pub use config::{DedupConfig, EvictionPolicy};
pub use guard::DeliveryGuard;
