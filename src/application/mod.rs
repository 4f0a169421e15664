//! Application layer: the freshness and liveness core.
//!
//! - [`cache`]: freshness cache and its TTL table
//! - [`session`]: live session detection (cache-backed)
//! - [`position`]: position aggregation into ranked snapshots
//! - [`dedup`]: at-most-once delivery guard
//! - [`retry`]: bounded retry with exponential backoff
//! - [`state`]: [`state::Core`], the composed, shareable core

pub mod cache;
pub mod dedup;
pub mod position;
pub mod retry;
pub mod session;
pub mod state;
