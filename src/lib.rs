//! Pitwall - freshness and liveness core for a motorsport statistics bot.
//!
//! The surrounding bot answers chat queries by calling public data APIs.
//! This crate holds the parts of that system with real invariants:
//!
//! - **Freshness cache** - decides whether previously fetched data may still
//!   be served without a new upstream call
//! - **Session window detector** - decides whether a live session is in
//!   progress, gating live-data fetches
//! - **Position aggregator** - merges noisy, out-of-order position updates
//!   into one ranked snapshot
//! - **Delivery dedup guard** - processes a redelivered inbound event at most
//!   once
//!
//! # Modules
//!
//! - [`domain`] - Value types: sessions, position records, snapshots, ids
//! - [`port`] - Traits at the seams: clock, delivery deduplicator
//! - [`application`] - The four components plus bounded retry and [`application::state::Core`]
//! - [`infrastructure`] - TOML configuration and logging
//! - [`adapter`] - Command-line adapter
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use pitwall::application::cache::namespace;
//! use pitwall::application::state::Core;
//! use pitwall::infrastructure::config::settings::Config;
//!
//! let core = Core::from_config(&Config::default());
//! if core.admit(812_345_i64) {
//!     let standings = core
//!         .cache()
//!         .get_or_compute(namespace::STANDINGS, || serde_json::json!("fetched"))
//!         .unwrap();
//!     println!("{standings}");
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
