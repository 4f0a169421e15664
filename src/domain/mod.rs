//! Upstream-agnostic value types for the freshness and liveness core.
//!
//! - [`id`]: event and cache-key identifiers
//! - [`session`]: scheduled sessions and the live-window predicate
//! - [`position`]: position records and ranked snapshots
//! - [`time`]: upstream timestamp parsing
//! - [`error`]: conversion errors for malformed upstream records

pub mod error;
pub mod id;
pub mod position;
pub mod session;
pub mod time;

pub use error::DomainError;
pub use id::{CacheKey, EventId};
pub use position::{PositionRecord, PositionSample, PositionSnapshot, Rank, RankedEntry};
pub use session::{schedule_years, SessionRecord, SessionWindow};
