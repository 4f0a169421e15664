//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`Clock`] - Source of the current instant
//! - [`DeliveryDeduplicator`] - At-most-once gate for inbound deliveries

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::dedup::DeliveryDeduplicator;
