//! Outbound ports (driven side): interfaces the core depends on.

pub mod clock;
pub mod dedup;
