//! Implementations of ports and entry points (hexagonal adapters).

pub mod inbound;
