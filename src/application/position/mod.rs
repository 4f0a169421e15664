//! Live position reconciliation.

pub mod aggregate;

pub use aggregate::aggregate;
