//! Test helpers shared by unit and integration tests.

pub mod clock;
pub mod domain;
