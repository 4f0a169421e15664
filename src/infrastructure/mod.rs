//! Infrastructure layer.
//!
//! Provides technical concerns that support the core without containing
//! freshness or liveness logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup

pub mod config;
