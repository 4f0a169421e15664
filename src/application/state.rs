//! Shared core state.
//!
//! Owns the components that outlive a single delivery and hands them to
//! handlers explicitly instead of through process globals.

use std::sync::Arc;

use serde_json::Value;

use super::cache::FreshnessCache;
use super::dedup::DeliveryGuard;
use super::retry::RetryPolicy;
use super::session::SessionDetector;
use crate::domain::id::EventId;
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, DeliveryDeduplicator, SystemClock};

/// Freshness and liveness core shared by all inbound handlers.
///
/// Cheap to clone; clones share the same cache and guard.
#[derive(Debug, Clone)]
pub struct Core {
    cache: Arc<FreshnessCache<Value>>,
    detector: SessionDetector,
    guard: Arc<DeliveryGuard>,
    retry: RetryPolicy,
}

impl Core {
    /// Build the core from configuration with the system clock.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build the core from configuration with an explicit clock.
    #[must_use]
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let cache = Arc::new(FreshnessCache::new(config.cache.clone(), clock));
        Self {
            detector: SessionDetector::new(Arc::clone(&cache)),
            cache,
            guard: Arc::new(DeliveryGuard::new(&config.dedup)),
            retry: RetryPolicy::new(config.retry.clone()),
        }
    }

    /// Inbound gate: `true` if `id` has not been seen and the delivery
    /// should be handled.
    pub fn admit(&self, id: impl Into<EventId>) -> bool {
        self.guard.try_accept(id.into())
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<FreshnessCache<Value>> {
        &self.cache
    }

    #[must_use]
    pub const fn detector(&self) -> &SessionDetector {
        &self.detector
    }

    #[must_use]
    pub fn guard(&self) -> &DeliveryGuard {
        &self.guard
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}
