//! Delivery deduplication port.
//!
//! Inbound transports may redeliver the same event (webhook retries, polling
//! overlap). Implementations remember recently accepted ids so a redelivery
//! is processed at most once.

use crate::domain::id::EventId;

/// Port for suppressing redelivered inbound events.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) as deliveries are
/// handled concurrently.
pub trait DeliveryDeduplicator: Send + Sync {
    /// Check whether `id` has already been accepted.
    fn already_processed(&self, id: &EventId) -> bool;

    /// Record `id` as processed, applying the eviction policy if the
    /// configured capacity is exceeded.
    fn mark_processed(&self, id: EventId);

    /// Atomically check and record `id`.
    ///
    /// Returns `true` if this is the first delivery and the caller should
    /// process it, `false` if it is a duplicate. Two concurrent calls with
    /// the same id never both return `true`.
    fn try_accept(&self, id: EventId) -> bool;

    /// Number of ids currently remembered.
    fn len(&self) -> usize;

    /// Whether no ids are remembered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
