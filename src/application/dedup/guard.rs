//! At-most-once gate for inbound deliveries.
//!
//! Implements [`DeliveryDeduplicator`] over a bounded set of recently
//! accepted ids. Membership, insertion and eviction all happen inside one
//! critical section, so concurrent deliveries of the same id cannot both be
//! accepted.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::config::{DedupConfig, EvictionPolicy};
use crate::domain::id::EventId;
use crate::port::DeliveryDeduplicator;

/// Remembered ids in insertion order.
#[derive(Debug, Default)]
struct ProcessedIds {
    members: HashSet<EventId>,
    order: VecDeque<EventId>,
}

impl ProcessedIds {
    /// Insert `id`; returns `false` if it was already present.
    fn insert(&mut self, id: EventId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push_back(id);
        true
    }

    fn evict(&mut self, capacity: usize, policy: EvictionPolicy) {
        if self.members.len() <= capacity {
            return;
        }
        match policy {
            EvictionPolicy::Fifo => {
                while self.members.len() > capacity {
                    let Some(oldest) = self.order.pop_front() else {
                        break;
                    };
                    self.members.remove(&oldest);
                    debug!(id = %oldest, "evicted oldest processed id");
                }
            }
            EvictionPolicy::ClearAll => {
                warn!(
                    remembered = self.members.len(),
                    capacity, "processed id set over capacity, clearing"
                );
                self.members.clear();
                self.order.clear();
            }
        }
    }
}

/// Bounded set of processed delivery ids.
#[derive(Debug)]
pub struct DeliveryGuard {
    state: Mutex<ProcessedIds>,
    capacity: usize,
    policy: EvictionPolicy,
}

impl DeliveryGuard {
    /// Create a guard from configuration.
    #[must_use]
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            state: Mutex::new(ProcessedIds::default()),
            capacity: config.capacity,
            policy: config.eviction,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}

impl DeliveryDeduplicator for DeliveryGuard {
    fn already_processed(&self, id: &EventId) -> bool {
        self.state.lock().members.contains(id)
    }

    fn mark_processed(&self, id: EventId) {
        let mut state = self.state.lock();
        if state.insert(id) {
            state.evict(self.capacity, self.policy);
        }
    }

    fn try_accept(&self, id: EventId) -> bool {
        let mut state = self.state.lock();
        if !state.insert(id.clone()) {
            info!(id = %id, "duplicate delivery, skipping");
            return false;
        }
        state.evict(self.capacity, self.policy);
        true
    }

    fn len(&self) -> usize {
        self.state.lock().members.len()
    }
}
