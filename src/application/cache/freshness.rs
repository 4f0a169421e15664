//! Keyed store of fetched values with per-namespace time-to-live.
//!
//! Staleness is evaluated lazily on read; there is no background sweep and
//! stale entries are never removed. Memory is therefore bounded by the
//! number of distinct keys ever written, which stays small because every
//! key must belong to a configured namespace. Callers that put unbounded
//! scopes under one namespace (for example one key per session) own that
//! growth.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use super::config::CacheConfig;
use crate::domain::id::CacheKey;
use crate::error::CacheError;
use crate::port::{Clock, SystemClock};

/// A stored value together with when it was fetched and how long it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether `now - fetched_at < ttl`.
    ///
    /// A fetch time in the future (clock stepped backwards) counts as age
    /// zero.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let age = (now - self.fetched_at).to_std().unwrap_or(Duration::ZERO);
        age < self.ttl
    }
}

/// Thread-safe freshness cache.
///
/// Entries live in a sharded concurrent map. Locking is per shard, not per
/// key: distinct keys that hash to the same shard briefly serialise on its
/// lock, while keys on different shards never contend. A write replaces the
/// whole entry under the shard lock, so readers never observe a torn entry.
/// No lock is held while a supplier runs.
pub struct FreshnessCache<V = Value> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<V> std::fmt::Debug for FreshnessCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshnessCache")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V: Clone> FreshnessCache<V> {
    /// Create an empty cache using the given TTL table and clock.
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            clock,
        }
    }

    /// Create an empty cache driven by the system clock.
    pub fn with_system_clock(config: CacheConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    /// TTL configured for the namespace of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownNamespace`] if the namespace has no TTL.
    pub fn ttl_for(&self, key: &CacheKey) -> Result<Duration, CacheError> {
        self.config
            .ttl_for(key)
            .ok_or_else(|| CacheError::UnknownNamespace {
                namespace: key.namespace().to_string(),
                key: key.to_string(),
            })
    }

    /// Return the stored value if it is still fresh.
    ///
    /// Never mutates the cache.
    pub fn get(&self, key: impl Into<CacheKey>) -> Option<V> {
        let key = key.into();
        let entry = self.entries.get(&key)?;
        if entry.is_fresh_at(self.clock.now()) {
            debug!(key = %key, "cache hit");
            Some(entry.value.clone())
        } else {
            debug!(key = %key, fetched_at = %entry.fetched_at, "cache entry stale");
            None
        }
    }

    /// Return the stored entry regardless of freshness.
    pub fn entry(&self, key: impl Into<CacheKey>) -> Option<CacheEntry<V>> {
        self.entries.get(&key.into()).map(|entry| entry.clone())
    }

    /// Store `value` fetched now, replacing any previous entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownNamespace`] if the key's namespace has no
    /// configured TTL. Nothing is stored in that case.
    pub fn set(&self, key: impl Into<CacheKey>, value: V) -> Result<(), CacheError> {
        let key = key.into();
        let ttl = self.ttl_for(&key)?;
        let entry = CacheEntry {
            value,
            fetched_at: self.clock.now(),
            ttl,
        };
        debug!(key = %key, ttl_secs = ttl.as_secs(), "cache entry stored");
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Return the fresh value for `key`, or compute, store and return a new one.
    ///
    /// Concurrent misses on the same key may each run `supplier`; the last
    /// store wins.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownNamespace`] before running `supplier` if
    /// the key's namespace has no configured TTL.
    pub fn get_or_compute<F>(&self, key: impl Into<CacheKey>, supplier: F) -> Result<V, CacheError>
    where
        F: FnOnce() -> V,
    {
        self.get_or_try_compute(key, || Ok::<V, CacheError>(supplier()))
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// A supplier error is returned unchanged and nothing is cached.
    pub fn get_or_try_compute<F, E>(&self, key: impl Into<CacheKey>, supplier: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
        E: From<CacheError>,
    {
        let key = key.into();
        self.ttl_for(&key)?;
        if let Some(value) = self.get(key.clone()) {
            return Ok(value);
        }

        debug!(key = %key, "cache miss, computing");
        let value = supplier()?;
        self.set(key, value.clone())?;
        Ok(value)
    }

    /// Async variant for suppliers that fetch from upstream.
    ///
    /// The cache is not locked while `fetch` is awaited.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: impl Into<CacheKey>, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: From<CacheError>,
    {
        let key = key.into();
        self.ttl_for(&key)?;
        if let Some(value) = self.get(key.clone()) {
            return Ok(value);
        }

        debug!(key = %key, "cache miss, fetching");
        let value = fetch().await?;
        self.set(key, value.clone())?;
        Ok(value)
    }

    /// Number of keys ever stored, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The clock this cache reads.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cache::config::namespace;
    use crate::testkit::clock::ManualClock;
    use serde_json::json;

    fn cache() -> (FreshnessCache<Value>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = FreshnessCache::new(CacheConfig::default(), clock.clone());
        (cache, clock)
    }

    #[test]
    fn empty_cache_misses() {
        let (cache, _) = cache();
        assert_eq!(cache.get(namespace::STANDINGS), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn ttl_law_holds_at_the_boundary() {
        let (cache, clock) = cache();
        cache.set(namespace::WEATHER, json!("sunny")).unwrap();

        clock.advance(chrono::Duration::hours(6) - chrono::Duration::milliseconds(1));
        assert_eq!(cache.get(namespace::WEATHER), Some(json!("sunny")));

        clock.advance(chrono::Duration::milliseconds(1));
        assert_eq!(cache.get(namespace::WEATHER), None);
    }

    #[test]
    fn set_overwrites_and_restarts_ttl() {
        let (cache, clock) = cache();
        cache.set(namespace::LIVE_SESSION, json!(1)).unwrap();
        clock.advance(chrono::Duration::seconds(20));
        cache.set(namespace::LIVE_SESSION, json!(2)).unwrap();
        clock.advance(chrono::Duration::seconds(20));

        assert_eq!(cache.get(namespace::LIVE_SESSION), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_entry_is_kept_but_not_served() {
        let (cache, clock) = cache();
        cache.set(namespace::LIVE_SESSION, json!(true)).unwrap();
        clock.advance(chrono::Duration::minutes(5));

        assert_eq!(cache.get(namespace::LIVE_SESSION), None);
        let entry = cache.entry(namespace::LIVE_SESSION).unwrap();
        assert_eq!(entry.value(), &json!(true));
        assert_eq!(entry.ttl(), Duration::from_secs(30));
    }

    #[test]
    fn unknown_namespace_is_rejected() {
        let (cache, _) = cache();
        let err = cache.set("podium", json!([])).unwrap_err();
        assert_eq!(
            err,
            CacheError::UnknownNamespace {
                namespace: "podium".into(),
                key: "podium".into(),
            }
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn get_or_compute_runs_supplier_once_while_fresh() {
        let (cache, clock) = cache();
        let mut calls = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_compute(namespace::NEXT_RACE, || {
                    calls += 1;
                    json!("Bahrain")
                })
                .unwrap();
            assert_eq!(value, json!("Bahrain"));
        }
        assert_eq!(calls, 1);

        clock.advance(chrono::Duration::hours(24));
        cache
            .get_or_compute(namespace::NEXT_RACE, || {
                calls += 1;
                json!("Jeddah")
            })
            .unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn get_or_compute_rejects_misuse_before_supplying() {
        let (cache, _) = cache();
        let mut supplied = false;
        let result = cache.get_or_compute("podium", || {
            supplied = true;
            json!(null)
        });
        assert!(result.is_err());
        assert!(!supplied);
    }

    #[test]
    fn failed_supplier_caches_nothing() {
        let (cache, _) = cache();
        let result: Result<Value, crate::error::Error> = cache
            .get_or_try_compute(namespace::STANDINGS, || {
                Err(crate::error::Error::Io(std::io::Error::other("upstream down")))
            });

        assert!(result.is_err());
        assert!(cache.entry(namespace::STANDINGS).is_none());
    }

    #[tokio::test]
    async fn get_or_fetch_stores_fetched_value() {
        let (cache, _) = cache();
        let key = CacheKey::scoped(namespace::LIVE_POSITIONS, 9158);

        let value: Result<Value, CacheError> = cache
            .get_or_fetch(key.clone(), || async { Ok(json!([{"entity": "1"}])) })
            .await;
        assert_eq!(value.unwrap(), json!([{"entity": "1"}]));

        let mut fetched_again = false;
        let cached: Result<Value, CacheError> = cache
            .get_or_fetch(key, || {
                fetched_again = true;
                async { Ok(json!([])) }
            })
            .await;
        assert_eq!(cached.unwrap(), json!([{"entity": "1"}]));
        assert!(!fetched_again);
    }

    #[test]
    fn get_or_fetch_unknown_namespace_skips_fetch() {
        let (cache, _) = cache();
        let mut fetched = false;

        let result: Result<Value, CacheError> =
            tokio_test::block_on(cache.get_or_fetch("driver_photos:44", || {
                fetched = true;
                async { Ok(json!("photo")) }
            }));

        tokio_test::assert_err!(result);
        assert!(!fetched);
        assert!(cache.is_empty());
    }

    #[test]
    fn clock_stepping_backwards_keeps_entry_fresh() {
        let (cache, clock) = cache();
        cache.set(namespace::LIVE_SESSION, json!(1)).unwrap();
        clock.advance(-chrono::Duration::minutes(10));
        assert_eq!(cache.get(namespace::LIVE_SESSION), Some(json!(1)));
    }
}
