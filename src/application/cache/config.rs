//! Freshness cache configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::id::CacheKey;
use crate::error::ConfigError;

/// Well-known cache namespaces.
pub mod namespace {
    pub const STANDINGS: &str = "standings";
    pub const CONSTRUCTOR_STANDINGS: &str = "constructor_standings";
    pub const LAST_SESSION: &str = "last_session";
    pub const NEXT_RACE: &str = "next_race";
    pub const CALENDAR: &str = "calendar";
    pub const WEATHER: &str = "weather";
    pub const ACTIVE_SESSION: &str = "active_session";
    pub const LIVE_SESSION: &str = "live_session";
    pub const LIVE_POSITIONS: &str = "live_positions";
}

const HOUR_SECS: u64 = 3600;

/// TTL table keyed by cache namespace.
///
/// Fixed at startup. Entries read from a config file are merged over the
/// built-in defaults, so a file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Namespace to time-to-live in seconds.
    #[serde(
        default = "default_ttl_secs",
        deserialize_with = "deserialize_ttl_overrides"
    )]
    pub ttl_secs: BTreeMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> BTreeMap<String, u64> {
    [
        (namespace::STANDINGS, 24 * HOUR_SECS),
        (namespace::CONSTRUCTOR_STANDINGS, 24 * HOUR_SECS),
        (namespace::LAST_SESSION, 168 * HOUR_SECS),
        (namespace::NEXT_RACE, 24 * HOUR_SECS),
        (namespace::CALENDAR, 168 * HOUR_SECS),
        (namespace::WEATHER, 6 * HOUR_SECS),
        (namespace::ACTIVE_SESSION, 300),
        (namespace::LIVE_SESSION, 30),
        (namespace::LIVE_POSITIONS, 15),
    ]
    .into_iter()
    .map(|(ns, secs)| (ns.to_string(), secs))
    .collect()
}

fn deserialize_ttl_overrides<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, u64>::deserialize(deserializer)?;
    let mut table = default_ttl_secs();
    table.extend(overrides);
    Ok(table)
}

impl CacheConfig {
    /// Build a table from explicit entries, without the defaults.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            ttl_secs: entries.into_iter().map(|(ns, secs)| (ns.into(), secs)).collect(),
        }
    }

    /// TTL for a namespace, if configured.
    #[must_use]
    pub fn ttl(&self, namespace: &str) -> Option<Duration> {
        self.ttl_secs.get(namespace).map(|secs| Duration::from_secs(*secs))
    }

    /// TTL for the namespace of `key`, if configured.
    #[must_use]
    pub fn ttl_for(&self, key: &CacheKey) -> Option<Duration> {
        self.ttl(key.namespace())
    }

    /// Configured namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.ttl_secs.keys().map(String::as_str)
    }

    /// Reject empty namespaces, namespaces containing the scope separator,
    /// and zero TTLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (namespace, secs) in &self.ttl_secs {
            if namespace.is_empty() || namespace.contains(CacheKey::SEPARATOR) {
                return Err(ConfigError::InvalidValue {
                    field: "cache.ttl_secs",
                    reason: format!(
                        "namespace '{namespace}' must be non-empty and must not contain '{}'",
                        CacheKey::SEPARATOR
                    ),
                });
            }
            if *secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "cache.ttl_secs",
                    reason: format!("TTL for '{namespace}' must be greater than 0"),
                });
            }
        }
        Ok(())
    }
}
