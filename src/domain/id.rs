//! Identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inbound event identifier - newtype for type safety.
///
/// Transports hand out numeric update ids; the guard only needs equality, so
/// every id is normalised to its decimal text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Create a new `EventId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the event ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Cache key of the form `namespace` or `namespace:scope`.
///
/// The namespace selects the configured TTL; the optional scope lets one
/// namespace hold several entries (for example one per live session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Separator between namespace and scope.
    pub const SEPARATOR: char = ':';

    /// Create a key from its full text.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Create a key scoped inside a namespace.
    pub fn scoped(namespace: &str, scope: impl fmt::Display) -> Self {
        Self(format!("{namespace}{}{scope}", Self::SEPARATOR))
    }

    /// The namespace portion used for TTL lookup.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0
            .split_once(Self::SEPARATOR)
            .map_or(self.0.as_str(), |(namespace, _)| namespace)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
