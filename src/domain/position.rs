//! Live position records and ranked snapshots.
//!
//! The live-data API streams one record per position change, so an entity
//! normally appears many times. A [`PositionSnapshot`] is the reconciled view
//! holding only the latest observation per entity.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::time::parse_timestamp;

/// An entity's standing: a numeric position or a status label such as `DNF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rank {
    Position(u64),
    Status(String),
}

impl Rank {
    /// Parse a rank from text. Blank text is no rank at all.
    ///
    /// Anything that is not a non-negative integer within `u64` is kept as a
    /// status label.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u64>() {
            Ok(position) => Some(Self::Position(position)),
            Err(_) => Some(Self::Status(trimmed.to_string())),
        }
    }

    /// Parse a rank from a decoded JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(position) => Some(Self::Position(position)),
                None => Some(Self::Status(n.to_string())),
            },
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Option<u64> {
        match self {
            Self::Position(p) => Some(*p),
            Self::Status(_) => None,
        }
    }

    /// Numeric positions first, in ascending order; every status sorts after
    /// them and compares equal to the others.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Position(a), Self::Position(b)) => a.cmp(b),
            (Self::Position(_), Self::Status(_)) => Ordering::Less,
            (Self::Status(_), Self::Position(_)) => Ordering::Greater,
            (Self::Status(_), Self::Status(_)) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(p) => write!(f, "{p}"),
            Self::Status(s) => write!(f, "{s}"),
        }
    }
}

/// One observation of an entity's rank.
///
/// Every field is optional because upstream records are frequently partial;
/// incomplete records carry no usable information and are dropped during
/// aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionRecord {
    pub entity_id: Option<String>,
    pub rank: Option<Rank>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl PositionRecord {
    /// Build a complete record.
    pub fn new(entity_id: impl Into<String>, rank: Rank, observed_at: DateTime<Utc>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            rank: Some(rank),
            observed_at: Some(observed_at),
        }
    }
}

/// Position sample in the live-data API's wire shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PositionSample {
    #[serde(default)]
    pub driver_number: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
}

impl From<&PositionSample> for PositionRecord {
    fn from(sample: &PositionSample) -> Self {
        let entity_id = sample.driver_number.as_ref().and_then(|value| match value {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        });

        Self {
            entity_id,
            rank: sample.position.as_ref().and_then(Rank::from_json),
            observed_at: sample
                .date
                .as_deref()
                .and_then(|raw| parse_timestamp(raw).ok()),
        }
    }
}

/// The authoritative observation for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub entity_id: String,
    pub rank: Rank,
    pub observed_at: DateTime<Utc>,
}

/// Entities ordered by rank, numeric ranks first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    entries: Vec<RankedEntry>,
}

impl PositionSnapshot {
    /// Wrap entries that are already in snapshot order.
    pub(crate) fn from_ordered(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// The leading `n` entries (fewer if the snapshot is shorter).
    #[must_use]
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Entry for a specific entity, if present.
    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.entity_id == entity_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for PositionSnapshot {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
