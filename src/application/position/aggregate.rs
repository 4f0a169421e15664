//! Position aggregation.
//!
//! Collapses a stream of possibly repeated, out-of-order position records
//! into one snapshot holding the latest observation per entity.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{PositionRecord, PositionSnapshot, Rank, RankedEntry};

/// Latest complete observation seen so far for one entity.
struct Latest<'a> {
    index: usize,
    rank: &'a Rank,
    observed_at: DateTime<Utc>,
}

/// Build a ranked snapshot from raw records.
///
/// - Records missing an entity, rank or observation time are dropped.
/// - Per entity, the record with the greatest `observed_at` wins; on a tie
///   the one later in the input wins.
/// - Entries are ordered by numeric rank, then status ranks; ties keep the
///   input order of the winning records.
///
/// Total: empty input yields an empty snapshot.
#[must_use]
pub fn aggregate(records: &[PositionRecord]) -> PositionSnapshot {
    let mut latest: HashMap<&str, Latest<'_>> = HashMap::new();
    let mut dropped = 0usize;

    for (index, record) in records.iter().enumerate() {
        let (Some(entity_id), Some(rank), Some(observed_at)) = (
            record.entity_id.as_deref(),
            record.rank.as_ref(),
            record.observed_at,
        ) else {
            dropped += 1;
            continue;
        };

        let candidate = Latest {
            index,
            rank,
            observed_at,
        };
        match latest.entry(entity_id) {
            Entry::Occupied(mut slot) => {
                if observed_at >= slot.get().observed_at {
                    slot.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    let mut winners: Vec<(&str, Latest<'_>)> = latest.into_iter().collect();
    winners.sort_by(|(_, a), (_, b)| a.rank.sort_cmp(b.rank).then(a.index.cmp(&b.index)));

    debug!(
        records = records.len(),
        dropped,
        entities = winners.len(),
        "aggregated position records"
    );

    PositionSnapshot::from_ordered(
        winners
            .into_iter()
            .map(|(entity_id, latest)| RankedEntry {
                entity_id: entity_id.to_string(),
                rank: latest.rank.clone(),
                observed_at: latest.observed_at,
            })
            .collect(),
    )
}
