//! Builders for upstream records.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{PositionRecord, Rank, SessionRecord};

/// Session record with `start`/`end` offsets from `now`.
pub fn session(now: DateTime<Utc>, start: Duration, end: Option<Duration>) -> SessionRecord {
    SessionRecord {
        session_key: Some(9158),
        session_name: Some("Race".into()),
        meeting_name: Some("Bahrain Grand Prix".into()),
        date_start: Some((now + start).to_rfc3339()),
        date_end: end.map(|offset| (now + offset).to_rfc3339()),
    }
}

/// Session record whose start cannot be parsed.
pub fn malformed_session() -> SessionRecord {
    SessionRecord {
        session_name: Some("Broken".into()),
        date_start: Some("not-a-date".into()),
        ..Default::default()
    }
}

/// Complete position record with a numeric rank.
pub fn position(entity: &str, rank: u64, observed_at: DateTime<Utc>) -> PositionRecord {
    PositionRecord::new(entity, Rank::Position(rank), observed_at)
}

/// Complete position record with a status rank.
pub fn status(entity: &str, label: &str, observed_at: DateTime<Utc>) -> PositionRecord {
    PositionRecord::new(entity, Rank::Status(label.into()), observed_at)
}
