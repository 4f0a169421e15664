//! Scheduled broadcast sessions and the live-window predicate.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::time::parse_timestamp;

/// Hours before `now` a session may have started and still count as live.
const LOOKBACK_HOURS: i64 = 2;
/// Hours after a known end during which final data is still expected.
const END_GRACE_HOURS: i64 = 1;
/// Hours ahead of `now` an open-ended session may start and count as live.
const OPEN_ENDED_LOOKAHEAD_HOURS: i64 = 1;
/// First month in which next season's schedule is also consulted.
const NEXT_SEASON_MONTH: u32 = 11;

const DEFAULT_LABEL: &str = "Session";

/// Session entry exactly as the schedule API delivers it.
///
/// Timestamps stay as text until [`SessionWindow::try_from`] so that a single
/// malformed entry can be skipped without rejecting the whole schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub session_key: Option<u64>,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub meeting_name: Option<String>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_end: Option<String>,
}

/// A scheduled interval during which a live broadcast may be running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    label: String,
    session_key: Option<u64>,
}

impl SessionWindow {
    /// Create a window from already-parsed instants.
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            session_key: None,
        }
    }

    /// Attach the upstream session key.
    #[must_use]
    pub fn with_session_key(mut self, key: u64) -> Self {
        self.session_key = Some(key);
        self
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn session_key(&self) -> Option<u64> {
        self.session_key
    }

    /// Whether this window counts as live at `now`.
    ///
    /// With a known end: started at most two hours ago (and not in the
    /// future), and ended less than one hour ago. Without an end: starts
    /// between two hours ago and one hour from now. Bounds are inclusive
    /// except the end grace, which is strict.
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        let delta_start = self.start - now;
        let lookback = -Duration::hours(LOOKBACK_HOURS);

        match self.end {
            Some(end) => {
                let delta_end = end - now;
                delta_start >= lookback
                    && delta_start <= Duration::zero()
                    && delta_end > -Duration::hours(END_GRACE_HOURS)
            }
            None => {
                delta_start >= lookback && delta_start <= Duration::hours(OPEN_ENDED_LOOKAHEAD_HOURS)
            }
        }
    }
}

impl TryFrom<&SessionRecord> for SessionWindow {
    type Error = DomainError;

    fn try_from(record: &SessionRecord) -> Result<Self, Self::Error> {
        let raw_start = record
            .date_start
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(DomainError::MissingField {
                field: "date_start",
            })?;
        let start = parse_timestamp(raw_start)?;

        let end = match record.date_end.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw_end) => Some(parse_timestamp(raw_end)?),
            None => None,
        };

        let label = record
            .session_name
            .clone()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());

        Ok(Self {
            start,
            end,
            label,
            session_key: record.session_key,
        })
    }
}

/// Calendar years whose schedules must be consulted at `now`.
///
/// From November onwards the next season's opening sessions may already be
/// inside the live window, so both years are returned.
#[must_use]
pub fn schedule_years(now: DateTime<Utc>) -> Vec<i32> {
    let year = now.year();
    if now.month() >= NEXT_SEASON_MONTH {
        vec![year, year + 1]
    } else {
        vec![year]
    }
}
