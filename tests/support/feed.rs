//! Upstream payloads shaped like the schedule and live-data APIs.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Schedule API entry with offsets relative to `now`.
pub fn session_json(
    now: DateTime<Utc>,
    name: &str,
    start: Duration,
    end: Option<Duration>,
) -> Value {
    json!({
        "session_key": 9158,
        "session_name": name,
        "meeting_name": "Bahrain Grand Prix",
        "country_name": "Bahrain",
        "date_start": (now + start).to_rfc3339(),
        "date_end": end.map(|offset| (now + offset).to_rfc3339()),
        "gmt_offset": "03:00:00",
    })
}

/// Live-data API position sample.
pub fn position_json(driver_number: u32, position: Value, date: &str) -> Value {
    json!({
        "session_key": 9158,
        "meeting_key": 1229,
        "driver_number": driver_number,
        "position": position,
        "date": date,
    })
}
