//! `pitwall live`: evaluate a saved schedule.

use chrono::Utc;
use serde_json::json;

use super::command::LiveArgs;
use super::{output, read_json};
use crate::application::session::find_live;
use crate::domain::{schedule_years, SessionRecord};
use crate::error::Result;

pub fn execute(args: &LiveArgs, as_json: bool) -> Result<()> {
    let sessions: Vec<SessionRecord> = read_json(&args.sessions)?;
    let now = args.at.unwrap_or_else(Utc::now);
    let live = find_live(&sessions, now);

    if as_json {
        output::json(&json!({
            "at": now,
            "live": live.is_some(),
            "session": live,
            "schedule_years": schedule_years(now),
        }));
        return Ok(());
    }

    output::section("Session Window Check");
    output::field("Evaluated at", now.to_rfc3339());
    output::field("Sessions", sessions.len());
    match live {
        Some(window) => {
            output::success("Live session in progress");
            output::field("Session", window.label());
            output::field("Start", window.start().to_rfc3339());
            if let Some(end) = window.end() {
                output::field("End", end.to_rfc3339());
            }
            if let Some(key) = window.session_key() {
                output::field("Session key", key);
            }
        }
        None => output::warning("No live session"),
    }
    Ok(())
}
