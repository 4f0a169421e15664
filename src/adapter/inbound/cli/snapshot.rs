//! `pitwall snapshot`: aggregate a saved position feed.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::SnapshotArgs;
use super::{output, read_json};
use crate::application::position::aggregate;
use crate::domain::{PositionRecord, PositionSample, RankedEntry};
use crate::error::Result;

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Observed")]
    observed_at: String,
}

impl From<&RankedEntry> for SnapshotRow {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            rank: entry.rank.to_string(),
            driver: entry.entity_id.clone(),
            observed_at: entry.observed_at.to_rfc3339(),
        }
    }
}

fn render(entries: &[RankedEntry]) -> String {
    let rows: Vec<SnapshotRow> = entries.iter().map(SnapshotRow::from).collect();
    Table::new(rows).to_string()
}

pub fn execute(args: &SnapshotArgs, as_json: bool) -> Result<()> {
    let samples: Vec<PositionSample> = read_json(&args.positions)?;
    let records: Vec<PositionRecord> = samples.iter().map(PositionRecord::from).collect();
    let snapshot = aggregate(&records);
    let entries = match args.top {
        Some(n) => snapshot.top(n),
        None => snapshot.entries(),
    };

    if as_json {
        output::json(&json!({
            "records": records.len(),
            "entities": snapshot.len(),
            "entries": entries,
        }));
        return Ok(());
    }

    output::section("Position Snapshot");
    output::field("Records", records.len());
    output::field("Entities", snapshot.len());
    if entries.is_empty() {
        output::warning("No usable position records");
        return Ok(());
    }
    println!();
    output::lines(&render(entries));
    Ok(())
}
