mod support;

use pitwall::application::position::aggregate;
use pitwall::domain::{PositionRecord, PositionSample, PositionSnapshot, Rank};
use serde_json::{json, Value};

use support::feed::position_json;

fn snapshot_from(samples: Vec<Value>) -> PositionSnapshot {
    let samples: Vec<PositionSample> =
        serde_json::from_value(Value::Array(samples)).expect("valid position payload");
    let records: Vec<PositionRecord> = samples.iter().map(PositionRecord::from).collect();
    aggregate(&records)
}

fn order(snapshot: &PositionSnapshot) -> Vec<(&str, String)> {
    snapshot
        .iter()
        .map(|entry| (entry.entity_id.as_str(), entry.rank.to_string()))
        .collect()
}

#[test]
fn latest_sample_per_driver_wins() {
    let snapshot = snapshot_from(vec![
        position_json(1, json!(1), "2024-03-02T15:00:00Z"),
        position_json(16, json!(2), "2024-03-02T15:00:00Z"),
        position_json(1, json!(2), "2024-03-02T15:05:00Z"),
        position_json(16, json!(1), "2024-03-02T15:05:00Z"),
        position_json(1, json!(3), "2024-03-02T14:59:00Z"),
    ]);

    assert_eq!(order(&snapshot), vec![("16", "1".into()), ("1", "2".into())]);
}

#[test]
fn status_ranks_trail_numeric_positions() {
    let snapshot = snapshot_from(vec![
        position_json(44, json!(2), "2024-03-02T15:00:00Z"),
        position_json(11, json!("DNF"), "2024-03-02T15:00:00Z"),
        position_json(1, json!(1), "2024-03-02T15:00:00Z"),
    ]);

    assert_eq!(
        order(&snapshot),
        vec![("1", "1".into()), ("44", "2".into()), ("11", "DNF".into())]
    );
    assert_eq!(snapshot.get("11").map(|e| &e.rank), Some(&Rank::Status("DNF".into())));
}

#[test]
fn incomplete_samples_are_ignored() {
    let snapshot = snapshot_from(vec![
        json!({ "driver_number": 4, "date": "2024-03-02T15:00:00Z" }),
        json!({ "position": 3, "date": "2024-03-02T15:00:00Z" }),
        json!({ "driver_number": 81, "position": 5 }),
        position_json(63, json!(""), "2024-03-02T15:00:00Z"),
        position_json(55, json!(7), "not a date"),
        position_json(14, json!(6), "2024-03-02T15:00:00.250"),
    ]);

    assert_eq!(order(&snapshot), vec![("14", "6".into())]);
}

#[test]
fn statuses_keep_arrival_order() {
    let snapshot = snapshot_from(vec![
        position_json(20, json!("DSQ"), "2024-03-02T15:00:00Z"),
        position_json(2, json!("DNF"), "2024-03-02T15:00:00Z"),
        position_json(27, json!(1), "2024-03-02T15:00:00Z"),
    ]);

    assert_eq!(
        order(&snapshot),
        vec![("27", "1".into()), ("20", "DSQ".into()), ("2", "DNF".into())]
    );
}

#[test]
fn oversized_positions_sort_numerically() {
    let snapshot = snapshot_from(vec![
        position_json(2, json!("DNF"), "2024-03-02T15:00:00Z"),
        position_json(1, json!("5000000000"), "2024-03-02T15:00:00Z"),
        position_json(3, json!(7), "2024-03-02T15:00:00Z"),
    ]);

    assert_eq!(
        order(&snapshot),
        vec![
            ("3", "7".into()),
            ("1", "5000000000".into()),
            ("2", "DNF".into())
        ]
    );
    assert_eq!(snapshot.get("1").and_then(|e| e.rank.position()), Some(5_000_000_000));
}

#[test]
fn top_is_bounded_by_snapshot_length() {
    let snapshot = snapshot_from(
        (1..=20)
            .map(|driver| position_json(driver, json!(21 - driver), "2024-03-02T15:00:00Z"))
            .collect(),
    );

    assert_eq!(snapshot.len(), 20);
    let podium: Vec<&str> = snapshot.top(3).iter().map(|e| e.entity_id.as_str()).collect();
    assert_eq!(podium, vec!["20", "19", "18"]);
    assert_eq!(snapshot.top(50).len(), 20);
}

#[test]
fn empty_feed_yields_empty_snapshot() {
    assert!(snapshot_from(Vec::new()).is_empty());
}
