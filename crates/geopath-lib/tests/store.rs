mod common;

use geopath_lib::{Coordinate, Error, PointRecord, PointStore};
use serde_json::json;

use common::{equator_records, session_with};

fn record_from(value: serde_json::Value) -> PointRecord {
    serde_json::from_value(value).expect("record deserializes")
}

#[test]
fn load_assigns_positional_identifiers_and_default_names() {
    let mut store = PointStore::new();
    let mut records = equator_records();
    records[1] = records[1].clone().with_name("Ridge");
    let summary = store.load(records);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.graphable, 3);
    assert!(summary.skipped.is_empty());

    assert_eq!(store.name(0).as_deref(), Some("Node 1"));
    assert_eq!(store.name(1).as_deref(), Some("Ridge"));
    assert_eq!(store.name(2).as_deref(), Some("Node 3"));
    // Defaults are written back so they persist on save.
    assert_eq!(store.records()[0].name.as_deref(), Some("Node 1"));
}

#[test]
fn malformed_records_are_kept_for_display_but_not_graphed() {
    let mut store = PointStore::new();
    let summary = store.load(vec![
        record_from(json!({"latitude": 1.0, "longitude": 2.0, "altitude": 3.0})),
        record_from(json!({"latitude": 1.0, "longitude": 2.0})),
        record_from(json!({"latitude": "north", "longitude": 2.0, "altitude": 3.0})),
        record_from(json!({"latitude": "4.5", "longitude": "-7.25", "altitude": "12"})),
    ]);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.graphable, 2);
    assert_eq!(summary.skipped.len(), 2);
    assert!(matches!(
        summary.skipped[0],
        Error::MalformedRecord {
            id: 1,
            field: "altitude"
        }
    ));
    assert!(matches!(
        summary.skipped[1],
        Error::MalformedRecord {
            id: 2,
            field: "latitude"
        }
    ));

    assert_eq!(store.len(), 4);
    assert!(store.point(1).is_none());
    assert!(store.get(1).is_some());

    let parsed = store.point(3).expect("numeric strings are graphable");
    assert_eq!(parsed.position.latitude, 4.5);
    assert_eq!(parsed.position.longitude, -7.25);
    assert_eq!(parsed.position.altitude, 12.0);
}

#[test]
fn non_finite_coordinates_are_malformed() {
    let record = PointRecord {
        altitude: Some(Coordinate::Text("NaN".to_string())),
        ..PointRecord::new(0.0, 0.0, 0.0)
    };
    assert_eq!(record.missing_coordinate(), Some("altitude"));
    assert!(record.position().is_none());
}

#[test]
fn rename_updates_registry_and_record() {
    let mut session = session_with(equator_records());
    session.rename(1, "Summit").expect("rename succeeds");
    session.rename(1, "Summit").expect("renaming twice is harmless");

    let store = session.store();
    assert_eq!(store.name(1).as_deref(), Some("Summit"));
    assert_eq!(store.get(1).unwrap().record.name.as_deref(), Some("Summit"));
    assert_eq!(store.point(1).unwrap().name, "Summit");
}

#[test]
fn rename_rejects_blank_names_and_unknown_points() {
    let mut session = session_with(equator_records());

    assert!(matches!(
        session.rename(0, ""),
        Err(Error::EmptyName { id: 0 })
    ));
    assert!(matches!(
        session.rename(0, " \t"),
        Err(Error::EmptyName { id: 0 })
    ));
    assert!(matches!(
        session.rename(8, "Summit"),
        Err(Error::InvalidIdentifier { id: 8 })
    ));
    assert_eq!(session.store().name(0).as_deref(), Some("Node 1"));
}

#[test]
fn remove_keeps_other_identifiers_stable() {
    let mut session = session_with(equator_records());
    session.add_edge(1, 2).unwrap();

    let removed = session.remove(0).expect("removed");
    assert_eq!(removed.name.as_deref(), Some("Node 1"));

    let store = session.store();
    assert_eq!(store.len(), 2);
    assert!(!store.contains(0));
    assert_eq!(store.name(1).as_deref(), Some("Node 2"));
    assert_eq!(store.name(2).as_deref(), Some("Node 3"));

    let result = session.shortest_path(1, 2).expect("remaining edge intact");
    assert_eq!(result.steps, vec![1, 2]);

    assert!(matches!(
        session.remove(0),
        Err(Error::InvalidIdentifier { id: 0 })
    ));
}

#[test]
fn removed_identifiers_are_not_reused_by_append() {
    let mut session = session_with(equator_records());
    session.remove(2).unwrap();

    let id = session.append_point(PointRecord::new(0.0, 3.0, 0.0));
    assert_eq!(id, 3);
    assert_eq!(session.store().name(id).as_deref(), Some("Node 4"));
    assert!(session.graph().contains(id));
}

#[test]
fn appending_a_malformed_record_does_not_add_a_node() {
    let mut session = session_with(equator_records());
    let id = session.append_point(record_from(json!({"latitude": 3.0})));

    assert!(session.store().contains(id));
    assert!(!session.graph().contains(id));
}

#[test]
fn references_resolve_by_name_then_identifier() {
    let mut session = session_with(equator_records());
    session.rename(2, "Summit").unwrap();
    let store = session.store();

    assert_eq!(store.resolve("Summit").unwrap(), 2);
    assert_eq!(store.resolve("Node 1").unwrap(), 0);
    assert_eq!(store.resolve("1").unwrap(), 1);
    assert!(matches!(
        store.resolve("99"),
        Err(Error::InvalidIdentifier { id: 99 })
    ));

    let err = store.resolve("Sumit").expect_err("typo");
    let message = err.to_string();
    assert!(message.contains("unknown point name: Sumit"));
    assert!(message.contains("Did you mean 'Summit'?"), "{message}");
}

#[test]
fn fuzzy_matches_respect_limit_and_threshold() {
    let mut store = PointStore::new();
    store.load(vec![
        PointRecord::new(0.0, 0.0, 0.0).with_name("Base Camp"),
        PointRecord::new(0.0, 0.1, 0.0).with_name("Base Camp 2"),
        PointRecord::new(0.0, 0.2, 0.0).with_name("Base Ridge"),
        PointRecord::new(0.0, 0.3, 0.0).with_name("Lighthouse"),
    ]);

    let matches = store.fuzzy_name_matches("base camp", 2);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0], "Base Camp");

    assert!(store.fuzzy_name_matches("zzzzzz", 3).is_empty());
}

#[test]
fn timestamps_pass_through_untouched() {
    let mut store = PointStore::new();
    store.load(vec![
        PointRecord::new(1.0, 1.0, 1.0).with_timestamp("2024-03-01T12:00:00Z"),
        PointRecord::new(1.0, 1.0, 1.0).with_timestamp(1_709_294_400),
    ]);

    assert_eq!(
        store.point(0).unwrap().timestamp,
        Some(json!("2024-03-01T12:00:00Z"))
    );
    assert_eq!(store.point(1).unwrap().timestamp, Some(json!(1_709_294_400)));
}
