mod common;

use geopath_lib::{
    build_graph, edge_weight, surface_distance, Error, GeoPosition, PointRecord, PointStore,
};

use common::{equator_records, session_with};

#[test]
fn graph_contains_only_graphable_points() {
    let mut store = PointStore::new();
    let mut incomplete = PointRecord::new(0.0, 3.0, 0.0);
    incomplete.altitude = None;
    let mut records = equator_records();
    records.push(incomplete);
    store.load(records);

    let graph = build_graph(&store);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.contains(3));
    assert_eq!(graph.node_ids(), vec![0, 1, 2]);
}

#[test]
fn add_edge_reports_surface_distance_and_altitude_difference() {
    let mut session = session_with(vec![
        PointRecord::new(46.0, 7.0, 500.0),
        PointRecord::new(46.0, 7.01, 820.0),
    ]);

    let insertion = session.add_edge(0, 1).expect("edge inserted");
    let a = GeoPosition::new(46.0, 7.0, 500.0);
    let b = GeoPosition::new(46.0, 7.01, 820.0);

    assert_eq!(insertion.surface_distance, surface_distance(&a, &b));
    assert_eq!(insertion.altitude_difference, 320.0);
    assert_eq!(insertion.weight, edge_weight(&a, &b));
    assert!(!insertion.replaced);

    let graph = session.graph();
    assert_eq!(graph.edge_weight(0, 1).unwrap(), Some(insertion.weight));
    assert_eq!(graph.edge_weight(1, 0).unwrap(), Some(insertion.weight));
}

#[test]
fn re_adding_an_edge_replaces_instead_of_duplicating() {
    let mut session = session_with(equator_records());
    session.add_edge(0, 1).expect("first insert");
    let second = session.add_edge(1, 0).expect("second insert");

    assert!(second.replaced);
    assert_eq!(session.graph().edge_count(), 1);
    assert_eq!(session.graph().neighbours(0).unwrap().len(), 1);
    assert_eq!(session.graph().neighbours(1).unwrap().len(), 1);
}

#[test]
fn self_loops_are_rejected() {
    let mut session = session_with(equator_records());
    let err = session.add_edge(2, 2).expect_err("self loop");
    assert!(matches!(err, Error::SelfLoopRejected { id: 2 }));
    assert_eq!(session.graph().edge_count(), 0);
}

#[test]
fn unknown_identifiers_are_rejected() {
    let mut session = session_with(equator_records());

    let err = session.add_edge(0, 9).expect_err("unknown target");
    assert!(matches!(err, Error::InvalidIdentifier { id: 9 }));

    let graph = session.graph();
    assert!(matches!(
        graph.neighbours(42),
        Err(Error::InvalidIdentifier { id: 42 })
    ));
    assert!(matches!(
        graph.edge_weight(0, 42),
        Err(Error::InvalidIdentifier { id: 42 })
    ));
    assert_eq!(graph.edge_weight(0, 2).unwrap(), None);
}

#[test]
fn edges_are_listed_once_in_identifier_order() {
    let mut session = session_with(equator_records());
    session.add_edge(2, 1).unwrap();
    session.add_edge(1, 0).unwrap();

    let edges = session.graph().edges();
    let pairs: Vec<_> = edges.iter().map(|edge| (edge.a, edge.b)).collect();
    assert_eq!(pairs, vec![(0, 1), (1, 2)]);
}

#[test]
fn removing_a_node_drops_its_edges() {
    let mut session = session_with(equator_records());
    session.add_edge(0, 1).unwrap();
    session.add_edge(1, 2).unwrap();

    session.remove(1).expect("point removed");

    let graph = session.graph();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.neighbours(0).unwrap().is_empty());
    assert!(graph.neighbours(2).unwrap().is_empty());
}
