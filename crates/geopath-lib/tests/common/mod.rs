//! Shared fixtures for integration tests.

use geopath_lib::{PointRecord, Session};

/// Three points along the equator, one degree apart: `Node 1`, `Node 2`, `Node 3`.
#[allow(dead_code)]
pub fn equator_records() -> Vec<PointRecord> {
    vec![
        PointRecord::new(0.0, 0.0, 0.0),
        PointRecord::new(0.0, 1.0, 0.0),
        PointRecord::new(0.0, 2.0, 0.0),
    ]
}

/// Session loaded with `records` and no edges.
#[allow(dead_code)]
pub fn session_with(records: Vec<PointRecord>) -> Session {
    let mut session = Session::new();
    let summary = session.load_points(records);
    assert!(summary.skipped.is_empty(), "fixture records are well formed");
    session
}

/// `rows` x `cols` lattice of points spaced 0.01 degrees apart with varying
/// altitude, every point linked to its right and lower neighbour.
#[allow(dead_code)]
pub fn lattice_session(rows: u64, cols: u64) -> Session {
    let mut records = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let altitude = ((row * 7 + col * 13) % 11) as f64 * 40.0;
            records.push(PointRecord::new(
                45.0 + row as f64 * 0.01,
                7.0 + col as f64 * 0.01,
                altitude,
            ));
        }
    }

    let mut session = session_with(records);
    for row in 0..rows {
        for col in 0..cols {
            let id = row * cols + col;
            if col + 1 < cols {
                session.add_edge(id, id + 1).expect("right neighbour");
            }
            if row + 1 < rows {
                session.add_edge(id, id + cols).expect("lower neighbour");
            }
        }
    }
    session
}
