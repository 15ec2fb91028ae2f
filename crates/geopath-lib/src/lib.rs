//! geopath library entry points.
//!
//! This crate holds geolocated points, connects them into an undirected graph
//! weighted by a combined great-circle and altitude distance, and searches the
//! graph with A*. Front ends (the CLI, an ingestion service) should only
//! depend on the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod distance;
pub mod error;
pub mod graph;
pub mod names;
pub mod output;
pub mod path;
pub mod persistence;
pub mod session;
pub mod store;

pub use config::{default_points_path, resolve_points_path, POINTS_FILE_ENV};
pub use distance::{altitude_difference, edge_weight, surface_distance, GeoPosition};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, EdgeInsertion, EdgeRecord, GeoGraph};
pub use names::NameRegistry;
pub use output::{point_rows, EdgeSummary, GraphSnapshot, PointRow, RouteSummary};
pub use path::{shortest_path, total_weight, PathHeuristic, PathOptions, PathResult};
pub use persistence::{JsonFileRepository, MemoryRepository, PointRepository};
pub use session::Session;
pub use store::{Coordinate, LoadSummary, Point, PointId, PointRecord, PointStore};
