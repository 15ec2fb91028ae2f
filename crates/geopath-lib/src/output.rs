//! Serializable views for presentation layers.
//!
//! These are owned snapshots: a front end can hold them across events without
//! borrowing the session.

use serde::Serialize;
use serde_json::Value;

use crate::distance::GeoPosition;
use crate::error::{Error, Result};
use crate::graph::{EdgeInsertion, EdgeRecord, GeoGraph};
use crate::names::NameRegistry;
use crate::path::{PathHeuristic, PathResult};
use crate::store::{Coordinate, PointId, PointStore};

/// Identifier plus resolved display name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PointLabel {
    pub id: PointId,
    pub name: String,
}

impl PointLabel {
    fn resolve(store: &PointStore, id: PointId) -> Self {
        Self {
            id,
            name: store
                .name(id)
                .unwrap_or_else(|| NameRegistry::default_name(id)),
        }
    }
}

/// One row of the point listing, including display-only records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointRow {
    pub id: PointId,
    pub name: String,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub altitude: Option<Coordinate>,
    pub timestamp: Option<Value>,
    pub graphable: bool,
}

/// Every retained record in display order.
pub fn point_rows(store: &PointStore) -> Vec<PointRow> {
    store
        .iter()
        .map(|stored| PointRow {
            id: stored.id,
            name: PointLabel::resolve(store, stored.id).name,
            latitude: stored.record.latitude.clone(),
            longitude: stored.record.longitude.clone(),
            altitude: stored.record.altitude.clone(),
            timestamp: stored.record.timestamp.clone(),
            graphable: stored.is_graphable(),
        })
        .collect()
}

/// Result of connecting two points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeSummary {
    pub from: PointLabel,
    pub to: PointLabel,
    pub surface_distance: f64,
    pub altitude_difference: f64,
    pub weight: f64,
    pub replaced: bool,
}

impl EdgeSummary {
    pub fn from_insertion(store: &PointStore, insertion: &EdgeInsertion) -> Self {
        Self {
            from: PointLabel::resolve(store, insertion.from),
            to: PointLabel::resolve(store, insertion.to),
            surface_distance: insertion.surface_distance,
            altitude_difference: insertion.altitude_difference,
            weight: insertion.weight,
            replaced: insertion.replaced,
        }
    }
}

/// Step along a computed path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: PointId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPosition>,
    /// Weight of the edge arriving at this step; `None` for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_weight: Option<f64>,
}

/// Structured representation of a computed path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub heuristic: PathHeuristic,
    pub hops: usize,
    pub total_weight: f64,
    pub expanded: usize,
    pub start: PointLabel,
    pub goal: PointLabel,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Resolve names and per-leg weights for a [`PathResult`].
    pub fn from_path(
        store: &PointStore,
        graph: &GeoGraph,
        heuristic: PathHeuristic,
        result: &PathResult,
    ) -> Result<Self> {
        let (Some(&first), Some(&last)) = (result.steps.first(), result.steps.last()) else {
            return Err(Error::EmptyPath);
        };

        let mut steps = Vec::with_capacity(result.steps.len());
        let mut previous: Option<PointId> = None;
        for (index, &id) in result.steps.iter().enumerate() {
            let leg_weight = match previous {
                Some(from) => graph.edge_weight(from, id)?,
                None => None,
            };
            steps.push(RouteStep {
                index,
                id,
                name: PointLabel::resolve(store, id).name,
                position: graph.position(id),
                leg_weight,
            });
            previous = Some(id);
        }

        Ok(Self {
            heuristic,
            hops: result.hop_count(),
            total_weight: result.total_weight,
            expanded: result.expanded,
            start: PointLabel::resolve(store, first),
            goal: PointLabel::resolve(store, last),
            steps,
        })
    }
}

/// Node of a [`GraphSnapshot`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotNode {
    pub id: PointId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Copy of the graph for 3D plotting: node positions, labels and weighted
/// edges.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    pub fn capture(store: &PointStore, graph: &GeoGraph) -> Self {
        let nodes = graph
            .node_ids()
            .into_iter()
            .filter_map(|id| {
                let position = graph.position(id)?;
                Some(SnapshotNode {
                    id,
                    name: PointLabel::resolve(store, id).name,
                    latitude: position.latitude,
                    longitude: position.longitude,
                    altitude: position.altitude,
                })
            })
            .collect();

        Self {
            nodes,
            edges: graph.edges(),
        }
    }
}
