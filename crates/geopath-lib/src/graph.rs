use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::distance::{altitude_difference, GeoPosition};
use crate::error::{Error, Result};
use crate::store::{PointId, PointStore};

/// Half of an undirected edge, stored in the adjacency list of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: PointId,
    pub weight: f64,
}

/// Undirected edge reported once per unordered pair, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub a: PointId,
    pub b: PointId,
    pub weight: f64,
}

/// Measurements produced when an edge is inserted. The surface distance and
/// altitude difference are reported separately from the stored weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeInsertion {
    pub from: PointId,
    pub to: PointId,
    pub surface_distance: f64,
    pub altitude_difference: f64,
    pub weight: f64,
    /// `true` when an existing edge between the pair was overwritten.
    pub replaced: bool,
}

/// Undirected weighted graph over point identifiers.
///
/// Nodes carry a copy of their position so the graph can be searched without
/// the store. The store remains the source of truth; rebuild with
/// [`build_graph`] after a reload.
#[derive(Debug, Clone, Default)]
pub struct GeoGraph {
    nodes: HashMap<PointId, GeoPosition>,
    adjacency: HashMap<PointId, Vec<Edge>>,
}

/// Build an edgeless graph holding every graphable point of `store`.
pub fn build_graph(store: &PointStore) -> GeoGraph {
    let mut graph = GeoGraph::default();
    for point in store.points() {
        graph.insert_node(point.id, point.position);
    }
    debug!(nodes = graph.node_count(), "built graph from point store");
    graph
}

impl GeoGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or reposition a node. Existing edges are kept.
    pub fn insert_node(&mut self, id: PointId, position: GeoPosition) {
        self.nodes.insert(id, position);
        self.adjacency.entry(id).or_default();
    }

    /// Drop a node together with every edge touching it.
    pub fn remove_node(&mut self, id: PointId) -> Result<()> {
        if self.nodes.remove(&id).is_none() {
            return Err(Error::InvalidIdentifier { id });
        }
        let edges = self.adjacency.remove(&id).unwrap_or_default();
        for edge in edges {
            if let Some(back) = self.adjacency.get_mut(&edge.target) {
                back.retain(|candidate| candidate.target != id);
            }
        }
        Ok(())
    }

    /// Connect two nodes, replacing the weight of an existing edge.
    pub fn add_edge(&mut self, from: PointId, to: PointId) -> Result<EdgeInsertion> {
        if from == to {
            return Err(Error::SelfLoopRejected { id: from });
        }
        let a = self.require(from)?;
        let b = self.require(to)?;

        let surface = a.surface_distance_to(&b);
        let vertical = altitude_difference(&a, &b);
        let weight = a.edge_weight_to(&b);

        let replaced = self.link(from, to, weight);
        self.link(to, from, weight);

        debug!(from, to, weight, replaced, "inserted edge");
        Ok(EdgeInsertion {
            from,
            to,
            surface_distance: surface,
            altitude_difference: vertical,
            weight,
            replaced,
        })
    }

    fn link(&mut self, from: PointId, to: PointId, weight: f64) -> bool {
        let edges = self.adjacency.entry(from).or_default();
        if let Some(existing) = edges.iter_mut().find(|edge| edge.target == to) {
            existing.weight = weight;
            return true;
        }
        edges.push(Edge { target: to, weight });
        false
    }

    fn require(&self, id: PointId) -> Result<GeoPosition> {
        self.nodes
            .get(&id)
            .copied()
            .ok_or(Error::InvalidIdentifier { id })
    }

    /// Edges leaving `id`.
    pub fn neighbours(&self, id: PointId) -> Result<&[Edge]> {
        self.require(id)?;
        Ok(self
            .adjacency
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Weight of the edge between two nodes, `None` if they are not connected.
    pub fn edge_weight(&self, from: PointId, to: PointId) -> Result<Option<f64>> {
        self.require(to)?;
        let weight = self
            .neighbours(from)?
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight);
        Ok(weight)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn position(&self, id: PointId) -> Option<GeoPosition> {
        self.nodes.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<PointId> {
        let mut ids: Vec<PointId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every edge once, ordered by endpoint identifiers.
    pub fn edges(&self) -> Vec<EdgeRecord> {
        let mut edges: Vec<EdgeRecord> = self
            .adjacency
            .iter()
            .flat_map(|(&a, targets)| {
                targets
                    .iter()
                    .filter(move |edge| a < edge.target)
                    .map(move |edge| EdgeRecord {
                        a,
                        b: edge.target,
                        weight: edge.weight,
                    })
            })
            .collect();
        edges.sort_by(|x, y| x.a.cmp(&y.a).then_with(|| x.b.cmp(&y.b)));
        edges
    }
}
