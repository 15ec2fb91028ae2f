//! Coordinating object for the point store and the graph derived from it.
//!
//! A [`Session`] is a plain owned value. Mutating operations take `&mut self`,
//! so callers that share one across threads must wrap it in a single lock;
//! searches never observe a half-applied reload or edge insertion.

use tracing::{debug, info};

use crate::error::Result;
use crate::graph::{build_graph, EdgeInsertion, GeoGraph};
use crate::output::GraphSnapshot;
use crate::path::{shortest_path, PathOptions, PathResult};
use crate::persistence::PointRepository;
use crate::store::{LoadSummary, PointId, PointRecord, PointStore};

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: PointStore,
    graph: GeoGraph,
    options: PathOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PathOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Load every record from `repository` into a fresh session.
    pub fn open<R>(repository: &R, options: PathOptions) -> Result<(Self, LoadSummary)>
    where
        R: PointRepository + ?Sized,
    {
        let mut session = Self::with_options(options);
        let summary = session.reload(repository)?;
        Ok((session, summary))
    }

    /// Replace the point list and rebuild the graph. Every edge is discarded.
    pub fn load_points(&mut self, records: Vec<PointRecord>) -> LoadSummary {
        let summary = self.store.load(records);
        self.graph = build_graph(&self.store);
        summary
    }

    /// Reload the point list from `repository`.
    pub fn reload<R>(&mut self, repository: &R) -> Result<LoadSummary>
    where
        R: PointRepository + ?Sized,
    {
        let records = repository.load()?;
        Ok(self.load_points(records))
    }

    /// Write the current point list to `repository`.
    pub fn save<R>(&self, repository: &R) -> Result<()>
    where
        R: PointRepository + ?Sized,
    {
        repository.save(&self.store.records())
    }

    /// Ingest one record. Graphable records become nodes immediately.
    pub fn append_point(&mut self, record: PointRecord) -> PointId {
        let id = self.store.append(record);
        if let Some(point) = self.store.point(id) {
            self.graph.insert_node(id, point.position);
        }
        info!(id, "ingested point");
        id
    }

    /// Connect two points; see [`GeoGraph::add_edge`].
    pub fn add_edge(&mut self, from: PointId, to: PointId) -> Result<EdgeInsertion> {
        self.graph.add_edge(from, to)
    }

    pub fn rename(&mut self, id: PointId, name: &str) -> Result<()> {
        self.store.rename(id, name)
    }

    /// Delete a point and every edge touching it.
    pub fn remove(&mut self, id: PointId) -> Result<PointRecord> {
        let record = self.store.remove(id)?;
        if self.graph.contains(id) {
            self.graph.remove_node(id)?;
        }
        debug!(id, edges = self.graph.edge_count(), "removed point from session");
        Ok(record)
    }

    /// Shortest path using the session's [`PathOptions`].
    pub fn shortest_path(&self, start: PointId, goal: PointId) -> Result<PathResult> {
        shortest_path(&self.graph, start, goal, &self.options)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.store, &self.graph)
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn graph(&self) -> &GeoGraph {
        &self.graph
    }

    pub fn options(&self) -> &PathOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PathOptions) {
        self.options = options;
    }
}
