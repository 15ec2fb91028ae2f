use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::{raw_euclidean, surface_distance, GeoPosition};
use crate::error::{Error, Result};
use crate::graph::GeoGraph;
use crate::store::PointId;

/// Remaining-cost estimate used to order the A* frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathHeuristic {
    /// Straight-line distance over raw `(lat, lon, alt)`. Degrees and meters
    /// are mixed, so the estimate is not a proven lower bound of the
    /// haversine-based weights and the search is best-effort.
    #[default]
    Euclidean,
    /// Great-circle distance ignoring altitude. Never exceeds the remaining
    /// combined weight, so the returned path is optimal.
    GreatCircle,
    /// No estimate; the search degenerates to Dijkstra.
    None,
}

impl PathHeuristic {
    fn estimate(self, from: &GeoPosition, goal: &GeoPosition) -> f64 {
        match self {
            PathHeuristic::Euclidean => raw_euclidean(from, goal),
            PathHeuristic::GreatCircle => surface_distance(from, goal),
            PathHeuristic::None => 0.0,
        }
    }
}

impl fmt::Display for PathHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathHeuristic::Euclidean => "euclidean",
            PathHeuristic::GreatCircle => "great-circle",
            PathHeuristic::None => "none",
        };
        f.write_str(value)
    }
}

/// Tuning for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    pub heuristic: PathHeuristic,
    /// Abort once this many nodes have been expanded.
    pub max_expansions: Option<usize>,
}

impl PathOptions {
    pub fn with_heuristic(mut self, heuristic: PathHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// Successful search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node identifiers from start to goal, inclusive.
    pub steps: Vec<PointId>,
    /// Sum of the traversed edge weights, in meters.
    pub total_weight: f64,
    /// Number of nodes taken off the frontier.
    pub expanded: usize,
}

impl PathResult {
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Run A* from `start` to `goal`.
///
/// The reported weight is recomputed from the returned steps with
/// [`total_weight`], so it always describes the path that was actually
/// returned even when the heuristic lets the search settle on a suboptimal
/// one.
pub fn shortest_path(
    graph: &GeoGraph,
    start: PointId,
    goal: PointId,
    options: &PathOptions,
) -> Result<PathResult> {
    let start_position = graph
        .position(start)
        .ok_or(Error::InvalidIdentifier { id: start })?;
    let goal_position = graph
        .position(goal)
        .ok_or(Error::InvalidIdentifier { id: goal })?;

    if start == goal {
        return Ok(PathResult {
            steps: vec![start],
            total_weight: 0.0,
            expanded: 0,
        });
    }

    let mut g_score: HashMap<PointId, f64> = HashMap::new();
    let mut parents: HashMap<PointId, Option<PointId>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    let start_estimate = options.heuristic.estimate(&start_position, &goal_position);
    queue.push(AStarEntry::new(start, 0.0, start_estimate));

    while let Some(entry) = queue.pop() {
        let Some(&current_score) = g_score.get(&entry.node) else {
            continue;
        };
        // Stale entry superseded by a cheaper route to the same node.
        if entry.cost.0 > current_score {
            continue;
        }

        expanded += 1;
        if let Some(limit) = options.max_expansions {
            if expanded > limit {
                debug!(start, goal, limit, "search limit exceeded");
                return Err(Error::SearchLimitExceeded { limit });
            }
        }

        if entry.node == goal {
            let steps = reconstruct_path(&parents, start, goal);
            let total_weight = total_weight(graph, &steps)?;
            debug!(
                start,
                goal,
                hops = steps.len() - 1,
                total_weight,
                expanded,
                heuristic = %options.heuristic,
                "path found"
            );
            return Ok(PathResult {
                steps,
                total_weight,
                expanded,
            });
        }

        for edge in graph.neighbours(entry.node)? {
            let next = edge.target;
            let tentative_g = current_score + edge.weight;
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                let heuristic = graph
                    .position(next)
                    .map(|position| options.heuristic.estimate(&position, &goal_position))
                    .unwrap_or(0.0);
                queue.push(AStarEntry::new(next, tentative_g, heuristic));
            }
        }
    }

    debug!(start, goal, expanded, "goal unreachable");
    Err(Error::NoPathFound { start, goal })
}

/// Sum the edge weights along `steps`.
///
/// Fails with [`Error::InvalidIdentifier`] for a step that is not a node and
/// with [`Error::NoPathFound`] when two consecutive steps are not connected.
pub fn total_weight(graph: &GeoGraph, steps: &[PointId]) -> Result<f64> {
    if let Some(&first) = steps.first() {
        if !graph.contains(first) {
            return Err(Error::InvalidIdentifier { id: first });
        }
    }

    steps.windows(2).try_fold(0.0, |total, pair| {
        let (from, to) = (pair[0], pair[1]);
        graph
            .edge_weight(from, to)?
            .map(|weight| total + weight)
            .ok_or(Error::NoPathFound {
                start: from,
                goal: to,
            })
    })
}

fn reconstruct_path(
    parents: &HashMap<PointId, Option<PointId>>,
    start: PointId,
    goal: PointId,
) -> Vec<PointId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: PointId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: PointId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest estimate; ties go to the
        // lower node identifier.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_estimate_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(AStarEntry::new(7, 1.0, 1.0));
        heap.push(AStarEntry::new(3, 2.0, 0.0));
        heap.push(AStarEntry::new(5, 0.5, 0.5));

        assert_eq!(heap.pop().map(|entry| entry.node), Some(5));
        assert_eq!(heap.pop().map(|entry| entry.node), Some(3));
        assert_eq!(heap.pop().map(|entry| entry.node), Some(7));
    }

    #[test]
    fn reconstruct_follows_parent_links() {
        let mut parents = HashMap::new();
        parents.insert(0, None);
        parents.insert(1, Some(0));
        parents.insert(2, Some(1));
        assert_eq!(reconstruct_path(&parents, 0, 2), vec![0, 1, 2]);
    }
}
