//! Route command handler for computing paths between points.

use anyhow::{Context, Result};
use clap::ValueEnum;

use geopath_cli::output::render_route;
use geopath_lib::{PathHeuristic, PathOptions, RouteSummary};

use super::{apply_edges, CommandContext};

/// `--heuristic` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    /// Straight-line distance over raw latitude, longitude and altitude.
    Euclidean,
    /// Great-circle distance ignoring altitude; never overestimates.
    GreatCircle,
    /// No estimate; plain Dijkstra.
    #[value(name = "none")]
    Dijkstra,
}

impl From<HeuristicArg> for PathHeuristic {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::Euclidean => PathHeuristic::Euclidean,
            HeuristicArg::GreatCircle => PathHeuristic::GreatCircle,
            HeuristicArg::Dijkstra => PathHeuristic::None,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteArgs {
    /// Starting point (name or id).
    pub from: String,
    /// Destination point (name or id).
    pub to: String,
    /// Flattened `--edge A B` pairs.
    pub edges: Vec<String>,
    pub heuristic: HeuristicArg,
    pub max_expansions: Option<usize>,
}

impl RouteArgs {
    pub fn options(&self) -> PathOptions {
        let options = PathOptions::default().with_heuristic(self.heuristic.into());
        match self.max_expansions {
            Some(limit) => options.with_max_expansions(limit),
            None => options,
        }
    }
}

pub fn handle_route(context: &CommandContext, args: &RouteArgs) -> Result<()> {
    let options = args.options();
    let (mut session, _) = context.open_session(options)?;
    apply_edges(&mut session, &args.edges)?;

    let start = session.store().resolve(&args.from)?;
    let goal = session.store().resolve(&args.to)?;
    let result = session
        .shortest_path(start, goal)
        .with_context(|| format!("no route from '{}' to '{}'", args.from, args.to))?;
    let summary = RouteSummary::from_path(
        session.store(),
        session.graph(),
        options.heuristic,
        &result,
    )?;

    context.emit(&summary, |out, palette| render_route(out, &summary, palette))
}
