//! Edge reports and graph snapshots.

use anyhow::Result;

use geopath_cli::output::{render_edge, render_snapshot};
use geopath_lib::{EdgeSummary, PathOptions};

use super::{apply_edges, CommandContext};

/// Connect two points and report the resulting edge. Edges live only for
/// the duration of one invocation.
pub fn handle_connect(context: &CommandContext, from: &str, to: &str) -> Result<()> {
    let (mut session, _) = context.open_session(PathOptions::default())?;
    let from = session.store().resolve(from)?;
    let to = session.store().resolve(to)?;
    let insertion = session.add_edge(from, to)?;
    let summary = EdgeSummary::from_insertion(session.store(), &insertion);

    context.emit(&summary, |out, palette| render_edge(out, &summary, palette))
}

pub fn handle_snapshot(context: &CommandContext, edges: &[String]) -> Result<()> {
    let (mut session, _) = context.open_session(PathOptions::default())?;
    apply_edges(&mut session, edges)?;
    let snapshot = session.snapshot();

    context.emit(&snapshot, |out, palette| {
        render_snapshot(out, &snapshot, palette)
    })
}
