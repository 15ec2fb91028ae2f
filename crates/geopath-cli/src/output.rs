//! Renderers for command results.
//!
//! Every renderer writes to a caller-supplied [`Write`] so tests can capture
//! output. JSON output is pretty-printed and never colored.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use geopath_lib::{Coordinate, EdgeSummary, GraphSnapshot, PointRow, RouteSummary};

use crate::terminal::{format_meters, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn coordinate_text(value: Option<&Coordinate>) -> String {
    match value {
        Some(Coordinate::Number(n)) => n.to_string(),
        Some(Coordinate::Text(s)) => s.clone(),
        Some(Coordinate::Other(value)) => value.to_string(),
        None => "-".to_string(),
    }
}

/// Render the point listing.
pub fn render_points<W: Write>(
    out: &mut W,
    rows: &[PointRow],
    palette: &ColorPalette,
) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No points stored.");
    }

    writeln!(out, "Points ({}):", rows.len())?;
    for row in rows {
        write!(
            out,
            "  {gray}[{id}]{reset} {white}{name}{reset}  lat {lat}, lon {lon}, alt {alt}",
            gray = palette.gray,
            white = palette.white_bold,
            reset = palette.reset,
            id = row.id,
            name = row.name,
            lat = coordinate_text(row.latitude.as_ref()),
            lon = coordinate_text(row.longitude.as_ref()),
            alt = coordinate_text(row.altitude.as_ref()),
        )?;
        if let Some(timestamp) = &row.timestamp {
            write!(out, "  {}@ {}{}", palette.gray, timestamp, palette.reset)?;
        }
        if !row.graphable {
            write!(out, "  {}(display only){}", palette.orange, palette.reset)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render the weight of an edge between two points. Edges only live for one
/// invocation, so the report says so.
pub fn render_edge<W: Write>(
    out: &mut W,
    edge: &EdgeSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "Edge between {white}{from}{reset} and {white}{to}{reset}. \
         Distance: {green}{surface}{reset}. 3D Height: {green}{height}{reset}.",
        white = palette.white_bold,
        green = palette.green,
        reset = palette.reset,
        from = edge.from.name,
        to = edge.to.name,
        surface = format_meters(edge.surface_distance),
        height = format_meters(edge.altitude_difference),
    )?;
    write!(out, "Edge weight: {}", format_meters(edge.weight))?;
    if edge.replaced {
        write!(out, " {}(replaced existing edge){}", palette.gray, palette.reset)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{}Edges are not saved; pass --edge to route or snapshot.{}",
        palette.gray, palette.reset
    )
}

/// Render a computed path.
pub fn render_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "Shortest path from {} to {} ({} hops; heuristic: {}):",
        summary.start.name, summary.goal.name, summary.hops, summary.heuristic
    )?;

    let last = summary.steps.len().saturating_sub(1);
    for step in &summary.steps {
        let (tag_color, tag) = if step.index == 0 {
            (palette.tag_start, "STRT")
        } else if step.index == last {
            (palette.tag_goal, "GOAL")
        } else {
            ("", "    ")
        };
        let arrow = if step.index == 0 { "   " } else { "-->" };
        write!(
            out,
            " {tag_color}{tag}{reset} {arrow} {white}{name}{reset} {gray}[{id}]{reset}",
            reset = palette.reset,
            white = palette.white_bold,
            gray = palette.gray,
            name = step.name,
            id = step.id,
        )?;
        if let Some(weight) = step.leg_weight {
            write!(out, " {}({}){}", palette.green, format_meters(weight), palette.reset)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Total distance: {}", format_meters(summary.total_weight))?;
    writeln!(
        out,
        "{}Expanded {} nodes{}",
        palette.gray, summary.expanded, palette.reset
    )
}

/// Render the graph as node and edge tables.
pub fn render_snapshot<W: Write>(
    out: &mut W,
    snapshot: &GraphSnapshot,
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(out, "Nodes ({}):", snapshot.nodes.len())?;
    for node in &snapshot.nodes {
        writeln!(
            out,
            "  {gray}[{id}]{reset} {name}  ({lat}, {lon}, {alt})",
            gray = palette.gray,
            reset = palette.reset,
            id = node.id,
            name = node.name,
            lat = node.latitude,
            lon = node.longitude,
            alt = node.altitude,
        )?;
    }

    writeln!(out, "Edges ({}):", snapshot.edges.len())?;
    for edge in &snapshot.edges {
        writeln!(
            out,
            "  {} <-> {}  {}{}{}",
            edge.a,
            edge.b,
            palette.green,
            format_meters(edge.weight),
            palette.reset
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geopath_lib::{PathOptions, PointRecord, Session};

    fn session() -> Session {
        let mut session = Session::new();
        session.load_points(vec![
            PointRecord::new(0.0, 0.0, 0.0).with_name("Alpha"),
            PointRecord::new(0.0, 1.0, 0.0),
            PointRecord::new(0.0, 2.0, 0.0),
        ]);
        session.add_edge(0, 1).expect("edge a-b");
        session.add_edge(1, 2).expect("edge b-c");
        session
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn route_text_lists_every_step_and_total() {
        let session = session();
        let result = session.shortest_path(0, 2).expect("path");
        let summary = RouteSummary::from_path(
            session.store(),
            session.graph(),
            PathOptions::default().heuristic,
            &result,
        )
        .expect("summary");

        let text = render(|out| render_route(out, &summary, &ColorPalette::plain()));
        assert!(text.contains("Shortest path from Alpha to Node 3 (2 hops; heuristic: euclidean)"));
        assert!(text.contains("STRT     Alpha [0]"));
        assert!(text.contains("--> Node 2 [1]"));
        assert!(text.contains("GOAL --> Node 3 [2]"));
        assert!(text.contains("Total distance: 222,389."));
    }

    #[test]
    fn edge_text_reports_distance_and_height() {
        let mut session = Session::new();
        session.load_points(vec![
            PointRecord::new(0.0, 0.0, 0.0),
            PointRecord::new(0.0, 0.0, 100.0),
        ]);
        let insertion = session.add_edge(0, 1).expect("edge");
        let edge = EdgeSummary::from_insertion(session.store(), &insertion);

        let text = render(|out| render_edge(out, &edge, &ColorPalette::plain()));
        assert!(text.contains("Edge between Node 1 and Node 2."));
        assert!(text.contains("Distance: 0.00 m. 3D Height: 100.00 m."));
        assert!(!text.contains("replaced"));
        assert!(text.contains("Edges are not saved"));
    }

    #[test]
    fn point_listing_flags_display_only_rows() {
        let mut session = Session::new();
        let mut partial = PointRecord::new(1.0, 2.0, 0.0);
        partial.altitude = None;
        session.load_points(vec![PointRecord::new(0.0, 0.0, 0.0), partial]);
        let rows = geopath_lib::point_rows(session.store());

        let text = render(|out| render_points(out, &rows, &ColorPalette::plain()));
        assert!(text.starts_with("Points (2):"));
        assert!(text.contains("[1] Node 2  lat 1, lon 2, alt -  (display only)"));
    }

    #[test]
    fn empty_listing_has_message() {
        let text = render(|out| render_points(out, &[], &ColorPalette::plain()));
        assert_eq!(text, "No points stored.\n");
    }

    #[test]
    fn json_output_ends_with_newline() {
        let snapshot = session().snapshot();
        let text = render(|out| write_json(out, &snapshot));
        assert!(text.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(parsed["edges"].as_array().map(Vec::len), Some(2));
    }
}
