//! Point file maintenance: list, ingest, rename and remove.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::warn;

use geopath_cli::output::render_points;
use geopath_lib::{point_rows, PathOptions, PointRecord, PointRepository};

use super::CommandContext;

pub fn handle_list(context: &CommandContext) -> Result<()> {
    let (session, _) = context.open_session(PathOptions::default())?;
    let rows = point_rows(session.store());
    context.emit(&rows, |out, palette| render_points(out, &rows, palette))
}

/// Append one record. The file is updated as a plain array append so records
/// the engine cannot graph are stored untouched.
pub fn handle_ingest(context: &CommandContext, record: Option<&str>) -> Result<()> {
    let raw = match record {
        Some(raw) => raw.to_string(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read record from stdin")?;
            buffer
        }
    };

    let record: PointRecord =
        serde_json::from_str(raw.trim()).context("record must be a JSON object")?;
    if let Some(field) = record.missing_coordinate() {
        warn!(field, "ingested record lacks a numeric coordinate");
    }

    let repository = context.repository();
    let count = repository
        .append(record)
        .with_context(|| format!("failed to update {}", context.points.display()))?;
    let id = count - 1;

    context.emit(&json!({ "id": id, "count": count }), |out, _| {
        writeln!(out, "Data received. Stored as point {id} ({count} total).")
    })
}

pub fn handle_rename(context: &CommandContext, id: u64, name: &str) -> Result<()> {
    let (mut session, repository) = context.open_session(PathOptions::default())?;
    session.rename(id, name)?;
    session
        .save(&repository)
        .with_context(|| format!("failed to write {}", context.points.display()))?;

    context.emit(&json!({ "id": id, "name": name }), |out, palette| {
        writeln!(
            out,
            "Renamed point {id} to {}{name}{}.",
            palette.white_bold, palette.reset
        )
    })
}

pub fn handle_remove(context: &CommandContext, id: u64) -> Result<()> {
    let (mut session, repository) = context.open_session(PathOptions::default())?;
    let name = session.store().name(id);
    session.remove(id)?;
    session
        .save(&repository)
        .with_context(|| format!("failed to write {}", context.points.display()))?;

    // The file is saved without the removed record, so the next load shifts
    // every later id down by one.
    let renumbered = session.store().iter().any(|stored| stored.id > id);
    let name = name.unwrap_or_default();
    context.emit(
        &json!({
            "id": id,
            "name": name,
            "remaining": session.store().len(),
            "renumbered": renumbered,
        }),
        |out, palette| {
            writeln!(out, "Removed point {id} ({name}).")?;
            if renumbered {
                writeln!(
                    out,
                    "{}Points after {id} are renumbered; run `geopath list` or refer to points by name.{}",
                    palette.orange, palette.reset
                )?;
            }
            Ok(())
        },
    )
}
