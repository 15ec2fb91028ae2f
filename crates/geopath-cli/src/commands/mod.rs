//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::warn;

use geopath_cli::output::{write_json, OutputFormat};
use geopath_cli::terminal::ColorPalette;
use geopath_lib::{JsonFileRepository, PathOptions, Session};

pub mod graph;
pub mod points;
pub mod route;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub points: PathBuf,
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl CommandContext {
    pub fn new(points: PathBuf, format: OutputFormat) -> Self {
        Self {
            points,
            format,
            palette: ColorPalette::detect(),
        }
    }

    pub fn repository(&self) -> JsonFileRepository {
        JsonFileRepository::new(&self.points)
    }

    /// Load the point file into a fresh session.
    pub fn open_session(&self, options: PathOptions) -> Result<(Session, JsonFileRepository)> {
        let repository = self.repository();
        let (session, summary) = Session::open(&repository, options)
            .with_context(|| format!("failed to load points from {}", self.points.display()))?;
        if !summary.skipped.is_empty() {
            warn!(
                skipped = summary.skipped.len(),
                "some records lack coordinates and are listed but not routable"
            );
        }
        Ok((session, repository))
    }

    /// Write `value` as JSON or hand stdout to `text`.
    pub fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&mut io::StdoutLock<'static>, &ColorPalette) -> io::Result<()>,
    {
        let mut out = io::stdout().lock();
        match self.format {
            OutputFormat::Json => write_json(&mut out, value)?,
            OutputFormat::Text => text(&mut out, &self.palette)?,
        }
        out.flush()?;
        Ok(())
    }
}

/// Add every `--edge A B` pair to the session. Endpoints are names or ids.
pub fn apply_edges(session: &mut Session, edges: &[String]) -> Result<()> {
    if edges.len() % 2 != 0 {
        bail!("--edge expects two point references");
    }
    for pair in edges.chunks_exact(2) {
        let from = session.store().resolve(&pair[0])?;
        let to = session.store().resolve(&pair[1])?;
        session
            .add_edge(from, to)
            .with_context(|| format!("failed to connect '{}' and '{}'", pair[0], pair[1]))?;
    }
    Ok(())
}
