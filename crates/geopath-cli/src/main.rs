use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geopath_cli::output::OutputFormat;
use geopath_lib::resolve_points_path;

mod commands;

use commands::route::{HeuristicArg, RouteArgs};
use commands::CommandContext;

#[derive(Parser, Debug)]
#[command(author, version, about = "Geolocated point graph utilities")]
struct Cli {
    /// Point file to read and write (JSON array of records).
    #[arg(long, global = true)]
    points: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every stored point, including records kept for display only.
    List,
    /// Append one JSON record to the point file.
    Ingest {
        /// Record as a JSON object. Read from stdin when omitted.
        record: Option<String>,
    },
    /// Give a point a new display name.
    Rename {
        /// Point identifier.
        #[arg(long)]
        id: u64,
        /// New display name.
        #[arg(long)]
        name: String,
    },
    /// Delete a point from the point file.
    Remove {
        /// Point identifier.
        #[arg(long)]
        id: u64,
    },
    /// Report the edge that connecting two points would create.
    Connect {
        /// First point (name or id).
        #[arg(long = "from")]
        from: String,
        /// Second point (name or id).
        #[arg(long = "to")]
        to: String,
    },
    /// Find the shortest path between two points.
    Route {
        /// Starting point (name or id).
        #[arg(long = "from")]
        from: String,
        /// Destination point (name or id).
        #[arg(long = "to")]
        to: String,
        /// Undirected edge to add before searching. Repeatable.
        #[arg(long = "edge", num_args = 2, value_names = ["A", "B"])]
        edges: Vec<String>,
        /// Heuristic guiding the search.
        #[arg(long, value_enum, default_value_t = HeuristicArg::Euclidean)]
        heuristic: HeuristicArg,
        /// Abort after expanding this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Dump nodes and weighted edges for plotting.
    Snapshot {
        /// Undirected edge to add before the dump. Repeatable.
        #[arg(long = "edge", num_args = 2, value_names = ["A", "B"])]
        edges: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let points = resolve_points_path(cli.points.as_deref())
        .context("failed to resolve the point file location")?;
    let context = CommandContext::new(points, cli.format);

    match cli.command {
        Command::List => commands::points::handle_list(&context),
        Command::Ingest { record } => commands::points::handle_ingest(&context, record.as_deref()),
        Command::Rename { id, name } => commands::points::handle_rename(&context, id, &name),
        Command::Remove { id } => commands::points::handle_remove(&context, id),
        Command::Connect { from, to } => commands::graph::handle_connect(&context, &from, &to),
        Command::Route {
            from,
            to,
            edges,
            heuristic,
            max_expansions,
        } => commands::route::handle_route(
            &context,
            &RouteArgs {
                from,
                to,
                edges,
                heuristic,
                max_expansions,
            },
        ),
        Command::Snapshot { edges } => commands::graph::handle_snapshot(&context, &edges),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
