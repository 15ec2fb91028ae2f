use thiserror::Error;

use crate::store::PointId;

/// Convenient result alias for the geopath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The identifier does not name a point in the current store or graph.
    #[error("invalid point identifier {id}")]
    InvalidIdentifier { id: PointId },

    /// Raised when an edge is requested between a point and itself.
    #[error("refusing to connect point {id} to itself")]
    SelfLoopRejected { id: PointId },

    /// Raised when the goal cannot be reached from the start.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: PointId, goal: PointId },

    /// Raised when a rename is attempted with a blank name.
    #[error("name for point {id} must not be empty")]
    EmptyName { id: PointId },

    /// An ingested record lacks a usable coordinate. Reported per record during
    /// a load; never fatal to the load itself.
    #[error("record {id} is missing a numeric {field}")]
    MalformedRecord { id: PointId, field: &'static str },

    /// Raised when a path result lacks any steps.
    #[error("path result was empty")]
    EmptyPath,

    /// Raised when a search expands more nodes than the configured cap.
    #[error("search aborted after expanding {limit} nodes")]
    SearchLimitExceeded { limit: usize },

    /// Raised when a point name could not be resolved.
    #[error("unknown point name: {name}{}", format_suggestions(.suggestions))]
    UnknownPoint {
        name: String,
        suggestions: Vec<String>,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the point file")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding and decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
