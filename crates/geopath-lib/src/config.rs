use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable that overrides the point file location.
pub const POINTS_FILE_ENV: &str = "GEOPATH_POINTS_FILE";

/// Default filename for the point list.
const POINTS_FILENAME: &str = "received_data.json";

/// Resolve the default point file using platform-specific project directories.
pub fn default_points_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "geopath", "geopath").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(POINTS_FILENAME))
}

/// Resolve the point file from, in order: an explicit path, the
/// [`POINTS_FILE_ENV`] variable, and [`default_points_path`].
pub fn resolve_points_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_from(explicit, env::var_os(POINTS_FILE_ENV))
}

fn resolve_from(explicit: Option<&Path>, from_env: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicit point file");
        return Ok(path.to_path_buf());
    }

    if let Some(value) = from_env.filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), "using point file from {}", POINTS_FILE_ENV);
        return Ok(path);
    }

    let path = default_points_path()?;
    debug!(path = %path.display(), "using default point file");
    Ok(path)
}
