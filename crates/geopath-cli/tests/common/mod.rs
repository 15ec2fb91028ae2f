use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Three named points one degree apart on the equator plus one record
/// without an altitude.
pub fn fixture_records() -> Value {
    json!([
        { "latitude": 0.0, "longitude": 0.0, "altitude": 0.0, "name": "Alpha" },
        { "latitude": 0.0, "longitude": 1.0, "altitude": 0.0, "name": "Bravo" },
        { "latitude": "0.0", "longitude": "2.0", "altitude": "0.0", "name": "Charlie",
          "timestamp": "2024-05-01T12:00:00Z" },
        { "latitude": 10.0, "longitude": 10.0 }
    ])
}

/// Temporary directory holding a point file.
pub struct PointsFile {
    _dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl PointsFile {
    pub fn with_fixture() -> Self {
        let file = Self::empty();
        let body = serde_json::to_string_pretty(&fixture_records()).expect("serialize fixture");
        fs::write(&file.path, body).expect("write fixture");
        file
    }

    /// Path inside a fresh directory; the file itself does not exist yet.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("received_data.json");
        Self { _dir: dir, path }
    }

    pub fn records(&self) -> Vec<Value> {
        read_records(&self.path)
    }

    /// Command with logging silenced, color disabled and `--points` set.
    pub fn command(&self) -> Command {
        let mut cmd = base_command();
        cmd.arg("--points").arg(&self.path);
        cmd
    }
}

#[allow(dead_code)]
pub fn read_records(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).expect("read point file");
    serde_json::from_str(&content).expect("point file is a JSON array")
}

pub fn base_command() -> Command {
    let mut cmd = cargo_bin_cmd!("geopath");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("GEOPATH_POINTS_FILE");
    cmd
}
