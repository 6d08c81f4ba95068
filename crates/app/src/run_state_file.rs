//! Progression persistence for the desktop shell: resolves the platform
//! data directory and delegates the integrity-checked file format to the
//! core snapshot module. An unreadable or corrupt file starts a fresh run
//! rather than surfacing an error at launch.

use std::path::{Path, PathBuf};

use cryptrun_core::snapshot_file::{self, SnapshotFileError};
use cryptrun_core::ProgressionSnapshot;
use directories::ProjectDirs;

pub fn default_snapshot_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Cryptrun").map(|dirs| dirs.data_dir().join("progression.json"))
}

pub fn fresh_snapshot() -> ProgressionSnapshot {
    ProgressionSnapshot { depth: 1, unlocked_upgrades: Vec::new() }
}

pub fn load_or_fresh(path: &Path) -> ProgressionSnapshot {
    snapshot_file::load_snapshot(path).unwrap_or_else(|_| fresh_snapshot())
}

pub fn store(path: &Path, snapshot: &ProgressionSnapshot) -> Result<(), SnapshotFileError> {
    snapshot_file::save_snapshot(path, snapshot)
}
