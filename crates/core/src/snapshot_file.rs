//! Progression snapshot persistence: a JSON envelope carrying the snapshot
//! plus a SHA-256 integrity hash over the canonical payload encoding.
//! Loading validates shape, version, and hash and fails with a typed error
//! rather than handing gameplay a corrupt snapshot. Writes go through a
//! temp file and rename so a crash never leaves a half-written snapshot.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::progression::ProgressionSnapshot;

const FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize, Debug)]
struct FileEnvelope {
    format_version: u16,
    payload: ProgressionSnapshot,
    sha256_hex: String,
}

fn payload_sha256(payload_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload_json.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

#[derive(Debug)]
pub enum SnapshotFileError {
    Io(io::Error),
    InvalidJson { message: String },
    UnsupportedVersion { found: u16 },
    /// The stored hash does not match the recomputed payload hash.
    IntegrityMismatch,
}

impl fmt::Display for SnapshotFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "snapshot I/O error: {error}"),
            Self::InvalidJson { message } => write!(f, "invalid snapshot JSON: {message}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported snapshot format version {found}")
            }
            Self::IntegrityMismatch => write!(f, "snapshot integrity hash mismatch"),
        }
    }
}

pub fn save_snapshot(path: &Path, snapshot: &ProgressionSnapshot) -> Result<(), SnapshotFileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(SnapshotFileError::Io)?;
    }

    let payload_json = serde_json::to_string(snapshot)
        .map_err(|error| SnapshotFileError::InvalidJson { message: error.to_string() })?;
    let envelope = FileEnvelope {
        format_version: FORMAT_VERSION,
        payload: snapshot.clone(),
        sha256_hex: payload_sha256(&payload_json),
    };
    let json = serde_json::to_string_pretty(&envelope)
        .map_err(|error| SnapshotFileError::InvalidJson { message: error.to_string() })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(SnapshotFileError::Io)?;
    fs::rename(&tmp_path, path).map_err(SnapshotFileError::Io)?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<ProgressionSnapshot, SnapshotFileError> {
    let content = fs::read_to_string(path).map_err(SnapshotFileError::Io)?;
    let envelope: FileEnvelope = serde_json::from_str(&content)
        .map_err(|error| SnapshotFileError::InvalidJson { message: error.to_string() })?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(SnapshotFileError::UnsupportedVersion { found: envelope.format_version });
    }

    let payload_json = serde_json::to_string(&envelope.payload)
        .map_err(|error| SnapshotFileError::InvalidJson { message: error.to_string() })?;
    if payload_sha256(&payload_json) != envelope.sha256_hex {
        return Err(SnapshotFileError::IntegrityMismatch);
    }

    Ok(envelope.payload)
}
