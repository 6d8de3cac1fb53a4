// Machine snapshots
//
// Serialization of the built-in machine's complete state to JSON files, and
// the error type every `Machine` implementation reports snapshot failures with.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading or saving a machine snapshot
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error
    Io(io::Error),

    /// Serialization/deserialization error
    Serialization(serde_json::Error),

    /// Snapshot format version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// Snapshot content does not fit this machine
    Invalid(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {}", e),
            SnapshotError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SnapshotError::Invalid(reason) => write!(f, "Invalid snapshot: {}", reason),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Serialization(e)
    }
}

/// Current snapshot format version
pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// Full state of the built-in machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MachineSnapshot {
    /// Version number for compatibility checking
    pub version: u32,

    /// When the snapshot was taken (RFC 3339)
    pub timestamp: String,

    /// Total cycles executed since reset
    pub cycles: u64,

    /// Completed frames since reset
    pub frame: u64,

    /// Controller input lines (buttons 1-4, X, Y)
    pub inputs: [u8; 6],

    /// Working RAM contents
    pub ram: Vec<u8>,
}

impl MachineSnapshot {
    /// Write the snapshot as pretty JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a snapshot and check its version
    pub fn load_from_file(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        let snapshot: MachineSnapshot = serde_json::from_str(&json)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }

        Ok(snapshot)
    }
}
