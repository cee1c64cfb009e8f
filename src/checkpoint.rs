//! Deterministic persistence for fitted model state.
//!
//! The model artifact is an opaque binary blob at a fixed path: each save
//! overwrites the previous one, and a schema-version header stored with the
//! payload lets incompatible files be rejected during load instead of being
//! deserialized into garbage weights.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode::Options;

/// Errors that can occur while saving or loading a model checkpoint.
#[derive(Debug)]
pub enum CheckpointError {
    /// Underlying I/O failure while reading or writing the artifact.
    Io(std::io::Error),
    /// Serialization or deserialization error from the binary codec.
    Serialization(bincode::Error),
    /// The artifact was well formed but carries an incompatible schema version.
    VersionMismatch { expected: u32, found: u32 },
    /// The artifact did not match the expected structure.
    InvalidFormat(String),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointError::Io(err) => write!(f, "I/O error while accessing checkpoint: {err}"),
            CheckpointError::Serialization(err) => {
                write!(f, "Failed to (de)serialize checkpoint payload: {err}")
            }
            CheckpointError::VersionMismatch { expected, found } => write!(
                f,
                "Checkpoint version mismatch: expected {expected}, found {found}",
            ),
            CheckpointError::InvalidFormat(msg) => {
                write!(f, "Checkpoint file has invalid structure: {msg}")
            }
        }
    }
}

impl std::error::Error for CheckpointError {}

impl From<std::io::Error> for CheckpointError {
    fn from(err: std::io::Error) -> Self {
        CheckpointError::Io(err)
    }
}

impl From<bincode::Error> for CheckpointError {
    fn from(err: bincode::Error) -> Self {
        CheckpointError::Serialization(err)
    }
}

/// Deterministic binary codec shared by all checkpoint payloads.
///
/// Fixed-width integers and an explicit byte order keep the on-disk bytes
/// identical for identical state, so a save/load round trip reproduces the
/// fitted parameters bit for bit.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_little_endian()
}

/// Write a serializable snapshot to `path`, creating parent directories.
pub(crate) fn write_snapshot<P, T>(snapshot: &T, path: P) -> Result<(), CheckpointError>
where
    P: AsRef<Path>,
    T: serde::Serialize,
{
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    codec().serialize_into(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

/// Read a snapshot previously written with [`write_snapshot`].
pub(crate) fn read_snapshot<P, T>(path: P) -> Result<T, CheckpointError>
where
    P: AsRef<Path>,
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    Ok(codec().deserialize_from(&mut reader)?)
}

/// Components with a persisted on-disk representation implement this trait.
pub trait Checkpointable: Sized {
    /// Save the current state to `path`, overwriting any prior artifact.
    fn save_checkpoint<P: AsRef<Path>>(&self, path: P) -> Result<(), CheckpointError>;

    /// Load a state from `path`, replacing any existing instance.
    fn load_checkpoint<P: AsRef<Path>>(path: P) -> Result<Self, CheckpointError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        version: u32,
        values: Vec<f32>,
    }

    #[test]
    fn snapshot_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.bin");

        let payload = Payload {
            version: 1,
            values: vec![0.1, -2.5, 1e-15, f32::MIN_POSITIVE],
        };

        write_snapshot(&payload, &path).unwrap();
        let restored: Payload = read_snapshot(&path).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Payload, _> = read_snapshot(dir.path().join("absent.bin"));
        assert!(matches!(result, Err(CheckpointError::Io(_))));
    }
}
