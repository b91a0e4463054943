//! Snapshot export and restore.
//!
//! A snapshot is the full list of records in a store plus a format version,
//! encoded as JSON. Restoring goes through
//! [`TodoStore::restore`](crate::TodoStore::restore), which re-validates every
//! record, so a hand-edited file cannot smuggle an invalid todo in.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;
use todo_store_core::{Todo, TodoError, TodoRecord};

/// Format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors from snapshot encoding, decoding and restore.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot was written by an unknown format version.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// The snapshot is not valid JSON for this format.
    #[error("Failed to encode or decode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the snapshot file failed.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record broke a todo invariant.
    #[error("Invalid record in snapshot: {0}")]
    Todo(#[from] TodoError),
}

/// Serialisable copy of every todo in a store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSnapshot {
    /// Format version
    pub version: u32,
    /// Every record, oldest first
    pub todos: Vec<TodoRecord>,
}

impl TodoSnapshot {
    /// Creates a current-version snapshot from plain records
    #[must_use]
    pub const fn new(todos: Vec<TodoRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            todos,
        }
    }

    /// Creates a snapshot from todos
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        Self::new(todos.iter().map(Todo::to_record).collect())
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the snapshot holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if encoding or the underlying write fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::Json`] if the input is not a snapshot
    /// - [`SnapshotError::UnsupportedVersion`] for an unknown version
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Writes the snapshot to a file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the file cannot be created or flushed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), todos = self.len(), "Saved snapshot");
        Ok(())
    }

    /// Reads a snapshot from a file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the file cannot be opened, or any
    /// error [`Self::from_reader`] returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let snapshot = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::debug!(path = %path.display(), todos = snapshot.len(), "Loaded snapshot");
        Ok(snapshot)
    }

    pub(crate) fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::UnsupportedVersion(self.version))
        }
    }
}
