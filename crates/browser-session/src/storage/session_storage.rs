//! File backed snapshot storage

use super::snapshot_serializer::SnapshotSerializer;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use browser_engine::Engine;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Reads and writes a [`Snapshot`] as JSON file
///
/// Writes go to a temporary file next to the target which then replaces the
/// target, a crash mid-write leaves the previous snapshot intact.
pub struct SessionStorage {
    path: PathBuf,
    serializer: SnapshotSerializer,
}

impl SessionStorage {
    pub fn new(engine: Arc<dyn Engine>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            serializer: SnapshotSerializer::new(engine),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot, `None` if nothing was stored yet
    pub fn read(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            log::debug!("No session snapshot at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session snapshot: {:?}", self.path))?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session snapshot: {:?}", self.path))?;
        let snapshot = self
            .serializer
            .from_json(&json)
            .with_context(|| format!("Invalid session snapshot: {:?}", self.path))?;

        log::info!(
            "Read session snapshot with {} sessions from {:?}",
            snapshot.len(),
            self.path
        );
        Ok(Some(snapshot))
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.serializer.to_json(snapshot))
            .context("Failed to serialize session snapshot")?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;

        let mut file = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        file.write_all(content.as_bytes())
            .context("Failed to write session snapshot")?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write session snapshot: {:?}", self.path))?;

        log::info!(
            "Saved session snapshot with {} sessions to {:?}",
            snapshot.len(),
            self.path
        );
        Ok(())
    }

    /// Remove the stored snapshot
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session snapshot: {:?}", self.path))?;
        }
        Ok(())
    }
}
