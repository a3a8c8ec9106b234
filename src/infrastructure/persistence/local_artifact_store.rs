//! Local artifact store implementation
//!
//! Persists carved files as plain files in a single output directory.

use crate::domain::repositories::{ArtifactEntry, ArtifactStore, StoreError};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory-backed artifact store
///
/// Names are flat: anything that could escape the directory is rejected.
/// Writes are staged under a hidden name and renamed into place, so a
/// listed artifact always holds the complete bytes it was written with.
pub struct LocalArtifactStore {
    output_dir: PathBuf,
}

impl LocalArtifactStore {
    /// Opens the store, creating the output directory if needed
    pub fn new(output_dir: &Path) -> Result<Self, StoreError> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).map_err(|e| {
                if e.kind() == io::ErrorKind::PermissionDenied {
                    StoreError::PermissionDenied(output_dir.display().to_string())
                } else {
                    StoreError::Io(e)
                }
            })?;
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Returns the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolves a flat artifact name inside the output directory
    fn artifact_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let is_flat = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0'])
            && !name.starts_with('.');

        if !is_flat {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        Ok(self.output_dir.join(name))
    }

    fn map_missing(name: &str, e: io::Error) -> StoreError {
        match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied(name.to_string()),
            _ => StoreError::Io(e),
        }
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.artifact_path(name)?;
        // staged under a hidden name so a failed write never shows up in list()
        let staging = self.output_dir.join(format!(".{}.partial", name));

        let staged = File::create(&staging)
            .map_err(|e| Self::map_missing(name, e))
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&staging, &path).map_err(StoreError::Io));

        if let Err(e) = staged {
            if let Err(cleanup) = fs::remove_file(&staging) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Could not remove staging file {}: {}", staging.display(), cleanup);
                }
            }
            return Err(e);
        }

        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());

        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.artifact_path(name)?;
        fs::read(&path).map_err(|e| Self::map_missing(name, e))
    }

    fn list(&self) -> Result<Vec<ArtifactEntry>, StoreError> {
        if !self.output_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with('.') {
                    continue;
                }
                entries.push(ArtifactEntry::new(name.to_string(), metadata.len()));
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.artifact_path(name)?;
        fs::remove_file(&path).map_err(|e| Self::map_missing(name, e))
    }
}
