//! Artifact store trait
//!
//! Defines the interface for persisting carved files.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when accessing the artifact store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact name: {0:?}")]
    InvalidName(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One persisted artifact as reported by [`ArtifactStore::list`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactEntry {
    #[serde(rename = "filename")]
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub size: u64,
}

impl ArtifactEntry {
    /// Builds an entry, deriving the type tag from the name's extension
    pub fn new(name: String, size: u64) -> Self {
        let type_tag = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self { name, type_tag, size }
    }
}

/// Storage sink for carved files
///
/// A name, once written, must read back byte-for-byte until deleted.
/// The carver only needs `write` and `read`; listing and deletion serve
/// the surrounding tooling.
pub trait ArtifactStore: Send + Sync {
    /// Persists `bytes` under `name`, replacing any previous artifact
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Reads back the artifact stored under `name`
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Lists stored artifacts sorted by name
    fn list(&self) -> Result<Vec<ArtifactEntry>, StoreError>;

    /// Deletes the artifact stored under `name`
    fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Deletes every artifact, returning how many were removed
    fn clear(&self) -> Result<usize, StoreError> {
        let entries = self.list()?;
        for entry in &entries {
            self.delete(&entry.name)?;
        }
        Ok(entries.len())
    }
}
