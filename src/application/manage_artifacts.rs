//! Artifact management use case
//!
//! Listing, retrieval and cleanup of previously carved files.

use crate::domain::repositories::{ArtifactEntry, ArtifactStore};
use anyhow::{Context, Result};
use tracing::info;

/// Operations over the recovered-artifacts namespace
pub struct ArtifactsUseCase<S: ArtifactStore> {
    store: S,
}

impl<S: ArtifactStore> ArtifactsUseCase<S> {
    /// Creates the use case over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists recovered files sorted by name
    pub fn list(&self) -> Result<Vec<ArtifactEntry>> {
        self.store.list().context("Error retrieving recovered files")
    }

    /// Returns the bytes of one recovered file
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        info!("Downloading file: {}", name);
        self.store
            .read(name)
            .with_context(|| format!("Error reading recovered file {}", name))
    }

    /// Deletes every recovered file
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store.clear().context("Error clearing results")?;
        info!("Recovered files cleared ({} removed)", removed);
        Ok(removed)
    }
}
