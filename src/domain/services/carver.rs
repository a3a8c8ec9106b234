//! File carver service
//!
//! Extracts one byte range from the image, persists it through the
//! artifact store and labels it with a content digest.

use crate::domain::entities::CarvedFileMetadata;
use crate::domain::repositories::{ArtifactStore, StoreError};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during file carving
#[derive(Error, Debug)]
pub enum CarveError {
    #[error("Invalid carve range {start}..{end} for a {len} byte buffer")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Failed to write {name}: {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// Hash used to label carved files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the lowercase hex digest of `data`
    pub fn digest(&self, data: &[u8]) -> String {
        match self {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }

    /// Returns the algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            other => Err(format!("unsupported digest algorithm '{}'", other)),
        }
    }
}

/// Output naming scheme: `<prefix>_<sequence>.<type>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    prefix: String,
}

impl NamingScheme {
    /// Creates a naming scheme with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Renders the artifact name for a sequence number and type
    pub fn name_for(&self, sequence_number: u64, type_tag: &str) -> String {
        format!("{}_{}.{}", self.prefix, sequence_number, type_tag)
    }
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self::new("recovered")
    }
}

/// Carver settings
#[derive(Debug, Clone, Default)]
pub struct CarverConfig {
    pub naming: NamingScheme,
    pub digest: DigestAlgorithm,
}

/// Carves byte ranges into persisted artifacts
pub struct Carver<S: ArtifactStore> {
    config: CarverConfig,
    store: S,
}

impl<S: ArtifactStore> Carver<S> {
    /// Creates a carver writing into `store`
    pub fn new(config: CarverConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the carver settings
    pub fn config(&self) -> &CarverConfig {
        &self.config
    }

    /// Carves `buffer[start..end]` as artifact number `sequence_number`
    ///
    /// The digest is computed over the bytes read back from the store. If
    /// that read fails the file is still reported, with no digest.
    pub fn carve(
        &self,
        buffer: &[u8],
        start: usize,
        end: usize,
        type_tag: &str,
        sequence_number: u64,
    ) -> Result<CarvedFileMetadata, CarveError> {
        if start >= end || end > buffer.len() {
            return Err(CarveError::InvalidRange {
                start,
                end,
                len: buffer.len(),
            });
        }

        let content = &buffer[start..end];
        let name = self.config.naming.name_for(sequence_number, type_tag);

        self.store
            .write(&name, content)
            .map_err(|source| CarveError::WriteFailed {
                name: name.clone(),
                source,
            })?;

        let digest = match self.store.read(&name) {
            Ok(persisted) => Some(self.config.digest.digest(&persisted)),
            Err(e) => {
                warn!("Could not read back {} for hashing: {}", name, e);
                None
            }
        };

        let metadata = CarvedFileMetadata {
            assigned_name: name,
            type_tag: type_tag.to_string(),
            offset: start as u64,
            size: content.len() as u64,
            digest,
        };

        info!(
            "Carved file: {} (Type: {}, Size: {} bytes, Hash: {}...)",
            metadata.assigned_name,
            metadata.type_tag,
            metadata.size,
            metadata.digest_prefix()
        );
        debug!("{} spans 0x{:X}..0x{:X}", metadata.assigned_name, start, end);

        Ok(metadata)
    }
}
