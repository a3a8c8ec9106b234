//! Engine configuration
//!
//! One explicit configuration object replaces module-level constants:
//! the signature table, output naming, footer window, size limits and
//! digest algorithm all travel through here into the engine.

use crate::domain::entities::Signature;
use crate::domain::services::{
    CarverConfig, DEFAULT_WINDOW_SIZE, DigestAlgorithm, NamingScheme, RegistryError,
    SignatureRegistry,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest image accepted for scanning (500 MiB)
pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 500 * 1024 * 1024;

/// Image file extensions accepted for scanning
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 5] = ["img", "dsk", "dd", "iso", "bin"];

/// Errors raised while building the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Footer search window must be greater than zero")]
    ZeroWindow,

    #[error("Maximum image size must be greater than zero")]
    ZeroImageLimit,

    #[error("Failed to read signature table {path}: {source}")]
    TableRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed signature table {path}: {source}")]
    TableParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One row of a JSON signature table
#[derive(Debug, Deserialize)]
struct SignatureRow {
    #[serde(rename = "type")]
    type_tag: String,
    header: String,
    footer: String,
}

/// Process-wide engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Signature table in registration (tie-break) order
    pub signatures: Vec<Signature>,
    /// Output naming scheme
    pub naming: NamingScheme,
    /// Maximum distance past a header that a footer is searched for
    pub window_size: usize,
    /// Largest image that will be loaded
    pub max_image_size: u64,
    /// Lowercase image extensions accepted for scanning
    pub allowed_extensions: Vec<String>,
    /// Digest used to label carved files
    pub digest: DigestAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signatures: SignatureRegistry::builtin_signatures(),
            naming: NamingScheme::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            digest: DigestAlgorithm::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the signature table
    pub fn with_signatures(mut self, signatures: Vec<Signature>) -> Self {
        self.signatures = signatures;
        self
    }

    /// Sets the footer search window
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the maximum image size
    pub fn with_max_image_size(mut self, max_image_size: u64) -> Self {
        self.max_image_size = max_image_size;
        self
    }

    /// Sets the output naming scheme
    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Sets the digest algorithm
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }

    /// Checks the numeric limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.max_image_size == 0 {
            return Err(ConfigError::ZeroImageLimit);
        }
        Ok(())
    }

    /// Returns the carver part of the configuration
    pub fn carver_config(&self) -> CarverConfig {
        CarverConfig {
            naming: self.naming.clone(),
            digest: self.digest,
        }
    }

    /// Builds the validated signature registry
    pub fn build_registry(&self) -> Result<SignatureRegistry, RegistryError> {
        SignatureRegistry::new(self.signatures.clone())
    }

    /// Loads a JSON signature table
    ///
    /// The file holds an array of `{"type", "header", "footer"}` objects
    /// with hex-encoded patterns; array order is registration order.
    pub fn load_signature_table(path: &Path) -> Result<Vec<Signature>, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::TableRead {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse_signature_table(&raw).map_err(|e| match e {
            TableError::Json(source) => ConfigError::TableParse {
                path: path.display().to_string(),
                source,
            },
            TableError::Registry(e) => ConfigError::Registry(e),
        })
    }

    /// Parses a JSON signature table from a string
    pub fn parse_signature_table(raw: &str) -> Result<Vec<Signature>, TableError> {
        let rows: Vec<SignatureRow> = serde_json::from_str(raw)?;
        let signatures = rows
            .iter()
            .map(|row| Signature::from_hex(&row.type_tag, &row.header, &row.footer))
            .collect::<Result<Vec<_>, _>>()?;

        // validate eagerly so a bad table fails at startup
        SignatureRegistry::new(signatures.clone())?;
        Ok(signatures)
    }
}

/// Errors from parsing an in-memory signature table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
