//! Image admission policy
//!
//! Checks applied before an image is handed to the scanner: an extension
//! allow-list and a size ceiling. The engine itself does no validation.

use crate::config::EngineConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reasons an image is refused
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Image {0} has no file extension")]
    MissingExtension(String),

    #[error("Invalid file type '{extension}'. Allowed: {allowed}")]
    ExtensionNotAllowed { extension: String, allowed: String },

    #[error("Image is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// Extension allow-list plus size ceiling
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    allowed_extensions: Vec<String>,
    max_size: u64,
}

impl ImagePolicy {
    /// Creates a policy; extensions are compared case-insensitively
    pub fn new(allowed_extensions: &[String], max_size: u64) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
            max_size,
        }
    }

    /// Creates the policy described by an engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.allowed_extensions, config.max_image_size)
    }

    /// Returns the size ceiling
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Checks the extension of `path`
    pub fn check_extension(&self, path: &Path) -> Result<(), PolicyError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| PolicyError::MissingExtension(path.display().to_string()))?;

        if self.allowed_extensions.contains(&extension) {
            Ok(())
        } else {
            Err(PolicyError::ExtensionNotAllowed {
                extension,
                allowed: self.allowed_extensions.join(", "),
            })
        }
    }

    /// Checks a byte size against the ceiling
    pub fn check_size(&self, size: u64) -> Result<(), PolicyError> {
        if size > self.max_size {
            return Err(PolicyError::TooLarge {
                size,
                limit: self.max_size,
            });
        }
        Ok(())
    }

    /// Checks extension and, when the file can be inspected, its size
    ///
    /// An unreadable path passes the size check; opening it reports the
    /// actual error.
    pub fn check(&self, path: &Path) -> Result<(), PolicyError> {
        self.check_extension(path)?;
        if let Ok(metadata) = fs::metadata(path) {
            self.check_size(metadata.len())?;
        }
        Ok(())
    }
}
