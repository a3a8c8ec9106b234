//! Scan options DTO

use crate::config::{ConfigError, EngineConfig};
use crate::domain::services::{DigestAlgorithm, NamingScheme};
use std::path::PathBuf;

/// Options for scanning one image
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to the image file
    pub image_path: PathBuf,
    /// Directory carved files are written to
    pub output_dir: PathBuf,
    /// Type tags to carve (empty = all registered)
    pub types: Vec<String>,
    /// Footer search window in bytes
    pub window_size: usize,
    /// Largest image accepted, in bytes
    pub max_image_size: u64,
    /// Optional JSON signature table replacing the built-in one
    pub signature_table: Option<PathBuf>,
    /// Digest used to label carved files
    pub digest: DigestAlgorithm,
    /// Output name prefix
    pub name_prefix: String,
    /// Memory-map the image instead of reading it into a buffer
    pub use_mmap: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            image_path: PathBuf::new(),
            output_dir: PathBuf::from("./recovered_files"),
            types: Vec::new(),
            window_size: config.window_size,
            max_image_size: config.max_image_size,
            signature_table: None,
            digest: config.digest,
            name_prefix: config.naming.prefix().to_string(),
            use_mmap: false,
        }
    }
}

impl ScanOptions {
    /// Creates options for the given image
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            ..Default::default()
        }
    }

    /// Sets the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets the types to carve
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
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

    /// Builds the engine configuration these options describe
    pub fn to_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = EngineConfig::default()
            .with_window_size(self.window_size)
            .with_max_image_size(self.max_image_size)
            .with_digest(self.digest)
            .with_naming(NamingScheme::new(self.name_prefix.clone()));

        if let Some(table) = &self.signature_table {
            config = config.with_signatures(EngineConfig::load_signature_table(table)?);
        }

        config.validate()?;
        Ok(config)
    }
}
