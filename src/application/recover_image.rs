//! Recover image use case
//!
//! Admits an image, loads it, and runs one carving pass into an
//! artifact store.

use crate::application::dto::{ScanOptions, ScanReport};
use crate::application::image_policy::ImagePolicy;
use crate::config::EngineConfig;
use crate::domain::repositories::{ArtifactStore, ImageSource};
use crate::domain::services::{Carver, ProgressCallback, ScanEngine, SignatureRegistry};
use crate::infrastructure::image_source::{LoadedImage, MappedImage};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Recover image use case
///
/// A read failure on the image is fatal and returned as an error; every
/// per-candidate failure is absorbed by the engine and shows up only in
/// the report's counters.
pub struct RecoverImageUseCase {
    config: EngineConfig,
    registry: Arc<SignatureRegistry>,
    policy: ImagePolicy,
}

impl RecoverImageUseCase {
    /// Creates the use case from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let registry = config
            .build_registry()
            .context("Invalid signature table")?;
        let policy = ImagePolicy::from_config(&config);

        Ok(Self {
            config,
            registry: Arc::new(registry),
            policy,
        })
    }

    /// Creates the use case from scan options, applying the type filter
    pub fn from_options(options: &ScanOptions) -> Result<Self> {
        let config = options.to_config()?;
        let mut use_case = Self::new(config)?;

        if !options.types.is_empty() {
            let registry = use_case.registry.as_ref().clone();
            use_case.registry = Arc::new(
                registry
                    .retain_types(options.types.as_slice())
                    .context("Invalid --types filter")?,
            );
        }

        Ok(use_case)
    }

    /// Returns the active signature registry
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Returns the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Checks, opens and scans the image at `image_path`
    pub fn execute<S: ArtifactStore>(
        &self,
        image_path: &Path,
        store: S,
        use_mmap: bool,
        progress_callback: Option<ProgressCallback>,
    ) -> Result<ScanReport> {
        self.policy
            .check(image_path)
            .with_context(|| format!("Image {} rejected", image_path.display()))?;

        if use_mmap {
            let image = MappedImage::open(image_path, self.policy.max_size())
                .with_context(|| format!("Error reading disk image {}", image_path.display()))?;
            Ok(self.scan_source(&image, store, progress_callback))
        } else {
            let image = LoadedImage::open(image_path, self.policy.max_size())
                .with_context(|| format!("Error reading disk image {}", image_path.display()))?;
            Ok(self.scan_source(&image, store, progress_callback))
        }
    }

    /// Scans an already opened image
    pub fn scan_source<I: ImageSource, S: ArtifactStore>(
        &self,
        image: &I,
        store: S,
        progress_callback: Option<ProgressCallback>,
    ) -> ScanReport {
        let started_at = Utc::now();
        let carver = Carver::new(self.config.carver_config(), store);
        let engine = ScanEngine::new(Arc::clone(&self.registry), carver, self.config.window_size);

        let source = image.path().display().to_string();
        let result = engine.scan_with_progress(&source, image.bytes(), progress_callback.as_ref());

        info!(
            "Recovered {} files from {} ({} headers, {} without footer, {} write failures)",
            result.total_files(),
            source,
            result.stats().headers_found,
            result.stats().footers_missing,
            result.stats().carve_failures
        );

        ScanReport::from_result(result, started_at)
    }
}
