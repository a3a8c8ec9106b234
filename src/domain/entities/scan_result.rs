//! Scan result entity
//!
//! Represents the outcome of one carving pass over an image.

use super::recovered_file::CarvedFileMetadata;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Progress information during a scan
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Total bytes to scan
    pub total_bytes: u64,
    /// Position of the scan cursor
    pub scanned_bytes: u64,
    /// Number of files carved so far
    pub files_found: usize,
}

impl ScanProgress {
    /// Creates a new scan progress
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            scanned_bytes: 0,
            files_found: 0,
        }
    }

    /// Returns the progress percentage (0.0 - 100.0)
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.scanned_bytes as f64 / self.total_bytes as f64) * 100.0
    }

    /// Updates the progress
    pub fn update(&mut self, scanned_bytes: u64, files_found: usize) {
        self.scanned_bytes = scanned_bytes.min(self.total_bytes);
        self.files_found = files_found;
    }
}

/// Per-candidate counters collected during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Header matches considered
    pub headers_found: usize,
    /// Candidates dropped because no footer was inside the window
    pub footers_missing: usize,
    /// Candidates dropped because the artifact could not be written
    pub carve_failures: usize,
    /// Carved files emitted without a digest
    pub digest_failures: usize,
    /// Final cursor position
    pub bytes_scanned: u64,
}

/// Result of a complete image scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Image that was scanned
    source: String,
    /// Total size of the scanned buffer
    total_bytes: u64,
    /// Duration of the scan
    duration: Duration,
    /// Carved files in discovery order
    files: Vec<CarvedFileMetadata>,
    /// Per-candidate counters
    stats: ScanStats,
}

impl ScanResult {
    /// Creates a new scan result
    pub fn new(
        source: String,
        total_bytes: u64,
        files: Vec<CarvedFileMetadata>,
        stats: ScanStats,
        duration: Duration,
    ) -> Self {
        Self {
            source,
            total_bytes,
            duration,
            files,
            stats,
        }
    }

    /// Returns the source name
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the scanned buffer length
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Returns the scan duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the carved files in offset order
    pub fn files(&self) -> &[CarvedFileMetadata] {
        &self.files
    }

    /// Consumes self and returns the carved files
    pub fn into_files(self) -> Vec<CarvedFileMetadata> {
        self.files
    }

    /// Returns the per-candidate counters
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Returns total number of carved files
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// Returns the number of files carved for each type tag
    pub fn type_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for file in &self.files {
            *counts.entry(file.type_tag.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
