//! Scan report DTO

use crate::domain::entities::{CarvedFileMetadata, ScanResult, ScanStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a completed scan, as reported to the caller
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Always `true` for a returned report; kept so the JSON matches the recovery service's response shape
    pub success: bool,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub recovered_files: Vec<CarvedFileMetadata>,
    pub total_files: usize,
    pub type_counts: BTreeMap<String, usize>,
    pub stats: ScanStats,
}

impl ScanReport {
    /// Builds a report from an engine result
    pub fn from_result(result: ScanResult, started_at: DateTime<Utc>) -> Self {
        let source = result.source().to_string();
        let duration_secs = result.duration().as_secs_f64();
        let stats = *result.stats();
        let type_counts = result
            .type_counts()
            .into_iter()
            .map(|(type_tag, count)| (type_tag.to_string(), count))
            .collect();
        let recovered_files = result.into_files();

        Self {
            success: true,
            source,
            started_at,
            duration_secs,
            total_files: recovered_files.len(),
            recovered_files,
            type_counts,
            stats,
        }
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Scanned {} in {:.2}s: {} files recovered\n",
            self.source, self.duration_secs, self.total_files
        );

        for (type_tag, count) in &self.type_counts {
            summary.push_str(&format!("  - {}: {}\n", type_tag, count));
        }

        for file in &self.recovered_files {
            summary.push_str(&format!(
                "  {:<24} {:<4} offset 0x{:08X} {:>12}  {}\n",
                file.assigned_name,
                file.type_tag,
                file.offset,
                file.size_human(),
                file.digest.as_deref().unwrap_or("-")
            ));
        }

        if self.stats.footers_missing > 0 {
            summary.push_str(&format!(
                "{} headers skipped (no footer within the search window)\n",
                self.stats.footers_missing
            ));
        }
        if self.stats.carve_failures > 0 {
            summary.push_str(&format!(
                "{} candidates could not be written\n",
                self.stats.carve_failures
            ));
        }

        summary
    }
}
