//! Carved file entity
//!
//! Metadata describing one file carved out of a scanned image.

use serde::{Deserialize, Serialize};

/// Metadata for a carved file, produced once per successful carve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarvedFileMetadata {
    /// Name the artifact was persisted under
    #[serde(rename = "filename")]
    pub assigned_name: String,
    /// Signature type tag of the carved file
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Offset of the header in the scanned image
    pub offset: u64,
    /// Size in bytes, header through footer inclusive
    pub size: u64,
    /// Lowercase hex content digest, absent when it could not be computed
    #[serde(rename = "hash")]
    pub digest: Option<String>,
}

impl CarvedFileMetadata {
    /// Returns the offset one past the last carved byte
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }

    /// Returns a short digest prefix for log lines
    pub fn digest_prefix(&self) -> &str {
        match &self.digest {
            Some(d) => &d[..d.len().min(8)],
            None => "-",
        }
    }

    /// Returns a human-readable size string
    pub fn size_human(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if self.size >= GB {
            format!("{:.2} GB", self.size as f64 / GB as f64)
        } else if self.size >= MB {
            format!("{:.2} MB", self.size as f64 / MB as f64)
        } else if self.size >= KB {
            format!("{:.2} KB", self.size as f64 / KB as f64)
        } else {
            format!("{} bytes", self.size)
        }
    }
}
