//! Progress reporting for CLI

use crate::domain::entities::ScanProgress;
use crate::domain::services::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Progress reporter using indicatif
pub struct ProgressReporter {
    bar: Arc<ProgressBar>,
}

impl ProgressReporter {
    /// Creates a progress reporter for scanning `image_size` bytes
    pub fn for_scan(image_size: u64) -> Self {
        let bar = ProgressBar::new(image_size);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message("Carving image...".to_string());

        Self { bar: Arc::new(bar) }
    }

    /// Finishes with a message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Gets a callback for scan progress
    pub fn scan_callback(&self) -> ProgressCallback {
        let bar = Arc::clone(&self.bar);
        Box::new(move |progress: &ScanProgress| {
            bar.set_position(progress.scanned_bytes);
            bar.set_message(format!(
                "Carved {} files ({:.1}%)",
                progress.files_found,
                progress.percentage()
            ));
        })
    }
}
