//! Scan engine
//!
//! Single forward pass over an in-memory image. At each step the earliest
//! header at or after the cursor is taken, its footer is searched within the
//! window, and the range is carved. The cursor only moves forward, so carved
//! ranges never overlap and come out in offset order.

use super::carver::Carver;
use super::footer_locator;
use super::signature_registry::SignatureRegistry;
use crate::domain::entities::{CarvedFileMetadata, HeaderMatch, ScanProgress, ScanResult, ScanStats};
use crate::domain::repositories::ArtifactStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(&ScanProgress) + Send + Sync>;

/// Engine states; see [`ScanEngine::scan_with_progress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Scanning,
    HeaderFound(HeaderMatch),
    FooterFound { header: HeaderMatch, end: usize },
    FooterMissing(HeaderMatch),
    Carved,
    Done,
}

/// Cursor over one scan session, owned by the engine for its duration
struct ScanState<'a> {
    buffer: &'a [u8],
    cursor: usize,
    next_index: u64,
}

impl<'a> ScanState<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            next_index: 1,
        }
    }
}

/// Orchestrates header search, footer search and carving
pub struct ScanEngine<S: ArtifactStore> {
    registry: Arc<SignatureRegistry>,
    carver: Carver<S>,
    window_size: usize,
}

impl<S: ArtifactStore> ScanEngine<S> {
    /// Creates an engine over `registry` with the given footer window
    pub fn new(registry: Arc<SignatureRegistry>, carver: Carver<S>, window_size: usize) -> Self {
        Self {
            registry,
            carver,
            window_size,
        }
    }

    /// Returns the signature registry
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Returns the carver
    pub fn carver(&self) -> &Carver<S> {
        &self.carver
    }

    /// Returns the footer search window
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Scans an in-memory buffer
    pub fn scan(&self, buffer: &[u8]) -> ScanResult {
        self.scan_with_progress("<memory>", buffer, None)
    }

    /// Scans `buffer`, reporting the cursor after every resolved candidate
    ///
    /// Per-candidate failures (missing footer, failed write, failed digest)
    /// are logged and counted; they never stop the scan.
    pub fn scan_with_progress(
        &self,
        source: &str,
        buffer: &[u8],
        progress_callback: Option<&ProgressCallback>,
    ) -> ScanResult {
        let start_time = Instant::now();
        let signatures = self.registry.lookup_all();

        info!("Starting scan on image: {} ({} bytes)", source, buffer.len());

        let mut state = ScanState::new(buffer);
        let mut files: Vec<CarvedFileMetadata> = Vec::new();
        let mut stats = ScanStats::default();
        let mut progress = ScanProgress::new(buffer.len() as u64);
        let mut step = Step::Scanning;

        loop {
            step = match step {
                Step::Scanning => match self.registry.earliest_header(state.buffer, state.cursor) {
                    Some(header) => {
                        stats.headers_found += 1;
                        info!(
                            "Found {} header at offset: {}",
                            signatures[header.signature_index].type_tag(),
                            header.offset
                        );
                        Step::HeaderFound(header)
                    }
                    None => Step::Done,
                },

                Step::HeaderFound(header) => {
                    let signature = &signatures[header.signature_index];
                    let search_from = header.offset + signature.header().len();

                    match footer_locator::locate(
                        state.buffer,
                        signature.footer(),
                        search_from,
                        self.window_size,
                    ) {
                        Some(end) => {
                            info!("Found {} footer at offset: {}", signature.type_tag(), end);
                            Step::FooterFound { header, end }
                        }
                        None => Step::FooterMissing(header),
                    }
                }

                Step::FooterFound { header, end } => {
                    let type_tag = signatures[header.signature_index].type_tag();
                    // the range is consumed whether or not the write succeeds
                    state.cursor = end;

                    match self
                        .carver
                        .carve(state.buffer, header.offset, end, type_tag, state.next_index)
                    {
                        Ok(metadata) => {
                            state.next_index += 1;
                            if metadata.digest.is_none() {
                                stats.digest_failures += 1;
                            }
                            files.push(metadata);
                            Step::Carved
                        }
                        Err(e) => {
                            warn!("Error saving carved {} at offset {}: {}", type_tag, header.offset, e);
                            stats.carve_failures += 1;
                            report(progress_callback, &mut progress, state.cursor, files.len());
                            Step::Scanning
                        }
                    }
                }

                Step::FooterMissing(header) => {
                    let signature = &signatures[header.signature_index];
                    info!("Footer for {} not found. Skipping.", signature.type_tag());
                    stats.footers_missing += 1;
                    state.cursor = header.offset + signature.header().len();
                    report(progress_callback, &mut progress, state.cursor, files.len());
                    Step::Scanning
                }

                Step::Carved => {
                    debug!("Cursor advanced to 0x{:X}", state.cursor);
                    report(progress_callback, &mut progress, state.cursor, files.len());
                    Step::Scanning
                }

                Step::Done => break,
            };
        }

        info!("No more file headers found. Scan complete.");

        stats.bytes_scanned = buffer.len() as u64;
        report(progress_callback, &mut progress, buffer.len(), files.len());

        let duration = start_time.elapsed();
        info!(
            "Scan of {} complete: {} files carved in {:.2}s",
            source,
            files.len(),
            duration.as_secs_f64()
        );

        ScanResult::new(source.to_string(), buffer.len() as u64, files, stats, duration)
    }
}

/// Moves the progress cursor and notifies the callback, if any
fn report(
    callback: Option<&ProgressCallback>,
    progress: &mut ScanProgress,
    cursor: usize,
    files_found: usize,
) {
    if let Some(callback) = callback {
        progress.update(cursor as u64, files_found);
        callback(progress);
    }
}
