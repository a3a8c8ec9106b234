//! Bounded footer search
//!
//! The footer must lie entirely inside the window; files larger than the
//! window are not recovered.

use memchr::memmem;

/// Default distance past the header that a footer search may cover (10 MiB)
pub const DEFAULT_WINDOW_SIZE: usize = 10 * 1024 * 1024;

/// Finds the first `footer` in `[start_offset, start_offset + window_size)`
///
/// Returns the absolute offset immediately after the footer, or `None` if
/// the window holds no complete occurrence.
pub fn locate(buffer: &[u8], footer: &[u8], start_offset: usize, window_size: usize) -> Option<usize> {
    if footer.is_empty() || start_offset > buffer.len() {
        return None;
    }

    let window_end = start_offset.saturating_add(window_size).min(buffer.len());
    let window = &buffer[start_offset..window_end];

    memmem::find(window, footer).map(|pos| start_offset + pos + footer.len())
}
