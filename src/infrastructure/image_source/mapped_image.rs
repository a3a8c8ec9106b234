//! Memory-mapped image
//!
//! Provides zero-copy read access to an image file. The kernel pages the
//! image in on demand, so large images do not need an up-front copy.

use super::open_checked;
use crate::domain::repositories::{ImageReadError, ImageSource};
use memmap2::Mmap;
use std::path::{Path, PathBuf};

/// Read-only memory mapping of an image file
///
/// The image must not be modified by another process while mapped.
pub struct MappedImage {
    /// `None` for an empty file, which cannot be mapped
    mmap: Option<Mmap>,
    path: PathBuf,
}

impl ImageSource for MappedImage {
    fn open(path: &Path, max_size: u64) -> Result<Self, ImageReadError> {
        let (file, size) = open_checked(path, max_size)?;

        let mmap = if size == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and the file is treated as immutable for the scan
            Some(unsafe { Mmap::map(&file) }.map_err(|e| ImageReadError::from_io(path, e))?)
        };

        Ok(Self {
            mmap,
            path: path.to_path_buf(),
        })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
