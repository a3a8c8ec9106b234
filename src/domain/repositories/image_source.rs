//! Image source trait
//!
//! Defines how a disk or memory image is made available to the scanner.
//! The whole image is held in memory for the duration of a scan, so every
//! source enforces a maximum size when it is opened.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when acquiring the image bytes
#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Image is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ImageReadError {
    /// Maps an open/read error for `path` to the matching variant
    pub fn from_io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => ImageReadError::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                ImageReadError::PermissionDenied(path.display().to_string())
            }
            _ => ImageReadError::Io(e),
        }
    }
}

/// A finite, fully readable image held in memory
pub trait ImageSource {
    /// Opens the image, refusing anything larger than `max_size` bytes
    fn open(path: &Path, max_size: u64) -> Result<Self, ImageReadError>
    where
        Self: Sized;

    /// Returns the image contents
    fn bytes(&self) -> &[u8];

    /// Returns the image path as given to `open`
    fn path(&self) -> &Path;

    /// Returns the image length in bytes
    fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Returns whether the image is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
