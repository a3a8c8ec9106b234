//! Fully loaded image
//!
//! Reads the whole image into memory up front. Simple and portable; the
//! size ceiling bounds the allocation.

use super::open_checked;
use crate::domain::repositories::{ImageReadError, ImageSource};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Image held in an owned buffer
#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    data: Vec<u8>,
}

impl LoadedImage {
    /// Wraps bytes that are already in memory
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

impl ImageSource for LoadedImage {
    fn open(path: &Path, max_size: u64) -> Result<Self, ImageReadError> {
        let (file, size) = open_checked(path, max_size)?;

        let mut data = Vec::with_capacity(size as usize);
        // the file may grow between stat and read; never read past the ceiling
        file.take(max_size.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| ImageReadError::from_io(path, e))?;

        if data.len() as u64 > max_size {
            return Err(ImageReadError::TooLarge {
                size: data.len() as u64,
                limit: max_size,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
