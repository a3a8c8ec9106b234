//! Shared test helpers

#![allow(dead_code)]

use sigcarve::domain::repositories::{ArtifactEntry, ArtifactStore, StoreError};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// In-memory artifact store with injectable failures
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    failing_writes: HashSet<String>,
    failing_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write of `name` fail
    pub fn failing_write(mut self, name: &str) -> Self {
        self.failing_writes.insert(name.to_string());
        self
    }

    /// Makes every read-back fail
    pub fn failing_reads(mut self) -> Self {
        self.failing_reads = true;
        self
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl ArtifactStore for MemoryStore {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if self.failing_writes.contains(name) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.files.lock().unwrap().insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        if self.failing_reads {
            return Err(StoreError::PermissionDenied(name.to_string()));
        }
        self.get(name).ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn list(&self) -> Result<Vec<ArtifactEntry>, StoreError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .map(|(name, bytes)| ArtifactEntry::new(name.clone(), bytes.len() as u64))
            .collect())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.files
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

pub const JPG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF];
pub const JPG_FOOTER: &[u8] = &[0xFF, 0xD9];
pub const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const PNG_FOOTER: &[u8] = &[0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82];
pub const ZIP_HEADER: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
pub const ZIP_FOOTER: &[u8] = &[0x50, 0x4B, 0x05, 0x06];

/// Concatenates byte slices
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

/// JPEG followed directly by a PDF
pub fn jpg_then_pdf() -> Vec<u8> {
    concat(&[JPG_HEADER, &[b'A'; 10], JPG_FOOTER, b"%PDF", &[b'B'; 5], b"%%EOF"])
}
