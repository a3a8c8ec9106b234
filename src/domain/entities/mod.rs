//! Domain entities
//!
//! Core business objects that represent the fundamental concepts
//! in the carving domain.

mod file_signature;
mod recovered_file;
mod scan_result;

pub use file_signature::{HeaderMatch, Signature};
pub use recovered_file::CarvedFileMetadata;
pub use scan_result::{ScanProgress, ScanResult, ScanStats};
