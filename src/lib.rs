//! Signature-based file carving.
//!
//! Recovers files embedded in raw disk or memory images by locating
//! type-specific header and footer byte patterns, without relying on
//! filesystem metadata.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use config::EngineConfig;
pub use domain::entities::{CarvedFileMetadata, ScanResult, Signature};
pub use domain::services::{Carver, ScanEngine, SignatureRegistry};
