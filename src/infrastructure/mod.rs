//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories: where image
//! bytes are read from and where carved files are written.

pub mod image_source;
pub mod persistence;
