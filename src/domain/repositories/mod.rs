//! Repository traits (interfaces)
//!
//! These traits define the contracts for external collaborators:
//! where image bytes come from and where carved files go.

mod artifact_store;
mod image_source;

pub use artifact_store::{ArtifactEntry, ArtifactStore, StoreError};
pub use image_source::{ImageReadError, ImageSource};
