//! Application layer
//!
//! Use cases that orchestrate the carving core and its collaborators.

pub mod dto;
mod image_policy;
mod manage_artifacts;
mod recover_image;

pub use image_policy::{ImagePolicy, PolicyError};
pub use manage_artifacts::ArtifactsUseCase;
pub use recover_image::RecoverImageUseCase;
