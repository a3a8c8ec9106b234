//! Domain layer - the carving core
//!
//! Entities, the storage/image boundary traits, and the services that
//! scan an in-memory image for signature-bounded files.

pub mod entities;
pub mod repositories;
pub mod services;
