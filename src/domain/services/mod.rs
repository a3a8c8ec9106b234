//! Domain services
//!
//! The carving engine: signature lookup, bounded footer search,
//! extraction and the forward scan that ties them together.

mod carver;
pub mod footer_locator;
mod scan_engine;
mod signature_registry;

pub use carver::{CarveError, Carver, CarverConfig, DigestAlgorithm, NamingScheme};
pub use footer_locator::{DEFAULT_WINDOW_SIZE, locate};
pub use scan_engine::{ProgressCallback, ScanEngine};
pub use signature_registry::{RegistryError, SignatureRegistry};
