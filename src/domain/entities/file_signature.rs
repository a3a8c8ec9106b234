//! File signature entity
//!
//! Represents the header and footer byte patterns that bound one
//! recoverable file type. This is the foundation of file carving.

use crate::domain::services::RegistryError;
use std::fmt;

/// A file signature: the byte patterns marking the start and end of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Short type tag, also used as the output file extension (e.g. `jpg`)
    type_tag: String,
    /// The header bytes (magic bytes at the start of the file)
    header: Vec<u8>,
    /// The footer bytes (magic bytes at the end of the file)
    footer: Vec<u8>,
}

impl Signature {
    /// Creates a new file signature
    pub fn new(type_tag: impl Into<String>, header: Vec<u8>, footer: Vec<u8>) -> Self {
        Self {
            type_tag: type_tag.into(),
            header,
            footer,
        }
    }

    /// Creates a signature from hex-encoded header and footer patterns
    pub fn from_hex(type_tag: &str, header_hex: &str, footer_hex: &str) -> Result<Self, RegistryError> {
        let decode = |pattern: &str| {
            let compact: String = pattern.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(&compact).map_err(|e| RegistryError::InvalidHex {
                type_tag: type_tag.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Self::new(type_tag, decode(header_hex)?, decode(footer_hex)?))
    }

    /// Returns the type tag
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Returns the header bytes
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Returns the footer bytes
    pub fn footer(&self) -> &[u8] {
        &self.footer
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} header={} footer={}",
            self.type_tag,
            hex::encode_upper(&self.header),
            hex::encode_upper(&self.footer)
        )
    }
}

/// The earliest header found from a scan cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Absolute byte offset of the header in the scanned buffer
    pub offset: usize,
    /// Index of the winning signature in registry order
    pub signature_index: usize,
}
