//! Signature registry service
//!
//! Holds the fixed, insertion-ordered table of file signatures and answers
//! "where is the next header" queries. A single Aho-Corasick automaton in
//! leftmost-first mode covers every header, so one pass finds the earliest
//! header offset and breaks ties at equal offsets by registry order.

use crate::domain::entities::{HeaderMatch, Signature};
use aho_corasick::{AhoCorasick, Input, MatchKind};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building or filtering the signature table
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Signature table is empty")]
    Empty,

    #[error("Duplicate signature type: {0}")]
    DuplicateType(String),

    #[error("Signature {0} has an empty header")]
    EmptyHeader(String),

    #[error("Signature {0} has an empty footer")]
    EmptyFooter(String),

    #[error("Unknown signature type: {0}")]
    UnknownType(String),

    #[error("Invalid hex pattern for {type_tag}: {reason}")]
    InvalidHex { type_tag: String, reason: String },

    #[error("Failed to build header matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),
}

/// Registry of file signatures for header detection
///
/// The registry is read-only once built. Order matters only as a tie-break:
/// when two headers start at the same offset, the one registered first wins.
///
/// # Example
///
/// ```
/// use sigcarve::domain::services::SignatureRegistry;
///
/// let registry = SignatureRegistry::builtin();
/// let data = b"....%PDF-1.4";
/// let found = registry.earliest_header(data, 0).unwrap();
/// assert_eq!(found.offset, 4);
/// assert_eq!(registry.lookup_all()[found.signature_index].type_tag(), "pdf");
/// ```
#[derive(Debug, Clone)]
pub struct SignatureRegistry {
    signatures: Vec<Signature>,
    /// Leftmost-first automaton over all headers, pattern id == registry index
    header_matcher: AhoCorasick,
}

impl SignatureRegistry {
    /// Builds a registry, validating the table
    pub fn new(signatures: Vec<Signature>) -> Result<Self, RegistryError> {
        if signatures.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for sig in &signatures {
            if !seen.insert(sig.type_tag()) {
                return Err(RegistryError::DuplicateType(sig.type_tag().to_string()));
            }
            if sig.header().is_empty() {
                return Err(RegistryError::EmptyHeader(sig.type_tag().to_string()));
            }
            if sig.footer().is_empty() {
                return Err(RegistryError::EmptyFooter(sig.type_tag().to_string()));
            }
        }

        let header_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(signatures.iter().map(|s| s.header()))?;

        Ok(Self {
            signatures,
            header_matcher,
        })
    }

    /// Returns the built-in signature table
    pub fn builtin_signatures() -> Vec<Signature> {
        vec![
            // JPEG: SOI + marker prefix / EOI
            Signature::new("jpg", vec![0xFF, 0xD8, 0xFF], vec![0xFF, 0xD9]),
            // PNG: 8-byte magic / IEND chunk type + CRC
            Signature::new(
                "png",
                vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
                vec![0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82],
            ),
            Signature::new("pdf", b"%PDF".to_vec(), b"%%EOF".to_vec()),
            // ZIP: local file header / end of central directory
            Signature::new("zip", vec![0x50, 0x4B, 0x03, 0x04], vec![0x50, 0x4B, 0x05, 0x06]),
        ]
    }

    /// Creates the registry with the built-in table
    pub fn builtin() -> Self {
        Self::new(Self::builtin_signatures()).expect("built-in signature table is valid")
    }

    /// Returns every signature in registration order
    pub fn lookup_all(&self) -> &[Signature] {
        &self.signatures
    }

    /// Returns the signature registered under `type_tag`
    pub fn get(&self, type_tag: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.type_tag() == type_tag)
    }

    /// Returns the registered type tags in order
    pub fn type_tags(&self) -> Vec<&str> {
        self.signatures.iter().map(|s| s.type_tag()).collect()
    }

    /// Returns the number of registered signatures
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Returns whether the registry is empty (never true for a built registry)
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Keeps only the given types, preserving registration order
    pub fn retain_types<S: AsRef<str>>(self, types: &[S]) -> Result<Self, RegistryError> {
        for wanted in types {
            if self.get(wanted.as_ref()).is_none() {
                return Err(RegistryError::UnknownType(wanted.as_ref().to_string()));
            }
        }

        let kept = self
            .signatures
            .into_iter()
            .filter(|s| types.iter().any(|t| t.as_ref() == s.type_tag()))
            .collect();

        Self::new(kept)
    }

    /// Finds the earliest header at or after `cursor`
    ///
    /// Bytes before `cursor` are never examined. Among headers starting at
    /// the same smallest offset, the first-registered signature wins.
    pub fn earliest_header(&self, buffer: &[u8], cursor: usize) -> Option<HeaderMatch> {
        if cursor >= buffer.len() {
            return None;
        }

        let input = Input::new(buffer).span(cursor..buffer.len());
        self.header_matcher.find(input).map(|m| HeaderMatch {
            offset: m.start(),
            signature_index: m.pattern().as_usize(),
        })
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
