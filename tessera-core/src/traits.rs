//! # Core Traits
//!
//! The interfaces every tessera structure exposes to its collaborators.
//!
//! 1. **Replace, never merge**: decoding swaps in new contents only after the
//!    whole input decoded cleanly; a failed decode leaves the structure as it was
//! 2. **Encoding is infallible in practice**: serializers still return `Result`
//!    so callers handle both directions the same way

use std::path::Path;

use crate::Result;

/// JSON text codec
pub trait TextCodec {
    /// Encode the structure as JSON text
    fn serialize_text(&self) -> Result<String>;

    /// Replace the structure's contents with the decoded text
    fn deserialize_text(&mut self, text: &str) -> Result<()>;
}

/// Length-prefixed binary codec
pub trait BinaryCodec {
    /// Encode the structure as bytes
    fn serialize_binary(&self) -> Result<Vec<u8>>;

    /// Replace the structure's contents with the decoded bytes
    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()>;
}

/// Line-oriented plain-text persistence, one record per line
pub trait LinePersist {
    /// Read records from `path` into the structure
    fn load_from_file(&mut self, path: &Path) -> Result<()>;

    /// Write every record to `path`, creating or truncating it
    fn save_to_file(&self, path: &Path) -> Result<()>;
}
