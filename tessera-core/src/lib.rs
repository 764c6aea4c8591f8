//! # Tessera Core
//!
//! This crate provides the building blocks shared by every tessera collection:
//! - Error types
//! - Configuration
//! - Length-prefixed binary framing and the JSON string-array codec
//! - Codec and persistence traits
//! - Line-oriented file helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  tessera-core                   │
//! ├─────────────────────────────────────────────────┤
//! │  • error         - Error handling              │
//! │  • config        - Structure sizing            │
//! │  • serialization - Binary frames & JSON arrays │
//! │  • traits        - Codec & persistence seams   │
//! │  • utils         - Line file I/O               │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod serialization;
pub mod traits;
pub mod utils;

// Re-export commonly used types
pub use config::{ArrayConfig, Config, HashTableConfig};
pub use error::{Error, Result};
pub use traits::{BinaryCodec, LinePersist, TextCodec};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
