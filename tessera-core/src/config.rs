//! # Configuration Management
//!
//! Fixed sizing for the structures that are configured at construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub array: ArrayConfig,
    pub hash_table: HashTableConfig,
}

impl Config {
    /// Parse a JSON configuration document; missing sections take defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).map_err(|e| Error::Configuration {
            message: format!("Invalid configuration: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read configuration {}", path.display()), e)
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.array.capacity == 0 {
            return Err(Error::Configuration {
                message: "array.capacity must be greater than zero".to_string(),
            });
        }
        if self.hash_table.capacity == 0 {
            return Err(Error::Configuration {
                message: "hash_table.capacity must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Fixed-capacity array configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayConfig {
    pub capacity: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

/// Chained hash table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Number of buckets; never changes after construction
    pub capacity: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}
