//! Fixed-capacity array of strings.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use tessera_core::{
    serialization::{decode_strings, decode_text_array, encode_strings, encode_text_array},
    utils::{read_lines, write_lines},
    ArrayConfig, BinaryCodec, LinePersist, Result, TextCodec,
};

/// Ordered strings with a maximum length fixed at construction.
///
/// Index-based mutations outside the valid range, or insertions into a full
/// array, are logged and ignored.
#[derive(Debug, Clone)]
pub struct Array {
    capacity: usize,
    data: Vec<String>,
}

impl Array {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn from_config(config: &ArrayConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Insert `value` at `index`, shifting later elements right.
    /// `index` may equal `len()` to append.
    pub fn add(&mut self, index: usize, value: impl Into<String>) {
        if index > self.data.len() || self.is_full() {
            warn!(index, size = self.data.len(), capacity = self.capacity, "Invalid index or array is full");
            return;
        }
        self.data.insert(index, value.into());
    }

    /// Append `value` at the end.
    pub fn push(&mut self, value: impl Into<String>) {
        if self.is_full() {
            warn!(capacity = self.capacity, "Array is full");
            return;
        }
        self.data.push(value.into());
    }

    /// Remove the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.data.len() {
            warn!(index, size = self.data.len(), "Invalid index");
            return None;
        }
        Some(self.data.remove(index))
    }

    /// Overwrite the element at `index`.
    pub fn replace(&mut self, index: usize, value: impl Into<String>) {
        match self.data.get_mut(index) {
            Some(slot) => *slot = value.into(),
            None => warn!(index, size = self.data.len(), "Invalid index"),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        let value = self.data.get(index).map(String::as_str);
        if value.is_none() {
            warn!(index, size = self.data.len(), "Invalid index");
        }
        value
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.iter().map(String::as_str)
    }

    /// Replace the contents, keeping at most `capacity` values.
    fn fill(&mut self, values: Vec<String>) {
        if values.len() > self.capacity {
            debug!(decoded = values.len(), capacity = self.capacity, "Truncating decoded values to capacity");
        }
        self.data = values;
        self.data.truncate(self.capacity);
    }
}

/// Arrays are equal when their live elements are equal; capacity is ignored.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Array {}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}

impl TextCodec for Array {
    fn serialize_text(&self) -> Result<String> {
        encode_text_array(self.iter())
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let values = decode_text_array(text)?;
        self.fill(values);
        Ok(())
    }
}

impl BinaryCodec for Array {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        Ok(encode_strings(self.iter()))
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let values = decode_strings(data)?;
        self.fill(values);
        Ok(())
    }
}

impl LinePersist for Array {
    /// Reset the array and read lines until end of file or capacity.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        self.data.clear();
        for line in read_lines(path)? {
            if self.is_full() {
                break;
            }
            self.data.push(line?);
        }
        debug!(path = %path.display(), size = self.data.len(), "Loaded array");
        Ok(())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.iter())
    }
}
