//! FIFO queue of strings.

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use tessera_core::{
    serialization::{decode_strings, decode_text_array, encode_strings, encode_text_array},
    utils::{read_lines, write_lines},
    BinaryCodec, LinePersist, Result, TextCodec,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` at the end.
    pub fn push(&mut self, value: impl Into<String>) {
        self.items.push_back(value.into());
    }

    /// Remove the front value; an empty queue is reported and left unchanged.
    pub fn pop(&mut self) -> Option<String> {
        let value = self.items.pop_front();
        if value.is_none() {
            warn!("Queue is empty");
        }
        value
    }

    pub fn front(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate front → end.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        Ok(())
    }
}

impl TextCodec for Queue {
    fn serialize_text(&self) -> Result<String> {
        encode_text_array(self.iter())
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        self.items = decode_text_array(text)?.into();
        Ok(())
    }
}

impl BinaryCodec for Queue {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        Ok(encode_strings(self.iter()))
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        self.items = decode_strings(data)?.into();
        Ok(())
    }
}

impl LinePersist for Queue {
    /// Push every line to the end.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        for line in read_lines(path)? {
            self.push(line?);
        }
        debug!(path = %path.display(), size = self.items.len(), "Loaded queue");
        Ok(())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.iter())
    }
}
