//! Fixed-bucket chained hash table from string keys to string values.
//!
//! ## Layout
//!
//! ```text
//! buckets[0] ──> None
//! buckets[1] ──> (k3, v3) ──> (k1, v1) ──> None     newest entry at the head
//! buckets[2] ──> (k2, v2) ──> None
//! ...
//! ```
//!
//! The bucket count never changes, so chains simply grow. Overwriting a key
//! keeps its position in the chain.
//!
//! ## Codecs
//!
//! Both codecs enumerate buckets in index order and each chain head → tail.
//! The text form is a JSON array of `"key:value"` strings, which cannot carry a
//! key or value containing `:`; such pairs are skipped on decode. The binary
//! form is a key frame followed by a value frame per entry.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use tessera_core::{
    serialization::{decode_text_array, encode_text_array, put_string, read_string},
    utils::{read_lines, write_lines},
    BinaryCodec, HashTableConfig, LinePersist, Result, TextCodec,
};

type Link = Option<Box<Entry>>;

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
    next: Link,
}

#[derive(Debug)]
pub struct HashTable {
    capacity: usize,
    buckets: Vec<Link>,
}

impl HashTable {
    /// Create a table with `capacity` buckets. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("Hash table capacity must be positive, using 1");
            1
        } else {
            capacity
        };
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self { capacity, buckets }
    }

    pub fn from_config(config: &HashTableConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Bucket index of `key`.
    ///
    /// Folds each code point as `hash = (hash * 31 + code_point) % capacity`,
    /// reducing at every step. The empty key hashes to 0.
    pub fn hash(&self, key: &str) -> usize {
        key.chars()
            .fold(0, |hash, ch| (hash * 31 + ch as usize) % self.capacity)
    }

    /// Insert `key`, or overwrite its value in place if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let index = self.hash(&key);

        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                entry.value = value;
                return;
            }
            cursor = entry.next.as_deref_mut();
        }

        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry { key, value, next }));
    }

    /// Look up `key`; a missing key is reported and yields `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self
            .chain(self.hash(key))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v);
        if found.is_none() {
            warn!(key, "Key not found");
        }
        found
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.chain(self.hash(key)).any(|(k, _)| k == key)
    }

    /// Unlink `key` and return its value; a missing key is reported.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let index = self.hash(key);
        let position = self.chain(index).position(|(k, _)| k == key);
        let removed = position.and_then(|position| self.unlink(index, position));
        if removed.is_none() {
            warn!(key, "Key not found for deletion");
        }
        removed
    }

    /// Drop every chain and reset every bucket to empty.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
    }

    /// Number of entries across all chains.
    pub fn size(&self) -> usize {
        (0..self.capacity).map(|index| self.chain(index).count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Option::is_none)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All entries in bucket order, each chain head → tail.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        (0..self.capacity).flat_map(move |index| self.chain(index))
    }

    fn chain(&self, index: usize) -> Chain<'_> {
        Chain {
            next: self.buckets[index].as_deref(),
        }
    }

    fn unlink(&mut self, index: usize, position: usize) -> Option<String> {
        let bucket = &mut self.buckets[index];
        if position == 0 {
            let mut head = bucket.take()?;
            *bucket = head.next.take();
            return Some(head.value);
        }
        let mut prev = bucket.as_mut()?;
        for _ in 1..position {
            prev = prev.next.as_mut()?;
        }
        let mut removed = prev.next.take()?;
        prev.next = removed.next.take();
        Some(removed.value)
    }

    /// Rebuild from pairs in enumeration order. Inserting back to front
    /// restores each chain's encoded order. A key listed more than once keeps
    /// the value and the chain position of its last occurrence.
    fn replace_with(&mut self, pairs: Vec<(String, String)>) {
        self.clear();
        for (key, value) in pairs.into_iter().rev() {
            if !self.contains_key(&key) {
                self.set(key, value);
            }
        }
    }
}

impl Drop for HashTable {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.capacity {
            let mut chain = self.chain(index).peekable();
            if chain.peek().is_none() {
                continue;
            }
            write!(f, "[{}]: ", index)?;
            for (key, value) in chain {
                write!(f, "{} => {} ", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct Chain<'a> {
    next: Option<&'a Entry>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some((entry.key.as_str(), entry.value.as_str()))
    }
}

impl TextCodec for HashTable {
    fn serialize_text(&self) -> Result<String> {
        let pairs: Vec<String> = self
            .entries()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect();
        encode_text_array(pairs.iter().map(String::as_str))
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let mut pairs = Vec::new();
        for pair in decode_text_array(text)? {
            match pair.split(':').collect::<Vec<_>>()[..] {
                [key, value] => pairs.push((key.to_string(), value.to_string())),
                _ => debug!(pair = %pair, "Skipping entry without exactly one ':'"),
            }
        }
        self.replace_with(pairs);
        Ok(())
    }
}

impl BinaryCodec for HashTable {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for (key, value) in self.entries() {
            put_string(&mut buf, key);
            put_string(&mut buf, value);
        }
        Ok(buf)
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let mut pairs = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let (key, next) = read_string(data, offset)?;
            let (value, next) = read_string(data, next)?;
            pairs.push((key, value));
            offset = next;
        }
        self.replace_with(pairs);
        Ok(())
    }
}

impl LinePersist for HashTable {
    /// Read `key value` lines; lines without exactly two space-separated
    /// fields are skipped.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        for line in read_lines(path)? {
            let line = line?;
            match line.split(' ').collect::<Vec<_>>()[..] {
                [key, value] => self.set(key, value),
                _ => debug!(line = %line, "Skipping line without exactly two fields"),
            }
        }
        debug!(path = %path.display(), size = self.size(), "Loaded hash table");
        Ok(())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(
            path,
            self.entries().map(|(key, value)| format!("{} {}", key, value)),
        )
    }
}
