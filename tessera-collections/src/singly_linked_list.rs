//! Singly linked list of strings.

use std::fmt;
use std::path::Path;

use tracing::debug;

use tessera_core::{
    serialization::{decode_strings, decode_text_array, encode_strings, encode_text_array},
    utils::{read_lines, write_lines},
    BinaryCodec, LinePersist, Result, TextCodec,
};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    data: String,
    next: Link,
}

/// Forward-linked list; each node is owned by its predecessor.
#[derive(Debug, Default)]
pub struct SinglyLinkedList {
    head: Link,
    len: usize,
}

impl SinglyLinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_head(&mut self, value: impl Into<String>) {
        let node = Box::new(Node {
            data: value.into(),
            next: self.head.take(),
        });
        self.head = Some(node);
        self.len += 1;
    }

    pub fn add_to_tail(&mut self, value: impl Into<String>) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            data: value.into(),
            next: None,
        }));
        self.len += 1;
    }

    /// Remove the head; a no-op on an empty list.
    pub fn remove_head(&mut self) -> Option<String> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node.data)
    }

    /// Remove the tail; a no-op on an empty list.
    pub fn remove_tail(&mut self) -> Option<String> {
        match self.len {
            0 => None,
            n => self.remove_at(n - 1),
        }
    }

    /// Remove the first node holding `value`.
    pub fn remove_by_value(&mut self, value: &str) -> bool {
        match self.iter().position(|data| data == value) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    pub fn search(&self, value: &str) -> bool {
        self.iter().any(|data| data == value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Iterate head → tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<String> {
        if index == 0 {
            return self.remove_head();
        }
        let mut prev = self.head.as_mut()?;
        for _ in 1..index {
            prev = prev.next.as_mut()?;
        }
        let mut removed = prev.next.take()?;
        prev.next = removed.next.take();
        self.len -= 1;
        Some(removed.data)
    }

    fn replace_with(&mut self, values: Vec<String>) {
        self.clear();
        // Build back to front so every insertion is at the head
        for value in values.into_iter().rev() {
            self.add_to_head(value);
        }
    }
}

impl Drop for SinglyLinkedList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Display for SinglyLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.data)
    }
}

impl TextCodec for SinglyLinkedList {
    fn serialize_text(&self) -> Result<String> {
        encode_text_array(self.iter())
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let values = decode_text_array(text)?;
        self.replace_with(values);
        Ok(())
    }
}

impl BinaryCodec for SinglyLinkedList {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        Ok(encode_strings(self.iter()))
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let values = decode_strings(data)?;
        self.replace_with(values);
        Ok(())
    }
}

impl LinePersist for SinglyLinkedList {
    /// Append every line to the tail.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        for line in read_lines(path)? {
            self.add_to_tail(line?);
        }
        debug!(path = %path.display(), size = self.len, "Loaded singly linked list");
        Ok(())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.iter())
    }
}
