//! Doubly linked list of strings.
//!
//! Nodes live in an arena owned by the list and link to each other by slot
//! index, so back-links never own anything. Freed slots are recycled.

use std::fmt;
use std::path::Path;

use tracing::debug;

use tessera_core::{
    serialization::{decode_strings, decode_text_array, encode_strings, encode_text_array},
    utils::{read_lines, write_lines},
    BinaryCodec, LinePersist, Result, TextCodec,
};

#[derive(Debug, Clone)]
struct Node {
    data: String,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct DoublyLinkedList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl DoublyLinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_head(&mut self, value: impl Into<String>) {
        let index = self.allocate(Node {
            data: value.into(),
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    pub fn add_to_tail(&mut self, value: impl Into<String>) {
        let index = self.allocate(Node {
            data: value.into(),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    pub fn remove_from_head(&mut self) -> Option<String> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    pub fn remove_from_tail(&mut self) -> Option<String> {
        let tail = self.tail?;
        Some(self.unlink(tail))
    }

    /// Remove the first node holding `value`.
    pub fn remove_by_value(&mut self, value: &str) -> bool {
        match self.find(value) {
            Some(index) => {
                self.unlink(index);
                true
            }
            None => false,
        }
    }

    pub fn search(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate head → tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Iterate tail → head.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.tail,
            forward: false,
        }
    }

    fn find(&self, value: &str) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index);
            if node.data == value {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    fn allocate(&mut self, node: Node) -> usize {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Detach the node at `index` and return its value. `index` must be live.
    fn unlink(&mut self, index: usize) -> String {
        let node = self.slots[index]
            .take()
            .unwrap_or_else(|| unreachable!("unlink of free slot {}", index));
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.free.push(index);
        self.len -= 1;
        node.data
    }

    fn node(&self, index: usize) -> &Node {
        self.slots[index]
            .as_ref()
            .unwrap_or_else(|| unreachable!("link to free slot {}", index))
    }

    fn node_mut(&mut self, index: usize) -> &mut Node {
        self.slots[index]
            .as_mut()
            .unwrap_or_else(|| unreachable!("link to free slot {}", index))
    }

    fn replace_with(&mut self, values: Vec<String>) {
        self.clear();
        for value in values {
            self.add_to_tail(value);
        }
    }
}

impl fmt::Display for DoublyLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    list: &'a DoublyLinkedList,
    cursor: Option<usize>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?);
        self.cursor = if self.forward { node.next } else { node.prev };
        Some(&node.data)
    }
}

impl TextCodec for DoublyLinkedList {
    fn serialize_text(&self) -> Result<String> {
        encode_text_array(self.iter())
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let values = decode_text_array(text)?;
        self.replace_with(values);
        Ok(())
    }
}

impl BinaryCodec for DoublyLinkedList {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        Ok(encode_strings(self.iter()))
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let values = decode_strings(data)?;
        self.replace_with(values);
        Ok(())
    }
}

impl LinePersist for DoublyLinkedList {
    /// Append every line to the tail.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        for line in read_lines(path)? {
            self.add_to_tail(line?);
        }
        debug!(path = %path.display(), size = self.len, "Loaded doubly linked list");
        Ok(())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.iter())
    }
}
