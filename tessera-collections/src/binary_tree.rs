//! Integer binary tree filled in level order.
//!
//! New values always take the first free child slot found by a breadth-first
//! scan from the root, left before right. There is no ordering between values.
//!
//! ## Binary layout
//!
//! Level order with one-byte null markers:
//!
//! ```text
//!        10
//!       /  \          [10 00 00 00][05 00 00 00][0f 00 00 00][00][00][00][00]
//!      5    15         root        left         right        null markers for
//!                                                            5.left 5.right
//!                                                            15.left 15.right
//! ```
//!
//! Every present node is a little-endian `i32`; every absent child is a single
//! `0x00`. The decoder tells them apart by the first byte of the slot, so a
//! child whose least-significant byte is zero reads back as a null marker.
//! Slots missing at the end of the buffer read as absent children.
//!
//! ## Text layout
//!
//! Nested nodes: `{"Root":{"Digit":10,"Left":{...},"Right":null}}`, or
//! `{"Root":null}` for an empty tree. Decoding is bounded by the JSON nesting
//! limit of `serde_json`; deeper documents fail with `MalformedText`.
//!
//! Decoded trees need not be balanced, so every traversal here keeps its own
//! stack or queue instead of recursing.

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;
use serde::Deserialize;
use tracing::{debug, warn};

use tessera_core::{
    utils::{read_lines, write_lines},
    BinaryCodec, Error, LinePersist, Result, TextCodec,
};

/// Size of an encoded node value
pub const NODE_VALUE_SIZE: usize = 4;

/// Byte emitted for an absent child
pub const NULL_MARKER: u8 = 0;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeNode {
    pub digit: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(digit: i32) -> Self {
        Self {
            digit,
            left: None,
            right: None,
        }
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Clone for TreeNode {
    /// Copies the pre-order shape, then rebuilds subtrees bottom-up.
    fn clone(&self) -> Self {
        let mut shape = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            shape.push((node.digit, node.left.is_some(), node.right.is_some()));
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }

        let mut built: Vec<Box<TreeNode>> = Vec::new();
        for (digit, has_left, has_right) in shape.into_iter().rev() {
            let mut node = TreeNode::new(digit);
            if has_left {
                node.left = built.pop();
            }
            if has_right {
                node.right = built.pop();
            }
            built.push(Box::new(node));
        }
        match built.pop() {
            Some(root) => *root,
            None => unreachable!("pre-order shape always contains the root"),
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.digit != b.digit {
                return false;
            }
            for (x, y) in [(&a.left, &b.left), (&a.right, &b.right)] {
                match (x.as_deref(), y.as_deref()) {
                    (Some(x), Some(y)) => pending.push((x, y)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for TreeNode {}

/// Shallow: children are shown by value only.
impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("digit", &self.digit)
            .field("left", &self.left.as_ref().map(|node| node.digit))
            .field("right", &self.right.as_ref().map(|node| node.digit))
            .finish()
    }
}

/// Outcome of [`BinaryTree::find_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLookup {
    /// Value at the requested breadth-first position
    Found(i32),
    /// The index was negative
    InvalidIndex,
    /// The tree has no nodes
    EmptyTree,
    /// The index is past the last node
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BinaryTree {
    root: Option<Box<TreeNode>>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Place `digit` in the first free slot of a breadth-first scan.
    pub fn insert(&mut self, digit: i32) {
        let Some(root) = self.root.as_deref_mut() else {
            self.root = Some(Box::new(TreeNode::new(digit)));
            return;
        };

        let mut queue: VecDeque<&mut TreeNode> = VecDeque::new();
        queue.push_back(root);
        while let Some(node) = queue.pop_front() {
            let TreeNode { left, right, .. } = node;
            if left.is_none() {
                *left = Some(Box::new(TreeNode::new(digit)));
                return;
            }
            if right.is_none() {
                *right = Some(Box::new(TreeNode::new(digit)));
                return;
            }
            queue.extend(left.as_deref_mut());
            queue.extend(right.as_deref_mut());
        }
    }

    /// Check the complete-binary-tree shape: once a child slot is found empty
    /// in breadth-first order, no later slot may be filled.
    ///
    /// An empty tree reports `false`.
    pub fn is_complete(&self) -> bool {
        let Some(root) = self.root.as_deref() else {
            return false;
        };

        let mut queue = VecDeque::from([root]);
        let mut seen_gap = false;
        while let Some(node) = queue.pop_front() {
            for child in [&node.left, &node.right] {
                match child.as_deref() {
                    Some(child) => {
                        if seen_gap {
                            return false;
                        }
                        queue.push_back(child);
                    }
                    None => seen_gap = true,
                }
            }
        }
        true
    }

    /// Pre-order search for `digit`.
    pub fn find_value(&self, digit: i32) -> bool {
        let mut pending: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            if node.digit == digit {
                return true;
            }
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        false
    }

    /// Value at zero-based breadth-first position `index`.
    pub fn find_index(&self, index: i64) -> IndexLookup {
        if index < 0 {
            warn!(index, "Invalid index");
            return IndexLookup::InvalidIndex;
        }
        if self.root.is_none() {
            warn!("Tree is empty");
            return IndexLookup::EmptyTree;
        }
        match usize::try_from(index).ok().and_then(|i| self.levels().nth(i)) {
            Some(digit) => IndexLookup::Found(digit),
            None => {
                warn!(index, "Value not found");
                IndexLookup::NotFound
            }
        }
    }

    /// Node values in breadth-first order.
    pub fn levels(&self) -> Levels<'_> {
        Levels {
            queue: self.root.as_deref().into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
    }
}

/// Breadth-first iterator over node values.
pub struct Levels<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl Iterator for Levels<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left.as_deref());
        self.queue.extend(node.right.as_deref());
        Some(node.digit)
    }
}

/// Sideways rendering: right subtree above, left below, three spaces per level.
impl fmt::Display for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_none() {
            return writeln!(f, "Tree is empty");
        }

        // Reverse in-order walk: right subtree, node, left subtree
        let mut pending: Vec<(&TreeNode, usize)> = Vec::new();
        let mut cursor = self.root.as_deref().map(|node| (node, 0));
        loop {
            while let Some((node, level)) = cursor {
                pending.push((node, level));
                cursor = node.right.as_deref().map(|right| (right, level + 1));
            }
            let Some((node, level)) = pending.pop() else {
                return Ok(());
            };
            writeln!(f, "{:indent$}{}", "", node.digit, indent = level * 3)?;
            cursor = node.left.as_deref().map(|left| (left, level + 1));
        }
    }
}

impl TextCodec for BinaryTree {
    fn serialize_text(&self) -> Result<String> {
        Ok(write_nested(self.root.as_deref()))
    }

    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let tree: BinaryTree = serde_json::from_str(text).map_err(|e| Error::MalformedText {
            message: format!("expected a tree document: {}", e),
            source: e,
        })?;
        *self = tree;
        Ok(())
    }
}

/// Pieces of the nested document still to be written.
enum Step<'a> {
    Node(Option<&'a TreeNode>),
    Literal(&'static str),
}

/// Emit `{"Root":...}` with nodes as `{"Digit":n,"Left":...,"Right":...}`.
fn write_nested(root: Option<&TreeNode>) -> String {
    let mut out = String::from(r#"{"Root":"#);
    let mut pending = vec![Step::Literal("}"), Step::Node(root)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Literal(text) => out.push_str(text),
            Step::Node(None) => out.push_str("null"),
            Step::Node(Some(node)) => {
                out.push_str(r#"{"Digit":"#);
                out.push_str(&node.digit.to_string());
                out.push_str(r#","Left":"#);
                pending.push(Step::Literal("}"));
                pending.push(Step::Node(node.right.as_deref()));
                pending.push(Step::Literal(r#","Right":"#));
                pending.push(Step::Node(node.left.as_deref()));
            }
        }
    }
    out
}

impl BinaryCodec for BinaryTree {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let Some(root) = self.root.as_deref() else {
            return Ok(buf);
        };

        let mut queue = VecDeque::from([Some(root)]);
        while let Some(slot) = queue.pop_front() {
            match slot {
                None => buf.put_u8(NULL_MARKER),
                Some(node) => {
                    buf.put_i32_le(node.digit);
                    queue.push_back(node.left.as_deref());
                    queue.push_back(node.right.as_deref());
                }
            }
        }
        Ok(buf)
    }

    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let tree = decode_level_order(data)?;
        debug!(bytes = data.len(), nodes = tree.len(), "Decoded binary tree");
        *self = tree;
        Ok(())
    }
}

/// Cursor over a level-order buffer.
struct NodeReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl NodeReader<'_> {
    fn value(&mut self) -> Result<i32> {
        let remaining = self.data.len() - self.offset;
        if remaining < NODE_VALUE_SIZE {
            return Err(Error::TruncatedNode {
                offset: self.offset,
                expected: NODE_VALUE_SIZE,
                remaining,
            });
        }
        let digit = LittleEndian::read_i32(&self.data[self.offset..self.offset + NODE_VALUE_SIZE]);
        self.offset += NODE_VALUE_SIZE;
        Ok(digit)
    }

    /// Read a child slot: a null marker or a node value. Past the end of the
    /// buffer every slot is absent.
    fn child(&mut self) -> Result<Option<Box<TreeNode>>> {
        match self.data.get(self.offset) {
            None => Ok(None),
            Some(&NULL_MARKER) => {
                self.offset += 1;
                Ok(None)
            }
            Some(_) => Ok(Some(Box::new(TreeNode::new(self.value()?)))),
        }
    }
}

fn decode_level_order(data: &[u8]) -> Result<BinaryTree> {
    if data.is_empty() {
        return Ok(BinaryTree::new());
    }

    let mut reader = NodeReader { data, offset: 0 };
    let mut root = Box::new(TreeNode::new(reader.value()?));
    {
        let mut queue: VecDeque<&mut TreeNode> = VecDeque::new();
        queue.push_back(root.as_mut());
        while let Some(node) = queue.pop_front() {
            node.left = reader.child()?;
            node.right = reader.child()?;
            let TreeNode { left, right, .. } = node;
            queue.extend(left.as_deref_mut());
            queue.extend(right.as_deref_mut());
        }
    }

    if reader.offset < data.len() {
        debug!(trailing = data.len() - reader.offset, "Ignoring bytes after last tree slot");
    }
    Ok(BinaryTree { root: Some(root) })
}

impl LinePersist for BinaryTree {
    /// Clear the tree and insert one integer per line in level order.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        self.clear();
        let mut lines = read_lines(path)?;
        while let Some(line) = lines.next() {
            let line = line?;
            let digit = line.trim().parse::<i32>().map_err(|e| Error::InvalidValue {
                line: lines.line_number(),
                message: format!("{:?} is not an integer: {}", line, e),
            })?;
            self.insert(digit);
        }
        debug!(path = %path.display(), size = self.len(), "Loaded binary tree");
        Ok(())
    }

    /// Write values in breadth-first order, one per line.
    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.levels().map(|digit| digit.to_string()))
    }
}
