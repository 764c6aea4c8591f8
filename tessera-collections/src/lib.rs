//! # Tessera Collections
//!
//! Seven owned data structures sharing one persistence contract.
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Persist                              │
//! │                                                             │
//! │  Structure ──> traversal order ──> codec ──> bytes / text   │
//! │                                                  │          │
//! │                                                  ▼          │
//! │                                                 file        │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Restore                              │
//! │                                                             │
//! │  file ──> bytes / text ──> codec ──> scratch ──> swap in    │
//! │                              │                              │
//! │                              ▼                              │
//! │                   Truncated* / MalformedText                │
//! │                   (structure left untouched)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Structure          | Serialized order            |
//! |--------------------|-----------------------------|
//! | `Array`            | index `0..len`              |
//! | `SinglyLinkedList` | head → tail                 |
//! | `DoublyLinkedList` | head → tail                 |
//! | `Queue`            | front → end                 |
//! | `Stack`            | text: top → bottom, binary: bottom → top |
//! | `HashTable`        | bucket order, chain head → tail |
//! | `BinaryTree`       | binary: level order with null markers, text: nested nodes |

pub mod array;
pub mod binary_tree;
pub mod doubly_linked_list;
pub mod hash_table;
pub mod queue;
pub mod singly_linked_list;
pub mod stack;

pub use array::Array;
pub use binary_tree::{BinaryTree, IndexLookup, TreeNode};
pub use doubly_linked_list::DoublyLinkedList;
pub use hash_table::HashTable;
pub use queue::Queue;
pub use singly_linked_list::SinglyLinkedList;
pub use stack::Stack;

pub use tessera_core::{BinaryCodec, Error, LinePersist, Result, TextCodec};
