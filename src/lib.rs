//! B-Tree multimap storing its nodes in a slab.
//!
//! Keys may be inserted more than once: entries sharing a key are grouped in a
//! single node slot and kept in insertion order. Every inserted entry receives an
//! [`EntryId`] ticket that can later be used to remove exactly that entry.
//!
//! ```
//! use btree_dupes::BTree;
//!
//! let mut tree = BTree::with_degree(2);
//! let a = tree.insert(1, 'a');
//! tree.insert(1, 'b');
//! tree.insert(0, 'z');
//!
//! let values: Vec<_> = tree.search_values(&1).unwrap().copied().collect();
//! assert_eq!(values, ['a', 'b']);
//!
//! tree.delete_one(&1, a).unwrap();
//! assert_eq!(tree.iter().map(|e| *e.value()).collect::<Vec<_>>(), ['z', 'b']);
//! assert!(tree.is_valid());
//! ```
#[cfg(feature = "std-slab")]
use slab::Slab;

mod container;
pub mod error;
pub mod generic;
pub mod utils;

pub use container::{Container, ContainerMut};
pub use error::Error;
pub use generic::node::{DuplicateGroup, Entry, EntryId, Slot};

/// B-Tree multimap based on `Slab`.
#[cfg(feature = "std-slab")]
pub type BTree<K, V> = generic::BTree<K, V, Slab<generic::Node<K, V>>>;
