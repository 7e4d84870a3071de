use std::borrow::Borrow;

mod entry;
pub mod internal;
mod leaf;
mod slot;

pub use entry::{Entry, EntryId};
pub use internal::Internal as InternalNode;
pub use leaf::Leaf as LeafNode;
pub use slot::{DuplicateGroup, Slot};

/// Number of slots stored inline by a node before spilling on the heap.
///
/// This covers a full node of degree 2.
pub const INLINE_SLOTS: usize = 3;

/// Type identifier by a key.
///
/// This is implemented by [`Entry`], [`Slot`] and [`internal::Branch`].
pub trait Keyed {
	type Key;

	fn key(&self) -> &Self::Key;
}

/// B-tree node.
///
/// A leaf has no children; an internal node has exactly one more child than it has slots.
#[derive(Clone)]
pub enum Node<K, V> {
	/// Internal node.
	Internal(InternalNode<K, V>),

	/// Leaf node.
	Leaf(LeafNode<K, V>),
}

impl<K, V> Node<K, V> {
	#[inline]
	pub fn binary(left_id: usize, median: Slot<K, V>, right_id: usize) -> Node<K, V> {
		Node::Internal(InternalNode::binary(left_id, median, right_id))
	}

	#[inline]
	pub fn empty_leaf() -> Node<K, V> {
		Node::Leaf(LeafNode::new())
	}

	#[inline]
	pub fn is_leaf(&self) -> bool {
		matches!(self, Node::Leaf(_))
	}

	/// Number of slots in the node.
	#[inline]
	pub fn item_count(&self) -> usize {
		match self {
			Node::Internal(node) => node.item_count(),
			Node::Leaf(leaf) => leaf.item_count(),
		}
	}

	#[inline]
	pub fn child_count(&self) -> usize {
		match self {
			Node::Internal(node) => node.child_count(),
			Node::Leaf(_) => 0,
		}
	}

	#[inline]
	pub fn child_id(&self, index: usize) -> usize {
		match self {
			Node::Internal(node) => node.child_id(index),
			_ => panic!("only internal nodes can be indexed"),
		}
	}

	#[inline]
	pub fn child_id_opt(&self, index: usize) -> Option<usize> {
		match self {
			Node::Internal(node) if index < node.child_count() => Some(node.child_id(index)),
			_ => None,
		}
	}

	/// Find the offset of the slot matching the given key.
	///
	/// If the key matches no slot in this node, this function returns the offset where
	/// a slot with this key would be inserted, which is also the index of the child
	/// that may contain the key.
	#[inline]
	pub fn offset_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self {
			Node::Internal(node) => node.offset_of(key),
			Node::Leaf(leaf) => leaf.offset_of(key),
		}
	}

	#[inline]
	pub fn slot(&self, offset: usize) -> Option<&Slot<K, V>> {
		match self {
			Node::Internal(node) => node.slot(offset),
			Node::Leaf(leaf) => leaf.slot(offset),
		}
	}

	#[inline]
	pub fn slot_mut(&mut self, offset: usize) -> Option<&mut Slot<K, V>> {
		match self {
			Node::Internal(node) => node.slot_mut(offset),
			Node::Leaf(leaf) => leaf.slot_mut(offset),
		}
	}

	#[inline]
	pub fn push_duplicate(&mut self, offset: usize, entry: Entry<K, V>)
	where
		K: PartialEq,
	{
		match self {
			Node::Internal(node) => node.push_duplicate(offset, entry),
			Node::Leaf(leaf) => leaf.push_duplicate(offset, entry),
		}
	}

	/// Put a slot in a node.
	///
	/// Internal nodes expect the identifier of the child on the right of the new slot.
	/// It is assumed that the node will not overflow.
	#[inline]
	pub fn insert(&mut self, offset: usize, slot: Slot<K, V>, opt_right_child_id: Option<usize>) {
		match (self, opt_right_child_id) {
			(Node::Internal(node), Some(right_id)) => node.insert(offset, slot, right_id),
			(Node::Leaf(leaf), None) => leaf.insert(offset, slot),
			_ => panic!("child does not match the node kind"),
		}
	}

	/// Remove a slot from a leaf.
	#[inline]
	pub fn remove_from_leaf(&mut self, offset: usize) -> Slot<K, V> {
		match self {
			Node::Leaf(leaf) => leaf.remove(offset),
			_ => panic!("slots are only removed from leaves"),
		}
	}

	#[inline]
	pub fn replace(&mut self, offset: usize, slot: Slot<K, V>) -> Slot<K, V> {
		match self {
			Node::Internal(node) => node.replace(offset, slot),
			Node::Leaf(leaf) => leaf.replace(offset, slot),
		}
	}

	/// Split the node.
	/// Return the median slot and the right node.
	#[inline]
	pub fn split(&mut self) -> (Slot<K, V>, Node<K, V>) {
		match self {
			Node::Internal(node) => {
				let (slot, right_node) = node.split();
				(slot, Node::Internal(right_node))
			}
			Node::Leaf(leaf) => {
				let (slot, right_leaf) = leaf.split();
				(slot, Node::Leaf(right_leaf))
			}
		}
	}

	#[inline]
	pub fn merge(&mut self, left_index: usize) -> (usize, Slot<K, V>, usize) {
		match self {
			Node::Internal(node) => node.merge(left_index),
			_ => panic!("only internal nodes can merge children"),
		}
	}

	/// Return the offset of the separator.
	#[inline]
	pub fn append(&mut self, separator: Slot<K, V>, other: Node<K, V>) -> usize {
		match (self, other) {
			(Node::Internal(node), Node::Internal(other)) => node.append(separator, other),
			(Node::Leaf(leaf), Node::Leaf(other)) => leaf.append(separator, other),
			_ => panic!("incompatibles nodes"),
		}
	}

	#[inline]
	pub fn push_left(&mut self, slot: Slot<K, V>, opt_child_id: Option<usize>) {
		match (self, opt_child_id) {
			(Node::Internal(node), Some(child_id)) => node.push_left(slot, child_id),
			(Node::Leaf(leaf), None) => leaf.push_left(slot),
			_ => panic!("child does not match the node kind"),
		}
	}

	#[inline]
	pub fn pop_left(&mut self) -> Option<(Slot<K, V>, Option<usize>)> {
		match self {
			Node::Internal(node) => node.pop_left().map(|(slot, child_id)| (slot, Some(child_id))),
			Node::Leaf(leaf) => leaf.pop_left().map(|slot| (slot, None)),
		}
	}

	#[inline]
	pub fn push_right(&mut self, slot: Slot<K, V>, opt_child_id: Option<usize>) {
		match (self, opt_child_id) {
			(Node::Internal(node), Some(child_id)) => node.push_right(slot, child_id),
			(Node::Leaf(leaf), None) => leaf.push_right(slot),
			_ => panic!("child does not match the node kind"),
		}
	}

	#[inline]
	pub fn pop_right(&mut self) -> Option<(Slot<K, V>, Option<usize>)> {
		match self {
			Node::Internal(node) => node.pop_right().map(|(slot, child_id)| (slot, Some(child_id))),
			Node::Leaf(leaf) => leaf.pop_right().map(|slot| (slot, None)),
		}
	}

	#[inline]
	pub fn separators(&self, i: usize) -> (Option<&K>, Option<&K>) {
		match self {
			Node::Leaf(_) => (None, None),
			Node::Internal(node) => node.separators(i),
		}
	}

	#[inline]
	pub fn children(&self) -> Children<K, V> {
		match self {
			Node::Leaf(_) => Children::Leaf,
			Node::Internal(node) => node.children(),
		}
	}

	/// Slots of the node, in order.
	#[inline]
	pub fn slots(&self) -> Slots<K, V> {
		match self {
			Node::Leaf(leaf) => Slots::Leaf(leaf.slots().iter()),
			Node::Internal(node) => Slots::Internal(node.branches().iter()),
		}
	}

	#[inline]
	pub fn is_ordered(&self, min: Option<&K>, max: Option<&K>) -> bool
	where
		K: Ord,
	{
		match self {
			Node::Leaf(leaf) => leaf.is_ordered(min, max),
			Node::Internal(node) => node.is_ordered(min, max),
		}
	}

	/// Write the label of the node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		match self {
			Node::Leaf(leaf) => leaf.dot_write_label(f),
			Node::Internal(node) => node.dot_write_label(f),
		}
	}
}

pub enum Children<'a, K, V> {
	Leaf,
	Internal(Option<usize>, std::slice::Iter<'a, internal::Branch<K, V>>),
}

impl<'a, K, V> Iterator for Children<'a, K, V> {
	type Item = usize;

	#[inline]
	fn next(&mut self) -> Option<usize> {
		match self {
			Children::Leaf => None,
			Children::Internal(first, rest) => match first.take() {
				Some(child) => Some(child),
				None => rest.next().map(|branch| branch.child),
			},
		}
	}
}

pub enum Slots<'a, K, V> {
	Leaf(std::slice::Iter<'a, Slot<K, V>>),
	Internal(std::slice::Iter<'a, internal::Branch<K, V>>),
}

impl<'a, K, V> Iterator for Slots<'a, K, V> {
	type Item = &'a Slot<K, V>;

	#[inline]
	fn next(&mut self) -> Option<&'a Slot<K, V>> {
		match self {
			Slots::Leaf(slots) => slots.next(),
			Slots::Internal(branches) => branches.next().map(|branch| &branch.slot),
		}
	}
}
