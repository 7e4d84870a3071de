use crate::{
	generic::{
		node::{EntryId, Node, Slot},
		tree::BTree,
	},
	Container, ContainerMut,
};
use std::borrow::Borrow;
use tracing::trace;

/// Extension methods.
///
/// This trait can be imported to access the internal methods of the B-Tree.
/// These methods are not intended to be directly called by users, but can be used to
/// extends the data structure with new functionalities.
pub trait BTreeExt<K, V> {
	/// Get the root node id.
	fn root_id(&self) -> usize;

	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is out of bounds.
	fn node(&self, id: usize) -> &Node<K, V>;

	/// Get the slot at `offset` in the node `id`.
	///
	/// Panics if there is no such slot.
	fn slot_at(&self, id: usize, offset: usize) -> &Slot<K, V>;

	/// Maximum number of slots in a node: `2t - 1`.
	fn max_len(&self) -> usize;

	/// Minimum number of slots in a non-root node: `t - 1`.
	fn min_len(&self) -> usize;

	/// Validate the tree.
	///
	/// Returns a description of the first violated invariant, if any.
	fn validate(&self) -> Result<(), &'static str>
	where
		K: Ord;

	/// Validate the given node and its descendants.
	///
	/// Returns the depth of the node, the number of entries and the number of nodes in
	/// the subtree.
	fn validate_node(
		&self,
		id: usize,
		min: Option<&K>,
		max: Option<&K>,
	) -> Result<(usize, usize, usize), &'static str>
	where
		K: Ord;
}

/// Mutable extension methods.
///
/// Every structural operation keeps the tree valid,
/// except for the root which may be left empty until [`BTreeExtMut::shrink_root`] is called.
pub trait BTreeExtMut<K, V> {
	fn set_len(&mut self, len: usize);

	/// Get the node associated to the given `id` mutably.
	///
	/// Panics if `id` is out of bounds.
	fn node_mut(&mut self, id: usize) -> &mut Node<K, V>;

	fn slot_at_mut(&mut self, id: usize, offset: usize) -> &mut Slot<K, V>;

	/// Hand out the next entry ticket.
	fn next_entry_id(&mut self) -> EntryId;

	/// Allocate a free identifier for the given node.
	fn allocate_node(&mut self, node: Node<K, V>) -> usize;

	/// Release the given node identifier and return the node it used to identify.
	fn release_node(&mut self, id: usize) -> Node<K, V>;

	/// Split the (full) root, making the tree one level higher.
	fn grow_root(&mut self);

	/// Split the full child `index` of node `id` around its median slot,
	/// which moves up into node `id` at offset `index`.
	fn split_child(&mut self, id: usize, index: usize);

	/// Merge the children `index` and `index + 1` of node `id` together with the slot
	/// separating them.
	///
	/// Returns the identifier of the merged child and the offset of the former separator in it.
	fn merge_children(&mut self, id: usize, index: usize) -> (usize, usize);

	/// Try to rotate left the node `id` to benefit the child number `deficient_child_index`.
	///
	/// Returns true if the rotation succeeded, or false if the target child has no right sibling,
	/// or if this sibling cannot lend a slot.
	fn try_rotate_left(&mut self, id: usize, deficient_child_index: usize) -> bool;

	/// Try to rotate right the node `id` to benefit the child number `deficient_child_index`.
	///
	/// Returns true if the rotation succeeded, or false if the target child has no left sibling,
	/// or if this sibling cannot lend a slot.
	fn try_rotate_right(&mut self, id: usize, deficient_child_index: usize) -> bool;

	/// Make sure the child `index` of node `id` holds more than the minimum number of slots
	/// before descending into it.
	///
	/// Returns the identifier of the node to descend into.
	fn rebalance_child(&mut self, id: usize, index: usize) -> usize;

	/// Find the slot holding `key`, rebalancing every node on the way down.
	///
	/// Returns the node identifier and offset of the slot, or `None` if the key is absent.
	fn locate_for_removal<Q: ?Sized>(&mut self, key: &Q) -> Option<(usize, usize)>
	where
		K: Borrow<Q>,
		Q: Ord;

	/// Remove the whole slot at `offset` in node `id`.
	///
	/// The node must be the root or hold more than the minimum number of slots.
	fn remove_slot_at(&mut self, id: usize, offset: usize) -> Slot<K, V>;

	/// Remove the slot with the greatest key in the subtree rooted at `id`.
	fn take_max_in(&mut self, id: usize) -> Slot<K, V>;

	/// Remove the slot with the smallest key in the subtree rooted at `id`.
	fn take_min_in(&mut self, id: usize) -> Slot<K, V>;

	/// Replace an empty internal root with its only child.
	fn shrink_root(&mut self);
}

impl<K, V, C: Container<Node<K, V>>> BTreeExt<K, V> for BTree<K, V, C> {
	#[inline]
	fn root_id(&self) -> usize {
		self.root
	}

	#[inline]
	fn node(&self, id: usize) -> &Node<K, V> {
		self.nodes.get(id).unwrap()
	}

	#[inline]
	fn slot_at(&self, id: usize, offset: usize) -> &Slot<K, V> {
		self.node(id).slot(offset).unwrap()
	}

	#[inline]
	fn max_len(&self) -> usize {
		2 * self.degree - 1
	}

	#[inline]
	fn min_len(&self) -> usize {
		self.degree - 1
	}

	fn validate(&self) -> Result<(), &'static str>
	where
		K: Ord,
	{
		let root = self.node(self.root);
		if !root.is_leaf() && root.item_count() == 0 {
			return Err("internal root is empty");
		}

		let (_, entries, nodes) = self.validate_node(self.root, None, None)?;

		if entries != self.len {
			return Err("entry count does not match the tree length");
		}

		if nodes != self.nodes.len() {
			return Err("storage holds unreachable nodes");
		}

		Ok(())
	}

	fn validate_node(
		&self,
		id: usize,
		min: Option<&K>,
		max: Option<&K>,
	) -> Result<(usize, usize, usize), &'static str>
	where
		K: Ord,
	{
		let node = self.node(id);
		let count = node.item_count();

		if count > self.max_len() {
			return Err("node is overflowing");
		}

		if id != self.root && count < self.min_len() {
			return Err("node is underflowing");
		}

		if !node.is_ordered(min, max) {
			return Err("node slots are not ordered");
		}

		let mut entries = 0;
		for slot in node.slots() {
			if !slot.is_valid() {
				return Err("invalid duplicate group");
			}

			entries += slot.len();
		}

		let mut nodes = 1;
		let mut depth = None;
		for (i, child_id) in node.children().enumerate() {
			let (min, max) = node.separators(i);
			let (child_depth, child_entries, child_nodes) = self.validate_node(child_id, min, max)?;

			entries += child_entries;
			nodes += child_nodes;

			match depth {
				None => depth = Some(child_depth),
				Some(depth) => {
					if depth != child_depth {
						return Err("tree not balanced");
					}
				}
			}
		}

		let depth = match depth {
			Some(depth) => depth + 1,
			None => 0,
		};

		Ok((depth, entries, nodes))
	}
}

impl<K, V, C: ContainerMut<Node<K, V>>> BTreeExtMut<K, V> for BTree<K, V, C> {
	#[inline]
	fn set_len(&mut self, new_len: usize) {
		self.len = new_len
	}

	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<K, V> {
		self.nodes.get_mut(id).unwrap()
	}

	#[inline]
	fn slot_at_mut(&mut self, id: usize, offset: usize) -> &mut Slot<K, V> {
		self.node_mut(id).slot_mut(offset).unwrap()
	}

	#[inline]
	fn next_entry_id(&mut self) -> EntryId {
		let id = EntryId::new(self.next_id);
		self.next_id += 1;
		id
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<K, V>) -> usize {
		self.nodes.insert(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Node<K, V> {
		self.nodes.remove(id)
	}

	fn grow_root(&mut self) {
		let left_id = self.root;
		let (median, right_node) = self.node_mut(left_id).split();
		let right_id = self.allocate_node(right_node);
		self.root = self.allocate_node(Node::binary(left_id, median, right_id));
		trace!(root = self.root, left_id, right_id, "grow root");
	}

	fn split_child(&mut self, id: usize, index: usize) {
		let child_id = self.node(id).child_id(index);
		let (median, right_node) = self.node_mut(child_id).split();
		let right_id = self.allocate_node(right_node);
		self.node_mut(id).insert(index, median, Some(right_id));
		trace!(node = id, index, left_id = child_id, right_id, "split child");
	}

	fn merge_children(&mut self, id: usize, index: usize) -> (usize, usize) {
		let (left_id, separator, right_id) = self.node_mut(id).merge(index);
		let right_node = self.release_node(right_id);
		let offset = self.node_mut(left_id).append(separator, right_node);
		trace!(node = id, index, left_id, right_id, "merge children");
		(left_id, offset)
	}

	fn try_rotate_left(&mut self, id: usize, deficient_child_index: usize) -> bool {
		let right_sibling_index = deficient_child_index + 1;
		let (right_sibling_id, deficient_child_id) = {
			let node = self.node(id);

			if right_sibling_index >= node.child_count() {
				return false; // no right sibling
			}

			(node.child_id(right_sibling_index), node.child_id(deficient_child_index))
		};

		if self.node(right_sibling_id).item_count() <= self.min_len() {
			return false; // the right sibling would underflow.
		}

		match self.node_mut(right_sibling_id).pop_left() {
			Some((slot, opt_child_id)) => {
				let pivot = self.node_mut(id).replace(deficient_child_index, slot);
				self.node_mut(deficient_child_id).push_right(pivot, opt_child_id);
				trace!(node = id, index = deficient_child_index, "rotate left");
				true
			}
			None => false,
		}
	}

	fn try_rotate_right(&mut self, id: usize, deficient_child_index: usize) -> bool {
		if deficient_child_index == 0 {
			return false; // no left sibling.
		}

		let left_sibling_index = deficient_child_index - 1;
		let (left_sibling_id, deficient_child_id) = {
			let node = self.node(id);
			(node.child_id(left_sibling_index), node.child_id(deficient_child_index))
		};

		if self.node(left_sibling_id).item_count() <= self.min_len() {
			return false; // the left sibling would underflow.
		}

		match self.node_mut(left_sibling_id).pop_right() {
			Some((slot, opt_child_id)) => {
				let pivot = self.node_mut(id).replace(left_sibling_index, slot);
				self.node_mut(deficient_child_id).push_left(pivot, opt_child_id);
				trace!(node = id, index = deficient_child_index, "rotate right");
				true
			}
			None => false,
		}
	}

	fn rebalance_child(&mut self, id: usize, index: usize) -> usize {
		let child_id = self.node(id).child_id(index);

		if self.node(child_id).item_count() > self.min_len()
			|| self.try_rotate_right(id, index)
			|| self.try_rotate_left(id, index)
		{
			return child_id;
		}

		if index < self.node(id).item_count() {
			// merge with right sibling
			self.merge_children(id, index).0
		} else {
			// merge with left sibling
			self.merge_children(id, index - 1).0
		}
	}

	fn locate_for_removal<Q: ?Sized>(&mut self, key: &Q) -> Option<(usize, usize)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut id = self.root;
		loop {
			match self.node(id).offset_of(key) {
				Ok(offset) => return Some((id, offset)),
				Err(index) => {
					if self.node(id).is_leaf() {
						return None;
					}

					id = self.rebalance_child(id, index)
				}
			}
		}
	}

	fn remove_slot_at(&mut self, id: usize, offset: usize) -> Slot<K, V> {
		if self.node(id).is_leaf() {
			return self.node_mut(id).remove_from_leaf(offset);
		}

		let (left_id, right_id) = {
			let node = self.node(id);
			(node.child_id(offset), node.child_id(offset + 1))
		};

		if self.node(left_id).item_count() > self.min_len() {
			let predecessor = self.take_max_in(left_id);
			self.node_mut(id).replace(offset, predecessor)
		} else if self.node(right_id).item_count() > self.min_len() {
			let successor = self.take_min_in(right_id);
			self.node_mut(id).replace(offset, successor)
		} else {
			// the slot to remove becomes the separator of the merged child.
			let (merged_id, separator_offset) = self.merge_children(id, offset);
			self.remove_slot_at(merged_id, separator_offset)
		}
	}

	fn take_max_in(&mut self, mut id: usize) -> Slot<K, V> {
		loop {
			let node = self.node(id);
			let count = node.item_count();
			if node.is_leaf() {
				return self.node_mut(id).remove_from_leaf(count - 1);
			}

			id = self.rebalance_child(id, count)
		}
	}

	fn take_min_in(&mut self, mut id: usize) -> Slot<K, V> {
		loop {
			if self.node(id).is_leaf() {
				return self.node_mut(id).remove_from_leaf(0);
			}

			id = self.rebalance_child(id, 0)
		}
	}

	fn shrink_root(&mut self) {
		let root = self.node(self.root);
		if !root.is_leaf() && root.item_count() == 0 {
			let child_id = root.child_id(0);
			let old_root = self.root;
			self.release_node(old_root);
			self.root = child_id;
			trace!(old_root, root = child_id, "shrink root");
		}
	}
}
