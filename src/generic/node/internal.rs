use crate::{
	generic::node::{Children, Entry, Keyed, Slot, INLINE_SLOTS},
	utils::offset_in,
};
use smallvec::SmallVec;
use std::borrow::Borrow;

/// Slot of an internal node together with the child on its right.
#[derive(Clone)]
pub struct Branch<K, V> {
	pub slot: Slot<K, V>,
	pub child: usize,
}

impl<K, V> Keyed for Branch<K, V> {
	type Key = K;

	#[inline]
	fn key(&self) -> &K {
		self.slot.key()
	}
}

#[derive(Clone)]
pub struct Internal<K, V> {
	first_child: usize,
	other_children: SmallVec<[Branch<K, V>; INLINE_SLOTS]>,
}

impl<K, V> Internal<K, V> {
	#[inline]
	pub fn binary(left_id: usize, median: Slot<K, V>, right_id: usize) -> Internal<K, V> {
		let mut other_children = SmallVec::new();
		other_children.push(Branch {
			slot: median,
			child: right_id,
		});

		Internal {
			first_child: left_id,
			other_children,
		}
	}

	#[inline]
	pub fn item_count(&self) -> usize {
		self.other_children.len()
	}

	#[inline]
	pub fn child_count(&self) -> usize {
		1usize + self.item_count()
	}

	#[inline]
	pub fn first_child_id(&self) -> usize {
		self.first_child
	}

	#[inline]
	pub fn branches(&self) -> &[Branch<K, V>] {
		self.other_children.as_ref()
	}

	#[inline]
	pub fn child_id(&self, index: usize) -> usize {
		if index == 0 {
			self.first_child
		} else {
			self.other_children[index - 1].child
		}
	}

	#[inline]
	pub fn separators(&self, index: usize) -> (Option<&K>, Option<&K>) {
		let min = if index > 0 {
			Some(self.other_children[index - 1].slot.key())
		} else {
			None
		};

		let max = if index < self.other_children.len() {
			Some(self.other_children[index].slot.key())
		} else {
			None
		};

		(min, max)
	}

	/// Find the offset of the slot matching the given key.
	///
	/// If the key matches no slot in this node,
	/// this function returns the index of the child that may contain the key.
	#[inline]
	pub fn offset_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		offset_in(&self.other_children, key)
	}

	#[inline]
	pub fn children(&self) -> Children<K, V> {
		Children::Internal(Some(self.first_child), self.other_children.as_ref().iter())
	}

	#[inline]
	pub fn slot(&self, offset: usize) -> Option<&Slot<K, V>> {
		self.other_children.get(offset).map(|b| &b.slot)
	}

	#[inline]
	pub fn slot_mut(&mut self, offset: usize) -> Option<&mut Slot<K, V>> {
		self.other_children.get_mut(offset).map(|b| &mut b.slot)
	}

	/// Insert a slot at the given offset, with `right_node_id` as its right child.
	#[inline]
	pub fn insert(&mut self, offset: usize, slot: Slot<K, V>, right_node_id: usize) {
		self.other_children.insert(
			offset,
			Branch {
				slot,
				child: right_node_id,
			},
		);
	}

	/// Add `entry` to the slot at the given offset, which must have the same key.
	#[inline]
	pub fn push_duplicate(&mut self, offset: usize, entry: Entry<K, V>)
	where
		K: PartialEq,
	{
		let Branch { slot, child } = self.other_children.remove(offset);
		self.other_children.insert(
			offset,
			Branch {
				slot: slot.with(entry),
				child,
			},
		);
	}

	/// Replace the slot at the given offset.
	#[inline]
	pub fn replace(&mut self, offset: usize, mut slot: Slot<K, V>) -> Slot<K, V> {
		std::mem::swap(&mut slot, &mut self.other_children[offset].slot);
		slot
	}

	/// Split the node around its median slot.
	///
	/// This node keeps the lower half.
	/// Returns the median slot and the upper half.
	#[inline]
	pub fn split(&mut self) -> (Slot<K, V>, Internal<K, V>) {
		assert!(self.other_children.len() >= 3 && self.other_children.len() % 2 == 1);

		// Index of the median slot in `other_children`.
		let median_i = (self.other_children.len() - 1) / 2;

		let right_other_children = self.other_children.drain(median_i + 1..).collect();
		let median = self.other_children.remove(median_i);

		let right_node = Internal {
			first_child: median.child,
			other_children: right_other_children,
		};

		(median.slot, right_node)
	}

	/// Remove the slot separating the children `left_index` and `left_index + 1`.
	///
	/// Returns the identifier of the left child, the removed slot and the identifier
	/// of the right child, which is no longer referenced by this node.
	#[inline]
	pub fn merge(&mut self, left_index: usize) -> (usize, Slot<K, V>, usize) {
		let left_id = self.child_id(left_index);
		let branch = self.other_children.remove(left_index);
		(left_id, branch.slot, branch.child)
	}

	#[inline]
	pub fn push_left(&mut self, slot: Slot<K, V>, child_id: usize) {
		self.other_children.insert(
			0,
			Branch {
				slot,
				child: self.first_child,
			},
		);
		self.first_child = child_id
	}

	#[inline]
	pub fn pop_left(&mut self) -> Option<(Slot<K, V>, usize)> {
		if self.other_children.is_empty() {
			None
		} else {
			let child_id = self.first_child;
			let first = self.other_children.remove(0);
			self.first_child = first.child;
			Some((first.slot, child_id))
		}
	}

	#[inline]
	pub fn push_right(&mut self, slot: Slot<K, V>, child_id: usize) {
		self.other_children.push(Branch {
			slot,
			child: child_id,
		});
	}

	#[inline]
	pub fn pop_right(&mut self) -> Option<(Slot<K, V>, usize)> {
		self.other_children.pop().map(|last| (last.slot, last.child))
	}

	/// Return the offset of the separator.
	#[inline]
	pub fn append(&mut self, separator: Slot<K, V>, mut other: Internal<K, V>) -> usize {
		let offset = self.other_children.len();
		self.other_children.push(Branch {
			slot: separator,
			child: other.first_child,
		});

		self.other_children.append(&mut other.other_children);
		offset
	}

	/// Write the label of the internal node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		write!(f, "<c0> |")?;
		for (i, branch) in self.other_children.iter().enumerate() {
			write!(f, "{{{}|<c{}> {}}} |", branch.slot.key(), i + 1, branch.slot.len())?;
		}

		Ok(())
	}

	/// Checks that the slots are sorted and lie strictly between `min` and `max`.
	pub fn is_ordered(&self, min: Option<&K>, max: Option<&K>) -> bool
	where
		K: Ord,
	{
		if !self.other_children.windows(2).all(|w| w[0].key() < w[1].key()) {
			return false;
		}

		if let (Some(min), Some(b)) = (min, self.other_children.first()) {
			if min >= b.key() {
				return false;
			}
		}

		if let (Some(max), Some(b)) = (max, self.other_children.last()) {
			if max <= b.key() {
				return false;
			}
		}

		true
	}
}
