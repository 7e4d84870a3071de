use crate::{
	generic::node::{Entry, Slot, INLINE_SLOTS},
	utils::offset_in,
};
use smallvec::SmallVec;
use std::borrow::Borrow;

#[derive(Clone)]
pub struct Leaf<K, V> {
	slots: SmallVec<[Slot<K, V>; INLINE_SLOTS]>,
}

impl<K, V> Leaf<K, V> {
	#[inline]
	pub fn new() -> Leaf<K, V> {
		Leaf {
			slots: SmallVec::new(),
		}
	}

	#[inline]
	pub fn item_count(&self) -> usize {
		self.slots.len()
	}

	#[inline]
	pub fn slots(&self) -> &[Slot<K, V>] {
		self.slots.as_ref()
	}

	/// Find the offset of the slot matching the given key.
	///
	/// Returns the insertion offset if there is none.
	#[inline]
	pub fn offset_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		offset_in(&self.slots, key)
	}

	#[inline]
	pub fn slot(&self, offset: usize) -> Option<&Slot<K, V>> {
		self.slots.get(offset)
	}

	#[inline]
	pub fn slot_mut(&mut self, offset: usize) -> Option<&mut Slot<K, V>> {
		self.slots.get_mut(offset)
	}

	/// It is assumed that the leaf will not overflow.
	#[inline]
	pub fn insert(&mut self, offset: usize, slot: Slot<K, V>) {
		self.slots.insert(offset, slot)
	}

	/// Add `entry` to the slot at the given offset, which must have the same key.
	#[inline]
	pub fn push_duplicate(&mut self, offset: usize, entry: Entry<K, V>)
	where
		K: PartialEq,
	{
		let slot = self.slots.remove(offset);
		self.slots.insert(offset, slot.with(entry))
	}

	#[inline]
	pub fn remove(&mut self, offset: usize) -> Slot<K, V> {
		self.slots.remove(offset)
	}

	#[inline]
	pub fn replace(&mut self, offset: usize, mut slot: Slot<K, V>) -> Slot<K, V> {
		std::mem::swap(&mut slot, &mut self.slots[offset]);
		slot
	}

	/// Split the leaf around its median slot.
	///
	/// This leaf keeps the lower half.
	/// Returns the median slot and the upper half.
	#[inline]
	pub fn split(&mut self) -> (Slot<K, V>, Leaf<K, V>) {
		assert!(self.slots.len() >= 3 && self.slots.len() % 2 == 1);

		let median_i = (self.slots.len() - 1) / 2;

		let right_slots = self.slots.drain(median_i + 1..).collect();
		let median = self.slots.remove(median_i);

		(median, Leaf { slots: right_slots })
	}

	/// Return the offset of the separator.
	#[inline]
	pub fn append(&mut self, separator: Slot<K, V>, mut other: Leaf<K, V>) -> usize {
		let offset = self.slots.len();
		self.slots.push(separator);
		self.slots.append(&mut other.slots);
		offset
	}

	#[inline]
	pub fn push_left(&mut self, slot: Slot<K, V>) {
		self.slots.insert(0, slot)
	}

	#[inline]
	pub fn pop_left(&mut self) -> Option<Slot<K, V>> {
		if self.slots.is_empty() {
			None
		} else {
			Some(self.slots.remove(0))
		}
	}

	#[inline]
	pub fn push_right(&mut self, slot: Slot<K, V>) {
		self.slots.push(slot)
	}

	#[inline]
	pub fn pop_right(&mut self) -> Option<Slot<K, V>> {
		self.slots.pop()
	}

	/// Write the label of the leaf in the DOT language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		for slot in &self.slots {
			write!(f, "{{{}|{}}}|", slot.key(), slot.len())?;
		}

		Ok(())
	}

	/// Checks that the slots are sorted and lie strictly between `min` and `max`.
	pub fn is_ordered(&self, min: Option<&K>, max: Option<&K>) -> bool
	where
		K: Ord,
	{
		if !self.slots.windows(2).all(|w| w[0].key() < w[1].key()) {
			return false;
		}

		if let (Some(min), Some(slot)) = (min, self.slots.first()) {
			if min >= slot.key() {
				return false;
			}
		}

		if let (Some(max), Some(slot)) = (max, self.slots.last()) {
			if max <= slot.key() {
				return false;
			}
		}

		true
	}
}

impl<K, V> Default for Leaf<K, V> {
	fn default() -> Self {
		Leaf::new()
	}
}
