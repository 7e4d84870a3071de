use super::Keyed;
use std::{cmp::Ordering, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity ticket of an entry.
///
/// Tickets are handed out by [`BTree::insert`](crate::generic::BTree::insert) and are never
/// reused by the tree that issued them, so they can tell apart entries sharing the same key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EntryId(u64);

impl EntryId {
	#[inline]
	pub(crate) fn new(id: u64) -> EntryId {
		EntryId(id)
	}

	#[inline]
	pub fn value(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for EntryId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Key-value pair stored in the tree.
///
/// Entries are compared by key only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Entry<K, V> {
	id: EntryId,
	key: K,
	value: V,
}

impl<K, V> Entry<K, V> {
	#[inline]
	pub(crate) fn new(id: EntryId, key: K, value: V) -> Entry<K, V> {
		Entry { id, key, value }
	}

	#[inline]
	pub fn id(&self) -> EntryId {
		self.id
	}

	#[inline]
	pub fn key(&self) -> &K {
		&self.key
	}

	#[inline]
	pub fn value(&self) -> &V {
		&self.value
	}

	#[inline]
	pub fn value_mut(&mut self) -> &mut V {
		&mut self.value
	}

	#[inline]
	pub fn as_pair(&self) -> (&K, &V) {
		(&self.key, &self.value)
	}

	#[inline]
	pub fn into_pair(self) -> (K, V) {
		(self.key, self.value)
	}

	#[inline]
	pub fn into_value(self) -> V {
		self.value
	}
}

impl<K, V> Keyed for Entry<K, V> {
	type Key = K;

	#[inline]
	fn key(&self) -> &K {
		&self.key
	}
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
	fn eq(&self, other: &Entry<K, V>) -> bool {
		self.key.eq(&other.key)
	}
}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
	fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
		Some(self.key.cmp(&other.key))
	}
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{{}: {}}}", self.key, self.value)
	}
}
