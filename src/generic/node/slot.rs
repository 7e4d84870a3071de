use super::{Entry, EntryId, Keyed};
use smallvec::SmallVec;
use std::fmt;

/// Entries sharing the same key, in insertion order.
///
/// A group always holds at least two entries.
#[derive(Clone, Debug)]
pub struct DuplicateGroup<K, V> {
	members: SmallVec<[Entry<K, V>; 2]>,
}

impl<K, V> DuplicateGroup<K, V> {
	/// Creates a new group from two entries with the same key.
	///
	/// # Panics
	///
	/// Panics if the keys of `first` and `second` differ.
	pub fn new(first: Entry<K, V>, second: Entry<K, V>) -> DuplicateGroup<K, V>
	where
		K: PartialEq,
	{
		assert!(first.key() == second.key(), "duplicate group keys differ");
		let mut members = SmallVec::new();
		members.push(first);
		members.push(second);
		DuplicateGroup { members }
	}

	#[inline]
	pub fn key(&self) -> &K {
		self.members[0].key()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Always `false`: a group is never empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	#[inline]
	pub fn entries(&self) -> &[Entry<K, V>] {
		&self.members
	}

	#[inline]
	pub fn entries_mut(&mut self) -> &mut [Entry<K, V>] {
		&mut self.members
	}

	/// Appends an entry after every existing member.
	#[inline]
	pub fn push(&mut self, entry: Entry<K, V>) {
		self.members.push(entry)
	}

	/// Index of the member with the given ticket.
	#[inline]
	pub fn position(&self, id: EntryId) -> Option<usize> {
		self.members.iter().position(|entry| entry.id() == id)
	}

	/// Checks that every member shares the key of the group.
	pub fn is_valid(&self) -> bool
	where
		K: PartialEq,
	{
		self.members.len() >= 2 && self.members.iter().all(|entry| entry.key() == self.key())
	}

	#[inline]
	pub fn into_entries(self) -> SmallVec<[Entry<K, V>; 2]> {
		self.members
	}
}

/// Content of a node slot: a single entry or a group of duplicates.
#[derive(Clone, Debug)]
pub enum Slot<K, V> {
	Single(Entry<K, V>),
	Group(DuplicateGroup<K, V>),
}

impl<K, V> Slot<K, V> {
	#[inline]
	pub fn key(&self) -> &K {
		match self {
			Slot::Single(entry) => entry.key(),
			Slot::Group(group) => group.key(),
		}
	}

	/// Number of entries in the slot.
	#[inline]
	pub fn len(&self) -> usize {
		match self {
			Slot::Single(_) => 1,
			Slot::Group(group) => group.len(),
		}
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		false
	}

	#[inline]
	pub fn is_group(&self) -> bool {
		matches!(self, Slot::Group(_))
	}

	/// Entries of the slot, in insertion order.
	#[inline]
	pub fn entries(&self) -> &[Entry<K, V>] {
		match self {
			Slot::Single(entry) => std::slice::from_ref(entry),
			Slot::Group(group) => group.entries(),
		}
	}

	#[inline]
	pub fn entries_mut(&mut self) -> &mut [Entry<K, V>] {
		match self {
			Slot::Single(entry) => std::slice::from_mut(entry),
			Slot::Group(group) => group.entries_mut(),
		}
	}

	/// Adds an entry with the same key after the existing ones,
	/// promoting a single entry to a group.
	#[inline]
	pub fn with(self, entry: Entry<K, V>) -> Slot<K, V>
	where
		K: PartialEq,
	{
		match self {
			Slot::Single(first) => Slot::Group(DuplicateGroup::new(first, entry)),
			Slot::Group(mut group) => {
				group.push(entry);
				Slot::Group(group)
			}
		}
	}

	/// Removes the group member with the given ticket.
	///
	/// Returns `None` if the slot is a single entry or has no such member.
	/// A group left with one member collapses into a single entry.
	pub fn take_member(&mut self, id: EntryId) -> Option<Entry<K, V>> {
		let index = match self {
			Slot::Single(_) => return None,
			Slot::Group(group) => group.position(id)?,
		};

		Some(self.remove_member(index))
	}

	/// Removes the oldest member of a group.
	///
	/// Returns `None` if the slot is a single entry.
	pub fn take_oldest(&mut self) -> Option<Entry<K, V>> {
		if self.is_group() {
			Some(self.remove_member(0))
		} else {
			None
		}
	}

	fn remove_member(&mut self, index: usize) -> Entry<K, V> {
		match self {
			Slot::Group(group) => {
				let entry = group.members.remove(index);
				if group.members.len() == 1 {
					if let Some(last) = group.members.pop() {
						*self = Slot::Single(last)
					}
				}
				entry
			}
			Slot::Single(_) => panic!("only groups have members to remove"),
		}
	}

	#[inline]
	pub fn into_entries(self) -> Vec<Entry<K, V>> {
		match self {
			Slot::Single(entry) => vec![entry],
			Slot::Group(group) => group.into_entries().into_vec(),
		}
	}

	pub fn is_valid(&self) -> bool
	where
		K: PartialEq,
	{
		match self {
			Slot::Single(_) => true,
			Slot::Group(group) => group.is_valid(),
		}
	}
}

impl<K, V> Keyed for Slot<K, V> {
	type Key = K;

	#[inline]
	fn key(&self) -> &K {
		Slot::key(self)
	}
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Slot<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Slot::Single(entry) => fmt::Display::fmt(entry, f),
			Slot::Group(group) => {
				write!(f, "{{{}: [", group.key())?;
				for (i, entry) in group.entries().iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", entry.value())?;
				}
				write!(f, "]}}")
			}
		}
	}
}
