use crate::{
	generic::{
		node::{Entry, Node},
		tree::{BTree, BTreeExt},
	},
	Container,
};
use std::{iter::FusedIterator, slice};

/// Iterator over the entries of a [`BTree`], sorted by key.
///
/// Entries sharing a key are visited in insertion order.
pub struct Iter<'a, K, V, C> {
	/// The tree reference.
	btree: &'a BTree<K, V, C>,

	/// Nodes being visited, with the offset of the next slot to visit in each of them.
	stack: Vec<(usize, usize)>,

	/// Remaining entries of the current slot.
	entries: slice::Iter<'a, Entry<K, V>>,

	len: usize,
}

impl<'a, K, V, C: Container<Node<K, V>>> Iter<'a, K, V, C> {
	pub fn new(btree: &'a BTree<K, V, C>) -> Self {
		let empty: &'a [Entry<K, V>] = &[];
		let mut iter = Iter {
			btree,
			stack: Vec::new(),
			entries: empty.iter(),
			len: btree.len(),
		};

		iter.descend_leftmost(btree.root_id());
		iter
	}

	/// Push the given node and its leftmost descendants on the stack.
	fn descend_leftmost(&mut self, mut id: usize) {
		let btree = self.btree;
		loop {
			self.stack.push((id, 0));
			match btree.node(id).child_id_opt(0) {
				Some(child_id) => id = child_id,
				None => break,
			}
		}
	}
}

impl<'a, K, V, C: Container<Node<K, V>>> Iterator for Iter<'a, K, V, C> {
	type Item = &'a Entry<K, V>;

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	fn next(&mut self) -> Option<&'a Entry<K, V>> {
		let btree = self.btree;
		loop {
			if let Some(entry) = self.entries.next() {
				self.len -= 1;
				return Some(entry);
			}

			let (id, offset) = self.stack.pop()?;
			let node = btree.node(id);
			if let Some(slot) = node.slot(offset) {
				self.entries = slot.entries().iter();
				self.stack.push((id, offset + 1));
				if let Some(child_id) = node.child_id_opt(offset + 1) {
					self.descend_leftmost(child_id)
				}
			}
		}
	}
}

impl<'a, K, V, C: Container<Node<K, V>>> FusedIterator for Iter<'a, K, V, C> {}
impl<'a, K, V, C: Container<Node<K, V>>> ExactSizeIterator for Iter<'a, K, V, C> {}

impl<'a, K, V, C: Container<Node<K, V>>> IntoIterator for &'a BTree<K, V, C> {
	type IntoIter = Iter<'a, K, V, C>;
	type Item = &'a Entry<K, V>;

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, C> {
		self.iter()
	}
}
