use crate::{
	error::Error,
	generic::node::{Entry, EntryId, Node, Slot},
	Container, ContainerMut,
};
use std::{borrow::Borrow, collections::VecDeque, fmt, marker::PhantomData};
use tracing::debug;

mod ext;
mod iter;

pub use ext::*;
pub use iter::*;

/// Minimum degree used by [`BTree::new`].
pub const DEFAULT_DEGREE: usize = 3;

/// A multimap based on a B-Tree.
///
/// Nodes are allocated in a container of [`Node`]s (a `Slab` by default), and refer to
/// their children by identifier.
///
/// The tree has a minimum degree `t`: every node holds at most `2t - 1` slots,
/// and every node but the root holds at least `t - 1` slots.
/// A slot holds either a single [`Entry`] or, when the same key has been inserted more than
/// once, a [`DuplicateGroup`](crate::DuplicateGroup) keeping the entries in insertion order.
///
/// # Basic usage
///
/// ```
/// use btree_dupes::BTree;
///
/// let mut tree = BTree::with_degree(2);
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key, key * 10);
///     assert!(tree.is_valid());
/// }
///
/// let keys: Vec<_> = tree.iter().map(|e| *e.key()).collect();
/// assert_eq!(keys, [5, 6, 7, 10, 12, 17, 20, 30]);
///
/// tree.delete(&10).unwrap();
/// assert!(tree.is_valid());
/// assert_eq!(tree.len(), 7);
/// ```
///
/// # Duplicates
///
/// ```
/// use btree_dupes::BTree;
///
/// let mut tree = BTree::new();
/// let a = tree.insert(1, "a");
/// let b = tree.insert(1, "b");
/// tree.insert(1, "c");
///
/// let values: Vec<_> = tree.search_values(&1).unwrap().copied().collect();
/// assert_eq!(values, ["a", "b", "c"]);
///
/// // remove exactly the entry `b`.
/// assert_eq!(tree.delete_one(&1, b).unwrap().into_value(), "b");
/// assert!(tree.delete_one(&1, b).is_err());
///
/// // remove some entry with key `1`.
/// assert_eq!(tree.delete(&1).unwrap().id(), a);
/// ```
///
/// # Correctness
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the tree.
#[derive(Clone)]
pub struct BTree<K, V, C> {
	/// Allocated nodes.
	nodes: C,

	/// Root node id.
	root: usize,

	/// Minimum degree.
	degree: usize,

	/// Number of entries in the tree.
	len: usize,

	/// Next entry ticket.
	next_id: u64,

	k: PhantomData<K>,
	v: PhantomData<V>,
}

impl<K, V, C: ContainerMut<Node<K, V>> + Default> BTree<K, V, C> {
	/// Create a new empty B-tree of degree [`DEFAULT_DEGREE`].
	pub fn new() -> BTree<K, V, C> {
		BTree::with_degree(DEFAULT_DEGREE)
	}

	/// Create a new empty B-tree with the given minimum degree.
	///
	/// # Panics
	///
	/// Panics if `degree` is less than 2.
	pub fn with_degree(degree: usize) -> BTree<K, V, C> {
		assert!(degree >= 2, "B-tree degree must be at least 2");
		let mut nodes = C::default();
		let root = nodes.insert(Node::empty_leaf());
		BTree {
			nodes,
			root,
			degree,
			len: 0,
			next_id: 0,
			k: PhantomData,
			v: PhantomData,
		}
	}

	/// Create a B-tree with the given minimum degree, filled with the given pairs.
	///
	/// Pairs are inserted one by one, in order.
	pub fn from_pairs<I>(degree: usize, pairs: I) -> BTree<K, V, C>
	where
		K: Ord,
		I: IntoIterator<Item = (K, V)>,
	{
		let mut btree = BTree::with_degree(degree);
		btree.extend(pairs);
		btree
	}
}

impl<K, V, C> BTree<K, V, C> {
	/// Minimum degree of the tree.
	#[inline]
	pub fn degree(&self) -> usize {
		self.degree
	}

	/// Number of entries in the tree, counting every duplicate.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}

impl<K, V, C: Container<Node<K, V>>> BTree<K, V, C> {
	/// Returns every entry stored under the given key, in insertion order.
	///
	/// Returns `None` if the key is not in the tree.
	///
	/// # Example
	///
	/// ```
	/// use btree_dupes::BTree;
	///
	/// let mut tree = BTree::new();
	/// let a = tree.insert(1, "a");
	/// let b = tree.insert(1, "b");
	///
	/// let ids: Vec<_> = tree.search_all(&1).unwrap().iter().map(|e| e.id()).collect();
	/// assert_eq!(ids, [a, b]);
	/// assert!(tree.search_all(&2).is_none());
	/// ```
	pub fn search_all<Q: ?Sized>(&self, key: &Q) -> Option<&[Entry<K, V>]>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut id = self.root;
		loop {
			let node = self.node(id);
			match node.offset_of(key) {
				Ok(offset) => return node.slot(offset).map(Slot::entries),
				Err(index) => id = node.child_id_opt(index)?,
			}
		}
	}

	/// Returns the values stored under the given key, in insertion order.
	#[inline]
	pub fn search_values<Q: ?Sized>(&self, key: &Q) -> Option<impl Iterator<Item = &V> + '_>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.search_all(key).map(|entries| entries.iter().map(Entry::value))
	}

	/// Returns the oldest value stored under the given key.
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.search_all(key).and_then(|entries| entries.first()).map(Entry::value)
	}

	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.search_all(key).is_some()
	}

	/// Number of levels in the tree.
	///
	/// An empty tree has height 1.
	pub fn height(&self) -> usize {
		let mut height = 1;
		let mut id = self.root;
		while let Some(child_id) = self.node(id).child_id_opt(0) {
			height += 1;
			id = child_id
		}

		height
	}

	/// Gets an iterator over the entries of the tree, sorted by key.
	///
	/// Entries sharing the same key are visited in insertion order.
	#[inline]
	pub fn iter(&self) -> Iter<K, V, C> {
		Iter::new(self)
	}

	/// Checks every structural invariant of the tree.
	///
	/// The first violation found is logged at the `debug` level.
	pub fn is_valid(&self) -> bool
	where
		K: Ord,
	{
		match self.validate() {
			Ok(()) => true,
			Err(reason) => {
				debug!(reason, "invalid B-tree");
				false
			}
		}
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		self.dot_write_node(f, self.root)?;
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [label=\"", name)?;
		node.dot_write_label(f)?;
		writeln!(f, "({})\"];", id)?;

		for child_id in node.children() {
			self.dot_write_node(f, child_id)?;
			let child_name = format!("n{}", child_id);
			writeln!(f, "\t{} -> {}", name, child_name)?;
		}

		Ok(())
	}
}

impl<K, V, C: ContainerMut<Node<K, V>>> BTree<K, V, C> {
	/// Clears the tree, removing all entries.
	///
	/// Entry tickets handed out before clearing are never reused.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.root = self.nodes.insert(Node::empty_leaf());
		self.len = 0;
	}

	/// Insert a key-value pair in the tree.
	///
	/// If the key is already present, the new entry is added after the existing ones.
	/// Returns the ticket identifying the new entry.
	pub fn insert(&mut self, key: K, value: V) -> EntryId
	where
		K: Ord,
	{
		let id = self.next_entry_id();
		let entry = Entry::new(id, key, value);

		if self.node(self.root).item_count() >= self.max_len() {
			self.grow_root()
		}

		let mut node_id = self.root;
		loop {
			match self.node(node_id).offset_of(entry.key()) {
				Ok(offset) => {
					self.node_mut(node_id).push_duplicate(offset, entry);
					break;
				}
				Err(index) => {
					if self.node(node_id).is_leaf() {
						self.node_mut(node_id).insert(index, Slot::Single(entry), None);
						break;
					}

					let child_id = self.node(node_id).child_id(index);
					if self.node(child_id).item_count() >= self.max_len() {
						// the median moves up here, search again.
						self.split_child(node_id, index)
					} else {
						node_id = child_id
					}
				}
			}
		}

		self.len += 1;
		id
	}

	/// Removes the entry with the given ticket, stored under `key`.
	///
	/// # Example
	///
	/// ```
	/// use btree_dupes::{BTree, Error};
	///
	/// let mut tree = BTree::new();
	/// let a = tree.insert(1, "a");
	/// assert_eq!(tree.delete_one(&1, a).unwrap().into_pair(), (1, "a"));
	/// assert_eq!(tree.delete_one(&1, a).unwrap_err(), Error::EntryNotFound(a));
	/// ```
	pub fn delete_one<Q: ?Sized>(&mut self, key: &Q, id: EntryId) -> Result<Entry<K, V>, Error>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let result = match self.locate_for_removal(key) {
			Some((node_id, offset)) => {
				let slot = self.slot_at(node_id, offset);
				if slot.is_group() {
					self.slot_at_mut(node_id, offset)
						.take_member(id)
						.ok_or(Error::EntryNotFound(id))
				} else if slot.entries()[0].id() == id {
					Ok(self.remove_single_at(node_id, offset))
				} else {
					Err(Error::EntryNotFound(id))
				}
			}
			None => Err(Error::EntryNotFound(id)),
		};

		self.finish_removal(result.map(|entry| (entry, 1)))
	}

	/// Removes one entry stored under `key`.
	///
	/// If the key has duplicates, the oldest entry is removed.
	pub fn delete<Q: ?Sized>(&mut self, key: &Q) -> Result<Entry<K, V>, Error>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let result = match self.locate_for_removal(key) {
			Some((node_id, offset)) => {
				let oldest = self.slot_at_mut(node_id, offset).take_oldest();
				match oldest {
					Some(entry) => Ok(entry),
					None => Ok(self.remove_single_at(node_id, offset)),
				}
			}
			None => Err(Error::KeyNotFound),
		};

		self.finish_removal(result.map(|entry| (entry, 1)))
	}

	/// Removes every entry stored under `key`.
	///
	/// Returns the removed entries in insertion order.
	pub fn delete_all<Q: ?Sized>(&mut self, key: &Q) -> Result<Vec<Entry<K, V>>, Error>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let result = match self.locate_for_removal(key) {
			Some((node_id, offset)) => {
				let entries = self.remove_slot_at(node_id, offset).into_entries();
				let count = entries.len();
				Ok((entries, count))
			}
			None => Err(Error::KeyNotFound),
		};

		self.finish_removal(result)
	}

	fn remove_single_at(&mut self, id: usize, offset: usize) -> Entry<K, V> {
		match self.remove_slot_at(id, offset) {
			Slot::Single(entry) => entry,
			Slot::Group(_) => unreachable!("duplicate groups are never removed as a whole here"),
		}
	}

	/// Shrinks the root and updates the length after a removal.
	fn finish_removal<T>(&mut self, result: Result<(T, usize), Error>) -> Result<T, Error> {
		self.shrink_root();
		match result {
			Ok((removed, count)) => {
				self.len -= count;
				Ok(removed)
			}
			Err(e) => {
				debug!(error = %e, "removal failed");
				Err(e)
			}
		}
	}
}

impl<K, V, C: ContainerMut<Node<K, V>> + Default> Default for BTree<K, V, C> {
	fn default() -> Self {
		BTree::new()
	}
}

impl<K: Ord, V, C: ContainerMut<Node<K, V>> + Default> FromIterator<(K, V)> for BTree<K, V, C> {
	fn from_iter<T>(iter: T) -> BTree<K, V, C>
	where
		T: IntoIterator<Item = (K, V)>,
	{
		let mut btree = BTree::new();
		btree.extend(iter);
		btree
	}
}

impl<K: Ord, V, C: ContainerMut<Node<K, V>>> Extend<(K, V)> for BTree<K, V, C> {
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

/// Breadth-first dump of the tree, one node per line, for diagnostics.
///
/// Each line reads `layer: (path): [slots]`, where `path` lists the child indexes leading
/// to the node from the root. Consecutive layers are separated by a `|` line.
impl<K: fmt::Display, V: fmt::Display, C: Container<Node<K, V>>> fmt::Display for BTree<K, V, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut queue = VecDeque::new();
		queue.push_back((0usize, Vec::new(), self.root));

		let mut last_layer = 0;
		let mut first_line = true;
		while let Some((layer, path, id)) = queue.pop_front() {
			if !first_line {
				writeln!(f)?;
			}
			first_line = false;

			if layer != last_layer {
				writeln!(f, "|")?;
				last_layer = layer;
			}

			let node = self.node(id);
			let steps: Vec<String> = path.iter().map(ToString::to_string).collect();
			let slots: Vec<String> = node.slots().map(ToString::to_string).collect();
			write!(f, "{}: ({}): [{}]", layer, steps.join(", "), slots.join(", "))?;

			for (i, child_id) in node.children().enumerate() {
				let mut child_path: Vec<usize> = path.clone();
				child_path.push(i);
				queue.push_back((layer + 1, child_path, child_id));
			}
		}

		Ok(())
	}
}

impl<K: fmt::Debug, V: fmt::Debug, C: Container<Node<K, V>>> fmt::Debug for BTree<K, V, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
