use btree_dupes::{BTree, EntryId};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::{cell::Cell, collections::HashMap, rc::Rc};

#[test]
pub fn iter() {
	let mut btree = BTree::new();
	for i in (0..10).rev() {
		btree.insert(i, i);
	}

	let mut i = 0;
	for entry in &btree {
		assert_eq!(*entry.key(), i);
		assert_eq!(*entry.value(), i);
		i += 1;
	}

	assert_eq!(i, 10)
}

#[test]
pub fn equal_keys_keep_insertion_order() {
	let mut rng = SmallRng::seed_from_u64(7);
	let mut btree = BTree::with_degree(2);
	for i in 0..300u32 {
		btree.insert(rng.gen_range(0..25u32), i);
	}

	let pairs: Vec<(u32, u32)> = btree.iter().map(|e| (*e.key(), *e.value())).collect();
	assert_eq!(pairs.len(), 300);
	assert!(pairs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
pub fn size_hint() {
	let btree: BTree<usize, usize> = BTree::from_pairs(2, (0..64).map(|k| (k / 3, k)));
	let mut iter = btree.iter();
	assert_eq!(iter.len(), 64);

	iter.next();
	iter.next();
	assert_eq!(iter.len(), 62);
	assert_eq!(iter.by_ref().count(), 62);

	// fused
	assert!(iter.next().is_none());
	assert!(iter.next().is_none());
}

#[test]
pub fn identities_round_trip() {
	let mut btree = BTree::with_degree(3);
	let mut by_id = HashMap::new();
	for i in 0..100 {
		let key = i % 17;
		by_id.insert(btree.insert(key, i), (key, i));
	}

	let seen: HashMap<EntryId, (i32, i32)> = btree.iter().map(|e| (e.id(), (*e.key(), *e.value()))).collect();
	assert_eq!(seen, by_id);
}

#[test]
pub fn values_are_dropped() {
	struct Element {
		/// Drop counter.
		counter: Rc<Cell<usize>>,
	}

	impl Drop for Element {
		fn drop(&mut self) {
			self.counter.set(self.counter.get() + 1)
		}
	}

	let counter = Rc::new(Cell::new(0));
	let mut btree = BTree::with_degree(2);
	for i in 0..100 {
		btree.insert(i % 10, Element {
			counter: counter.clone(),
		});
	}

	drop(btree.delete_all(&3));
	assert_eq!(counter.get(), 10);

	drop(btree.delete(&4));
	assert_eq!(counter.get(), 11);

	btree.clear();
	assert_eq!(counter.get(), 100);
}
