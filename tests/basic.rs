use btree_dupes::{generic::tree::BTreeExt, BTree, Error};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

const SEED: u64 = 0x5eed;

fn init_logs() {
	let _ = tracing_subscriber::fmt::try_init();
}

fn shuffled_keys(count: usize, seed: u64) -> Vec<usize> {
	let mut keys: Vec<usize> = (0..count).collect();
	let mut rng = SmallRng::seed_from_u64(seed);
	keys.shuffle(&mut rng);
	keys
}

fn keys_of<V>(btree: &BTree<usize, V>) -> Vec<usize> {
	btree.iter().map(|e| *e.key()).collect()
}

#[test]
pub fn insert() {
	init_logs();
	let mut btree: BTree<usize, usize> = BTree::new();

	for key in shuffled_keys(100, SEED) {
		btree.insert(key, key * 2);
		assert!(btree.is_valid());
	}

	assert_eq!(btree.len(), 100);
	assert_eq!(keys_of(&btree), (0..100).collect::<Vec<_>>());
	for key in 0..100 {
		assert_eq!(btree.get(&key), Some(&(key * 2)));
	}
}

#[test]
pub fn small_degree_scenario() {
	init_logs();
	let mut btree: BTree<i32, i32> = BTree::with_degree(2);

	for key in [10, 20, 5, 6, 12, 30, 7, 17] {
		btree.insert(key, -key);
		assert!(btree.is_valid());
	}

	let keys: Vec<_> = btree.iter().map(|e| *e.key()).collect();
	assert_eq!(keys, [5, 6, 7, 10, 12, 17, 20, 30]);
	assert_eq!(btree.height(), 2);

	let removed = btree.delete(&10).unwrap();
	assert_eq!(removed.into_pair(), (10, -10));
	assert!(btree.is_valid());

	let keys: Vec<_> = btree.iter().map(|e| *e.key()).collect();
	assert_eq!(keys, [5, 6, 7, 12, 17, 20, 30]);
	assert!(!btree.contains_key(&10));
}

#[test]
pub fn delete_every_entry() {
	init_logs();
	for degree in 2..6 {
		let mut btree: BTree<usize, usize> = BTree::with_degree(degree);
		let mut ids = Vec::new();
		for key in shuffled_keys(200, SEED + degree as u64) {
			ids.push((key, btree.insert(key, key)));
		}

		let mut rng = SmallRng::seed_from_u64(SEED);
		ids.shuffle(&mut rng);

		for (key, id) in ids {
			let entry = btree.delete_one(&key, id).unwrap();
			assert_eq!(entry.id(), id);
			assert_eq!(*entry.key(), key);
			assert!(btree.is_valid());
		}

		assert!(btree.is_empty());
		assert_eq!(btree.height(), 1);
	}
}

#[test]
pub fn delete_by_key() {
	init_logs();
	let mut btree: BTree<usize, usize> = (0..50).map(|k| (k, k)).collect();

	for key in shuffled_keys(50, SEED) {
		assert_eq!(btree.delete(&key).map(|e| e.into_value()), Ok(key));
		assert!(btree.is_valid());
	}

	assert!(btree.is_empty());
}

#[test]
pub fn missing_keys() {
	init_logs();
	let mut btree: BTree<usize, usize> = BTree::from_pairs(2, (0..20).map(|k| (k * 2, k)));
	let len = btree.len();

	assert_eq!(btree.delete(&3).unwrap_err(), Error::KeyNotFound);
	assert_eq!(btree.delete_all(&41).unwrap_err(), Error::KeyNotFound);
	assert!(btree.is_valid());
	assert_eq!(btree.len(), len);

	// the ticket belongs to key 4, not key 6.
	let id = btree.search_all(&4).unwrap()[0].id();
	assert_eq!(btree.delete_one(&6, id).unwrap_err(), Error::EntryNotFound(id));
	assert_eq!(btree.delete_one(&7, id).unwrap_err(), Error::EntryNotFound(id));
	assert!(btree.is_valid());
	assert_eq!(btree.len(), len);
	assert_eq!(keys_of(&btree), (0..20).map(|k| k * 2).collect::<Vec<_>>());
}

#[test]
pub fn empty_tree() {
	let mut btree: BTree<i32, i32> = BTree::default();
	assert!(btree.is_empty());
	assert!(btree.is_valid());
	assert_eq!(btree.degree(), btree_dupes::generic::tree::DEFAULT_DEGREE);
	assert_eq!(btree.iter().next(), None);
	assert!(btree.search_all(&0).is_none());
	assert_eq!(btree.delete(&0).unwrap_err(), Error::KeyNotFound);
	assert!(btree.is_valid());
}

#[test]
pub fn clear() {
	let mut btree: BTree<usize, ()> = BTree::with_degree(2);
	let first = btree.insert(1, ());
	btree.extend((2..40).map(|k| (k, ())));
	assert!(btree.height() > 1);

	btree.clear();
	assert!(btree.is_empty());
	assert!(btree.is_valid());
	assert_eq!(btree.height(), 1);

	let again = btree.insert(1, ());
	assert_ne!(first, again);
	assert_eq!(btree.len(), 1);
}

#[test]
pub fn heights() {
	let mut btree: BTree<usize, ()> = BTree::with_degree(2);
	assert_eq!(btree.height(), 1);

	btree.extend((0..3).map(|k| (k, ())));
	assert_eq!(btree.height(), 1);

	btree.insert(3, ());
	assert_eq!(btree.height(), 2);

	btree.extend((4..1000).map(|k| (k, ())));
	// a 2-3-4 tree of height h holds at most 4^h - 1 slots.
	assert!(btree.height() >= 5);
	assert!(btree.height() <= 10);
	assert!(btree.is_valid());
}

#[test]
pub fn display() {
	let mut btree: BTree<i32, char> = BTree::with_degree(2);
	for (key, value) in [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')] {
		btree.insert(key, value);
	}

	assert_eq!(
		btree.to_string(),
		"0: (): [{2: b}]\n|\n1: (0): [{1: a}]\n1: (1): [{3: c}, {4: d}]"
	);

	btree.insert(4, 'e');
	assert_eq!(
		btree.to_string(),
		"0: (): [{2: b}]\n|\n1: (0): [{1: a}]\n1: (1): [{3: c}, {4: [d, e]}]"
	);
}

#[test]
pub fn validation_reports_nothing_on_fresh_trees() {
	let btree: BTree<usize, usize> = BTree::from_pairs(3, (0..500).map(|k| (k % 37, k)));
	assert_eq!(btree.validate(), Ok(()));
	assert_eq!(btree.len(), 500);
	assert_eq!(btree.iter().len(), 500);
}
