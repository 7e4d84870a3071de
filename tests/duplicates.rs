use btree_dupes::{BTree, EntryId, Error};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

fn values(btree: &BTree<i32, &'static str>, key: &i32) -> Vec<&'static str> {
	match btree.search_values(key) {
		Some(values) => values.copied().collect(),
		None => Vec::new(),
	}
}

#[test]
pub fn search_values_in_insertion_order() {
	let mut btree = BTree::new();
	btree.insert(1, "a");
	btree.insert(1, "b");
	btree.insert(1, "c");

	assert_eq!(values(&btree, &1), ["a", "b", "c"]);
	assert_eq!(btree.len(), 3);
	assert_eq!(btree.get(&1), Some(&"a"));
	assert!(btree.is_valid());
}

#[test]
pub fn group_collapses_to_single_entry() {
	let mut btree = BTree::with_degree(2);
	let a = btree.insert(1, "a");
	let b = btree.insert(1, "b");
	btree.insert(0, "x");
	btree.insert(2, "y");

	assert_eq!(btree.delete_one(&1, a).map(|e| e.into_value()), Ok("a"));
	assert!(btree.is_valid());
	assert_eq!(values(&btree, &1), ["b"]);
	assert_eq!(btree.search_all(&1).unwrap()[0].id(), b);

	assert_eq!(btree.delete_one(&1, b).map(|e| e.into_value()), Ok("b"));
	assert!(btree.is_valid());
	assert!(btree.search_all(&1).is_none());
	assert_eq!(btree.len(), 2);
}

#[test]
pub fn delete_takes_the_oldest() {
	let mut btree = BTree::new();
	let ids: Vec<EntryId> = ["a", "b", "c"].iter().map(|v| btree.insert(7, *v)).collect();

	assert_eq!(btree.delete(&7).unwrap().id(), ids[0]);
	assert_eq!(btree.delete(&7).unwrap().id(), ids[1]);
	assert_eq!(btree.delete(&7).unwrap().id(), ids[2]);
	assert_eq!(btree.delete(&7).unwrap_err(), Error::KeyNotFound);
	assert!(btree.is_empty());
	assert!(btree.is_valid());
}

#[test]
pub fn delete_all_removes_the_whole_group() {
	let mut btree = BTree::with_degree(2);
	for key in 0..30 {
		btree.insert(key, "single");
	}
	btree.insert(13, "again");
	btree.insert(13, "and again");

	let removed = btree.delete_all(&13).unwrap();
	let removed: Vec<_> = removed.into_iter().map(|e| e.into_value()).collect();
	assert_eq!(removed, ["single", "again", "and again"]);
	assert!(btree.is_valid());
	assert_eq!(btree.len(), 29);
	assert!(!btree.contains_key(&13));

	assert_eq!(btree.delete_all(&5).map(|entries| entries.len()), Ok(1));
	assert_eq!(btree.len(), 28);
	assert!(btree.is_valid());
}

#[test]
pub fn stale_ticket() {
	let mut btree = BTree::new();
	let a = btree.insert(3, "a");
	btree.insert(3, "b");
	btree.insert(3, "c");

	btree.delete_one(&3, a).unwrap();
	assert_eq!(btree.delete_one(&3, a).unwrap_err(), Error::EntryNotFound(a));
	assert_eq!(values(&btree, &3), ["b", "c"]);
	assert_eq!(btree.len(), 2);
}

#[test]
pub fn groups_survive_restructuring() {
	let _ = tracing_subscriber::fmt::try_init();
	let mut rng = SmallRng::seed_from_u64(42);

	for degree in 2..5 {
		let mut btree = BTree::with_degree(degree);
		let mut inserted = Vec::new();
		for _ in 0..400 {
			let key: i32 = rng.gen_range(0..40);
			inserted.push((key, btree.insert(key, "v")));
			assert!(btree.is_valid());
		}

		// every key appears in exactly one slot, with its entries in ticket order.
		for key in 0..40 {
			let expected: Vec<EntryId> = inserted.iter().filter(|(k, _)| *k == key).map(|(_, id)| *id).collect();
			let found: Vec<EntryId> = btree.search_all(&key).map(|entries| entries.iter().map(|e| e.id()).collect()).unwrap_or_default();
			assert_eq!(found, expected);
		}

		inserted.shuffle(&mut rng);
		for (key, id) in inserted {
			assert_eq!(btree.delete_one(&key, id).map(|e| e.id()), Ok(id));
			assert!(btree.is_valid());
		}

		assert!(btree.is_empty());
	}
}
