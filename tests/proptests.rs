use btree_dupes::{BTree, EntryId, Error};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
	Insert(u8),
	Delete(u8),
	DeleteAll(u8),
	/// Delete the n-th live entry of the model, by ticket.
	DeleteOne(usize),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => any::<u8>().prop_map(|k| Op::Insert(k % 64)),
		1 => any::<u8>().prop_map(|k| Op::Delete(k % 64)),
		1 => any::<u8>().prop_map(|k| Op::DeleteAll(k % 64)),
		2 => any::<usize>().prop_map(Op::DeleteOne),
	]
}

/// Key to the tickets of its entries, oldest first.
type Model = BTreeMap<u8, Vec<EntryId>>;

fn flatten(model: &Model) -> Vec<(u8, EntryId)> {
	model
		.iter()
		.flat_map(|(k, ids)| ids.iter().map(move |id| (*k, *id)))
		.collect()
}

proptest! {
	#[test]
	fn matches_model(degree in 2usize..6, ops in prop::collection::vec(op(), 0..300)) {
		let mut btree: BTree<u8, ()> = BTree::with_degree(degree);
		let mut model = Model::new();

		for op in ops {
			match op {
				Op::Insert(key) => {
					let id = btree.insert(key, ());
					model.entry(key).or_default().push(id);
				}
				Op::Delete(key) => match model.get_mut(&key) {
					Some(ids) => {
						let oldest = ids.remove(0);
						if ids.is_empty() {
							model.remove(&key);
						}
						prop_assert_eq!(btree.delete(&key).map(|e| e.id()), Ok(oldest));
					}
					None => {
						prop_assert_eq!(btree.delete(&key).map(|e| e.id()), Err(Error::KeyNotFound));
					}
				},
				Op::DeleteAll(key) => {
					let expected = model.remove(&key).ok_or(Error::KeyNotFound);
					let removed = btree
						.delete_all(&key)
						.map(|entries| entries.iter().map(|e| e.id()).collect::<Vec<_>>());
					prop_assert_eq!(removed, expected);
				}
				Op::DeleteOne(n) => {
					let live = flatten(&model);
					if !live.is_empty() {
						let (key, id) = live[n % live.len()];
						if let Some(ids) = model.get_mut(&key) {
							ids.retain(|i| *i != id);
							if ids.is_empty() {
								model.remove(&key);
							}
						}
						prop_assert_eq!(btree.delete_one(&key, id).map(|e| e.id()), Ok(id));
						// the ticket is spent.
						prop_assert_eq!(btree.delete_one(&key, id).map(|e| e.id()), Err(Error::EntryNotFound(id)));
					}
				}
			}

			prop_assert!(btree.is_valid());
		}

		let entries: Vec<(u8, EntryId)> = btree.iter().map(|e| (*e.key(), e.id())).collect();
		prop_assert_eq!(entries, flatten(&model));
		prop_assert_eq!(btree.len(), model.values().map(Vec::len).sum::<usize>());
	}

	#[test]
	fn height_is_logarithmic(degree in 2usize..8, count in 1usize..2000) {
		let btree: BTree<usize, ()> = BTree::from_pairs(degree, (0..count).map(|k| (k, ())));

		// a non-root node has at least `degree` children.
		let mut min_entries = 1usize;
		let mut capacity = 1usize;
		for _ in 1..btree.height() {
			min_entries += 2 * (degree - 1) * capacity;
			capacity *= degree;
		}

		prop_assert!(min_entries <= count);
		prop_assert!(btree.is_valid());
	}
}
