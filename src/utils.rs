use crate::generic::node::Keyed;
use std::borrow::Borrow;

/// Search in `sorted_slice` for the item with the nearest key smaller or equal to the given one.
///
/// `sorted_slice` is assumed to be sorted.
#[inline]
pub fn binary_search_min<T: Keyed, Q: ?Sized>(sorted_slice: &[T], key: &Q) -> Option<usize>
where
	T::Key: Borrow<Q>,
	Q: Ord,
{
	if sorted_slice.is_empty() || sorted_slice[0].key().borrow() > key {
		None
	} else {
		let mut i = 0;
		let mut j = sorted_slice.len() - 1;

		if sorted_slice[j].key().borrow() <= key {
			return Some(j);
		}

		// invariants:
		// sorted_slice[i].key <= key
		// sorted_slice[j].key > key
		// j > i

		while j - i > 1 {
			let k = (i + j) / 2;

			if sorted_slice[k].key().borrow() > key {
				j = k;
			} else {
				i = k;
			}
		}

		Some(i)
	}
}

/// Find the offset of the item whose key equals `key` in `sorted_slice`.
///
/// Returns `Err(index)` with the insertion index if no such item exists.
#[inline]
pub fn offset_in<T: Keyed, Q: ?Sized>(sorted_slice: &[T], key: &Q) -> Result<usize, usize>
where
	T::Key: Borrow<Q>,
	Q: Ord,
{
	match binary_search_min(sorted_slice, key) {
		Some(i) => {
			if sorted_slice[i].key().borrow() == key {
				Ok(i)
			} else {
				Err(i + 1)
			}
		}
		None => Err(0),
	}
}
