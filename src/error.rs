use crate::generic::node::EntryId;
use std::fmt;

/// Error returned by the removal operations of a [`BTree`](crate::generic::BTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
	/// No entry is stored under the requested key.
	KeyNotFound,

	/// The entry with the given ticket is not stored under the requested key.
	///
	/// Either it was never inserted with this key, or it has already been removed.
	EntryNotFound(EntryId),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::KeyNotFound => write!(f, "key not found"),
			Error::EntryNotFound(id) => write!(f, "entry {} not found", id),
		}
	}
}

impl std::error::Error for Error {}
