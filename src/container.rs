#[cfg(feature = "std-slab")]
use slab::Slab;

/// Node storage, addressed by identifier.
pub trait Container<T> {
	fn get(&self, id: usize) -> Option<&T>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

pub trait ContainerMut<T>: Container<T> {
	fn clear(&mut self);

	fn get_mut(&mut self, id: usize) -> Option<&mut T>;

	fn insert(&mut self, t: T) -> usize;

	fn remove(&mut self, id: usize) -> T;
}

impl<'a, T, C: Container<T>> Container<T> for &'a C {
	fn get(&self, id: usize) -> Option<&T> {
		C::get(*self, id)
	}

	fn len(&self) -> usize {
		C::len(*self)
	}
}

impl<'a, T, C: Container<T>> Container<T> for &'a mut C {
	fn get(&self, id: usize) -> Option<&T> {
		C::get(*self, id)
	}

	fn len(&self) -> usize {
		C::len(*self)
	}
}

impl<'a, T, C: ContainerMut<T>> ContainerMut<T> for &'a mut C {
	fn clear(&mut self) {
		C::clear(*self)
	}

	fn get_mut(&mut self, id: usize) -> Option<&mut T> {
		C::get_mut(*self, id)
	}

	fn insert(&mut self, t: T) -> usize {
		C::insert(*self, t)
	}

	fn remove(&mut self, id: usize) -> T {
		C::remove(*self, id)
	}
}

#[cfg(feature = "std-slab")]
impl<T> Container<T> for Slab<T> {
	fn get(&self, id: usize) -> Option<&T> {
		Slab::get(self, id)
	}

	fn len(&self) -> usize {
		Slab::len(self)
	}
}

#[cfg(feature = "std-slab")]
impl<T> ContainerMut<T> for Slab<T> {
	fn clear(&mut self) {
		Slab::clear(self)
	}

	fn get_mut(&mut self, id: usize) -> Option<&mut T> {
		Slab::get_mut(self, id)
	}

	fn insert(&mut self, t: T) -> usize {
		Slab::insert(self, t)
	}

	fn remove(&mut self, id: usize) -> T {
		Slab::remove(self, id)
	}
}
