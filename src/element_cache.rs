use crate::item::Key;
use core::{
	fmt::{self, Debug, Formatter},
	hash::BuildHasher,
};
use hashbrown::{DefaultHashBuilder, HashMap, HashSet};

/// Maps [`Key`]s to the element handles previously rendered for them.
///
/// This is pure bookkeeping: The cache never attaches or detaches anything on a surface.
/// [`put`](`KeyedElementCache::put`) on an existing key overwrites its element.
#[derive(Clone)]
pub struct KeyedElementCache<E, S = DefaultHashBuilder>(HashMap<Key, E, S>)
where
	S: BuildHasher;
impl<E: Debug, S: BuildHasher> Debug for KeyedElementCache<E, S> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}
impl<E, S> Default for KeyedElementCache<E, S>
where
	S: Default + BuildHasher,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<E, S> KeyedElementCache<E, S>
where
	S: BuildHasher,
{
	#[must_use]
	pub fn new() -> Self
	where
		S: Default,
	{
		Self(HashMap::with_hasher(S::default()))
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&E> {
		self.0.get(key)
	}

	/// Stores `element` under `key`, returning the element it replaced.
	pub fn put(&mut self, key: Key, element: E) -> Option<E> {
		self.0.insert(key, element)
	}

	pub fn remove(&mut self, key: &str) -> Option<E> {
		self.0.remove(key)
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn keys(&self) -> impl '_ + ExactSizeIterator<Item = &Key> {
		self.0.keys()
	}

	#[must_use]
	pub fn key_set(&self) -> HashSet<&Key> {
		self.0.keys().collect()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn capacity(&self) -> usize {
		self.0.capacity()
	}
}
impl<E, S> Extend<(Key, E)> for KeyedElementCache<E, S>
where
	S: BuildHasher,
{
	fn extend<T: IntoIterator<Item = (Key, E)>>(&mut self, iter: T) {
		self.0.extend(iter)
	}
}
impl<E, S> FromIterator<(Key, E)> for KeyedElementCache<E, S>
where
	S: Default + BuildHasher,
{
	fn from_iter<T: IntoIterator<Item = (Key, E)>>(iter: T) -> Self {
		let mut cache = Self::new();
		cache.extend(iter);
		cache
	}
}
