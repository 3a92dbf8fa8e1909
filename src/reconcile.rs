//! Decides, per item, whether a previously rendered element can be reused.
//!
//! Reconciliation works at whole-item granularity: An element cached under an item's [`Key`]
//! is reused as-is, **even if that item's text changed since it was built**.
//! Only creation, removal and order are reconciled. Changing what an item displays
//! requires a new id (delete and re-add).

use crate::{
	element_cache::KeyedElementCache,
	item::{Item, Key},
};
use core::hash::BuildHasher;
use hashbrown::HashSet;
use tracing::{debug, error, instrument, trace, trace_span};

/// What to do for one item of the new list, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render<'a, E> {
	/// Re-attach the element rendered earlier for this key.
	Reuse { key: Key, element: E },
	/// Build a fresh element from `item`.
	Create { key: Key, item: &'a Item },
}
impl<'a, E> Render<'a, E> {
	#[must_use]
	pub fn key(&self) -> &Key {
		match self {
			Render::Reuse { key, .. } | Render::Create { key, .. } => key,
		}
	}

	#[must_use]
	pub fn is_reuse(&self) -> bool {
		matches!(self, Render::Reuse { .. })
	}

	#[must_use]
	pub fn is_create(&self) -> bool {
		matches!(self, Render::Create { .. })
	}
}

/// An element whose key vanished from the list. It has already been evicted from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard<E> {
	pub key: Key,
	pub element: E,
}

/// The full outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<'a, E> {
	/// One entry per new item, in the new display order.
	pub renders: Vec<Render<'a, E>>,
	pub discards: Vec<Discard<E>>,
}
impl<'a, E> Reconciliation<'a, E> {
	#[must_use]
	pub fn reuse_count(&self) -> usize {
		self.renders.iter().filter(|render| render.is_reuse()).count()
	}

	#[must_use]
	pub fn create_count(&self) -> usize {
		self.renders.iter().filter(|render| render.is_create()).count()
	}
}

/// Reconciles the `next` items against the `previous` key order.
///
/// Items whose key is present in `cache` become [`Render::Reuse`], all others [`Render::Create`].
/// Every key of `previous` that doesn't appear in `next` is evicted from `cache` and reported as [`Discard`].
///
/// `next` must not contain the same id twice.
#[instrument(skip(previous, next, cache), fields(previous.len = previous.len(), next.len = next.len()))]
pub fn reconcile<'a, E, S>(previous: &[Key], next: &'a [Item], cache: &mut KeyedElementCache<E, S>) -> Reconciliation<'a, E>
where
	E: Clone,
	S: BuildHasher,
{
	let mut next_keys = HashSet::with_capacity(next.len());
	let mut renders = Vec::with_capacity(next.len());
	for item in next {
		let key = item.key();
		let span = trace_span!("Reconciling item", %key);
		let _enter = span.enter();

		if !next_keys.insert(key.clone()) {
			if cfg!(debug_assertions) {
				panic!("Duplicate item key encountered: {}", key);
			} else {
				error!("Duplicate item key encountered. Skipping the repeated item.");
				continue;
			}
		}

		renders.push(match cache.get(key.as_str()) {
			Some(element) => {
				trace!("Reusing cached element.");
				Render::Reuse { key, element: element.clone() }
			}
			None => {
				trace!("No cached element. Creating.");
				Render::Create { key, item }
			}
		});
	}

	let mut discards = Vec::new();
	for key in previous {
		if next_keys.contains(key) {
			continue;
		}
		match cache.remove(key.as_str()) {
			Some(element) => {
				trace!(%key, "Discarding.");
				discards.push(Discard { key: key.clone(), element });
			}
			None => error!(%key, "Previously rendered key has no cached element. Nothing to discard."),
		}
	}

	let reconciliation = Reconciliation { renders, discards };
	debug!(
		reused = reconciliation.reuse_count(),
		created = reconciliation.create_count(),
		discarded = reconciliation.discards.len(),
		"Reconciled."
	);
	reconciliation
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::item::ItemId;

	fn item(id: u32, text: &str) -> Item {
		Item {
			id: ItemId::new(id).unwrap(),
			text: text.to_owned(),
		}
	}

	#[test]
	fn creates_then_reuses() {
		let mut cache = KeyedElementCache::<u32>::new();
		let first = [item(1, "a")];

		let reconciliation = reconcile(&[], &first, &mut cache);
		assert_eq!(reconciliation.renders, [Render::Create { key: first[0].key(), item: &first[0] }]);
		assert!(reconciliation.discards.is_empty());

		cache.put(first[0].key(), 10);
		let second = [item(1, "a"), item(2, "b")];
		let reconciliation = reconcile(&[first[0].key()], &second, &mut cache);
		assert_eq!(
			reconciliation.renders,
			[
				Render::Reuse { key: second[0].key(), element: 10 },
				Render::Create { key: second[1].key(), item: &second[1] },
			]
		);
	}

	#[test]
	fn empty_next_only_discards() {
		let mut cache: KeyedElementCache<u32> = [(item(1, "").key(), 1), (item(2, "").key(), 2)].into_iter().collect();
		let reconciliation = reconcile(&[item(1, "").key(), item(2, "").key()], &[], &mut cache);
		assert!(reconciliation.renders.is_empty());
		assert_eq!(
			reconciliation.discards,
			[
				Discard { key: item(1, "").key(), element: 1 },
				Discard { key: item(2, "").key(), element: 2 },
			]
		);
		assert!(cache.is_empty());
	}

	#[test]
	fn changed_text_is_still_reused() {
		let mut cache: KeyedElementCache<&str> = [(item(1, "").key(), "old")].into_iter().collect();
		let next = [item(1, "new")];
		let reconciliation = reconcile(&[next[0].key()], &next, &mut cache);
		assert_eq!(reconciliation.renders, [Render::Reuse { key: next[0].key(), element: "old" }]);
	}

	#[test]
	#[should_panic(expected = "Duplicate item key")]
	#[cfg(debug_assertions)]
	fn duplicate_keys_panic_in_debug() {
		let mut cache = KeyedElementCache::<u32>::new();
		reconcile(&[], &[item(1, "a"), item(1, "b")], &mut cache);
	}
}
