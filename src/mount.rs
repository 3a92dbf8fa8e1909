//! Renderers that bring a [`Surface`] in line with an item list.
//!
//! [`MountDriver`] reconciles by key and reuses elements across passes.
//! [`FullRebuild`] is the baseline it is contrasted against: It throws away and rebuilds every element on each pass.
//! Both commit exactly once per pass.

use crate::{
	element_cache::KeyedElementCache,
	item::{Item, Key},
	options::Options,
	reconcile::{reconcile, Discard, Reconciliation, Render},
	surface::{Content, Surface},
};
use hashbrown::HashSet;
use tracing::{debug, info, instrument, trace_span, warn};

/// What one render pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
	pub created: usize,
	pub reused: usize,
	pub discarded: usize,
	pub commits: usize,
}
impl core::ops::AddAssign for RenderSummary {
	fn add_assign(&mut self, rhs: Self) {
		self.created += rhs.created;
		self.reused += rhs.reused;
		self.discarded += rhs.discarded;
		self.commits += rhs.commits;
	}
}

/// A strategy for displaying `items` on a surface of type `S`.
pub trait Renderer<S: Surface> {
	/// Makes `surface` show `items`, in order, with a single commit.
	fn render(&mut self, surface: &mut S, items: &[Item]) -> RenderSummary;
}

fn commit<S: Surface>(surface: &mut S, elements: &[S::Element], options: &Options) {
	match (&options.placeholder, elements.is_empty()) {
		(Some(placeholder), true) => surface.commit(Content::Placeholder(placeholder), options.commit_mode),
		_ => surface.commit(Content::Elements(elements), options.commit_mode),
	}
}

/// Keyed renderer: Keeps the elements it built in a [`KeyedElementCache`] and reuses them on later passes.
///
/// After each [`apply`](`MountDriver::apply`), the cache holds exactly the current items' keys
/// and the surface shows exactly the current items, in order.
#[derive(Debug)]
pub struct MountDriver<E> {
	cache: KeyedElementCache<E>,
	previous: Vec<Key>,
	options: Options,
}
impl<E> Default for MountDriver<E> {
	fn default() -> Self {
		Self::new(Options::default())
	}
}
impl<E> MountDriver<E> {
	#[must_use]
	pub fn new(options: Options) -> Self {
		Self {
			cache: KeyedElementCache::new(),
			previous: Vec::new(),
			options,
		}
	}

	/// Starts from elements that are already on the surface, for example ones loaded from existing markup.
	///
	/// `previous` is the order they are displayed in. Keys in it without a cached element are dropped.
	/// Cached elements whose key is missing from `previous` are treated as mounted too, so the next pass discards them unless they are reused.
	#[must_use]
	pub fn with_mounted(cache: KeyedElementCache<E>, mut previous: Vec<Key>, options: Options) -> Self {
		let mounted = previous.len();
		previous.retain(|key| cache.contains_key(key.as_str()));
		if previous.len() != mounted {
			warn!("Dropped {} mounted key(s) without cached element.", mounted - previous.len());
		}

		let mut seen = HashSet::with_capacity(previous.len());
		previous.retain(|key| seen.insert(key.clone()));
		let unlisted: Vec<Key> = cache.keys().filter(|key| !seen.contains(*key)).cloned().collect();
		if !unlisted.is_empty() {
			warn!("{} cached element(s) weren't listed as mounted. Appending them.", unlisted.len());
			previous.extend(unlisted);
		}

		debug_assert_eq!(cache.len(), previous.len());
		Self { cache, previous, options }
	}

	#[must_use]
	pub fn cache(&self) -> &KeyedElementCache<E> {
		&self.cache
	}

	/// The key order committed by the last pass.
	#[must_use]
	pub fn mounted_keys(&self) -> &[Key] {
		&self.previous
	}

	/// Reconciles `items` against the previous pass without touching any surface.
	///
	/// Discarded elements are evicted from the cache right away, so the result must be [`apply`](`MountDriver::apply`)ed.
	pub fn reconcile<'a>(&mut self, items: &'a [Item]) -> Reconciliation<'a, E>
	where
		E: Clone,
	{
		reconcile(&self.previous, items, &mut self.cache)
	}

	/// Carries out `reconciliation` on `surface` with exactly one commit.
	#[instrument(skip(self, surface, reconciliation), fields(renders = reconciliation.renders.len(), discards = reconciliation.discards.len()))]
	pub fn apply<S>(&mut self, surface: &mut S, reconciliation: Reconciliation<'_, E>) -> RenderSummary
	where
		S: Surface<Element = E>,
		E: Clone,
	{
		let Reconciliation { renders, discards } = reconciliation;
		let mut summary = RenderSummary {
			discarded: discards.len(),
			..RenderSummary::default()
		};

		for Discard { key, element } in discards {
			let span = trace_span!("Releasing", %key);
			let _enter = span.enter();
			surface.release(element);
		}

		let mut elements = Vec::with_capacity(renders.len());
		let mut keys = Vec::with_capacity(renders.len());
		for render in renders {
			match render {
				Render::Reuse { key, element } => {
					summary.reused += 1;
					elements.push(element);
					keys.push(key);
				}
				Render::Create { key, item } => {
					let span = trace_span!("Creating", %key);
					let _enter = span.enter();
					#[cfg(feature = "dangerous-logging")]
					tracing::trace!(text = %item.text);

					summary.created += 1;
					if let Some(element) = surface.create(&key, item) {
						self.cache.put(key.clone(), element.clone());
						elements.push(element);
						keys.push(key);
					}
				}
			}
		}

		commit(surface, &elements, &self.options);
		summary.commits += 1;
		self.previous = keys;

		debug_assert_eq!(self.cache.len(), self.previous.len());
		debug!(?summary, "Applied.");
		info!("Element cache length/capacity: {}/{}", self.cache.len(), self.cache.capacity());
		summary
	}
}
impl<S> Renderer<S> for MountDriver<S::Element>
where
	S: Surface,
{
	fn render(&mut self, surface: &mut S, items: &[Item]) -> RenderSummary {
		let reconciliation = self.reconcile(items);
		self.apply(surface, reconciliation)
	}
}

/// Unkeyed baseline renderer: Releases every element it built last time and builds all of them again.
#[derive(Debug)]
pub struct FullRebuild<E> {
	mounted: Vec<E>,
	options: Options,
}
impl<E> Default for FullRebuild<E> {
	fn default() -> Self {
		Self::new(Options::default())
	}
}
impl<E> FullRebuild<E> {
	#[must_use]
	pub fn new(options: Options) -> Self {
		Self { mounted: Vec::new(), options }
	}
}
impl<S> Renderer<S> for FullRebuild<S::Element>
where
	S: Surface,
{
	#[instrument(skip(self, surface, items), fields(items.len = items.len()))]
	fn render(&mut self, surface: &mut S, items: &[Item]) -> RenderSummary {
		let mut summary = RenderSummary {
			discarded: self.mounted.len(),
			..RenderSummary::default()
		};
		for element in self.mounted.drain(..) {
			surface.release(element);
		}

		for item in items {
			summary.created += 1;
			if let Some(element) = surface.create(&item.key(), item) {
				self.mounted.push(element);
			}
		}

		commit(surface, &self.mounted, &self.options);
		summary.commits += 1;

		debug!(?summary, "Rebuilt.");
		summary
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		item::ItemId,
		item_list::ItemList,
		options::CommitMode,
		surface::{ElementId, MemorySurface},
	};

	#[test]
	fn create_failure_leaves_no_trace() {
		struct Failing;
		impl Surface for Failing {
			type Element = ();
			fn create(&mut self, _: &Key, _: &Item) -> Option<()> {
				None
			}
			fn release(&mut self, (): ()) {
				unreachable!()
			}
			fn commit(&mut self, _: Content<'_, ()>, _: CommitMode) {}
		}

		let mut list = ItemList::new();
		list.add("a");
		let mut driver = MountDriver::<()>::default();
		let summary = driver.render(&mut Failing, list.items());
		assert_eq!(summary.created, 1);
		assert!(driver.cache().is_empty());
		assert!(driver.mounted_keys().is_empty());
	}

	#[test]
	fn unlisted_cached_elements_are_discarded() {
		let mut surface = MemorySurface::new();
		let mut list = ItemList::new();
		list.add("a");
		list.add("b");
		let elements: Vec<ElementId> = list.iter().map(|item| surface.create(&item.key(), item).unwrap()).collect();
		surface.commit(Content::Elements(&elements), CommitMode::Batched);
		let cache: KeyedElementCache<ElementId> = list.iter().map(Item::key).zip(elements).collect();

		let first = list.items()[0].key();
		let mut driver = MountDriver::with_mounted(cache, vec![first.clone()], Options::default());
		assert_eq!(driver.mounted_keys().len(), 2);

		let second = list.items()[1].id;
		list.delete(second);
		let summary = driver.render(&mut surface, list.items());
		assert_eq!(summary.discarded, 1);
		assert_eq!(summary.reused, 1);
		assert_eq!(driver.cache().key_set(), [&first].into_iter().collect::<HashSet<_>>());
		assert_eq!(driver.mounted_keys(), [first]);
		assert_eq!(surface.visible_keys(), ["item-1"]);
		assert_eq!(surface.live_count(), 1);
	}

	#[test]
	fn mounted_keys_without_element_are_dropped() {
		let driver = MountDriver::<ElementId>::with_mounted(KeyedElementCache::new(), vec![ItemId::FIRST.key()], Options::default());
		assert!(driver.mounted_keys().is_empty());
	}

	#[test]
	fn placeholder_only_when_empty() {
		let mut surface = MemorySurface::new();
		let mut driver = MountDriver::<ElementId>::new(Options::new().with_placeholder("nothing"));
		let mut list = ItemList::new();

		driver.render(&mut surface, list.items());
		assert_eq!(surface.placeholder(), Some("nothing"));

		list.add("a");
		driver.render(&mut surface, list.items());
		assert_eq!(surface.placeholder(), None);
		assert_eq!(surface.visible_keys(), ["item-1"]);
	}

	#[test]
	fn no_placeholder_configured() {
		let mut surface = MemorySurface::new();
		let mut rebuild = FullRebuild::<ElementId>::new(Options::new().without_placeholder());
		rebuild.render(&mut surface, &[]);
		assert_eq!(surface.placeholder(), None);
		assert_eq!(surface.stats().commits, 1);
	}
}
