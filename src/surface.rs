//! Display targets that renderers commit to.
//!
//! A [`Surface`] builds and releases opaque element handles and shows an ordered list of them.
//! Any target satisfying "after a commit, the visible order is exactly the committed order"
//! works with both renderers. [`MemorySurface`] is a headless implementation that also records
//! how much work each renderer caused; [`DomSurface`](`crate::dom::DomSurface`) renders into a browser DOM.

use crate::{
	item::{Item, Key},
	options::CommitMode,
};
use hashbrown::HashMap;
use tracing::{error, instrument, trace, warn};

/// What a commit shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a, E> {
	/// Exactly these elements, in this order.
	Elements(&'a [E]),
	/// An empty-state text instead of any elements.
	Placeholder(&'a str),
}

pub trait Surface {
	/// A cheap handle to one rendered item.
	type Element: Clone;

	/// Builds a detached element for `item`.
	///
	/// Returns [`None`] if the element could not be built, in which case the item is not displayed.
	fn create(&mut self, key: &Key, item: &Item) -> Option<Self::Element>;

	/// Frees `element`. The handle must not be used afterwards.
	///
	/// A released element that is still visible stays on display until the next [`commit`](`Surface::commit`),
	/// which takes it down along with everything else it replaces.
	fn release(&mut self, element: Self::Element);

	/// Replaces everything visible with `content`.
	///
	/// Each call is one commit, regardless of `mode`.
	fn commit(&mut self, content: Content<'_, Self::Element>, mode: CommitMode);
}

/// Handle to an element of a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

/// Work counters of a [`MemorySurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
	pub commits: usize,
	pub creates: usize,
	pub releases: usize,
	/// Insertions into the visible surface. A batched commit counts once, an incremental one once per element.
	pub layout_flushes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryElement {
	key: Key,
	text: String,
	released: bool,
}

/// A headless [`Surface`] that keeps its elements in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
	elements: HashMap<ElementId, MemoryElement>,
	visible: Vec<ElementId>,
	placeholder: Option<String>,
	next_id: u64,
	stats: SurfaceStats,
}
impl MemorySurface {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn stats(&self) -> SurfaceStats {
		self.stats
	}

	/// Number of elements created and not yet released, visible or not.
	#[must_use]
	pub fn live_count(&self) -> usize {
		self.elements.values().filter(|element| !element.released).count()
	}

	#[must_use]
	pub fn visible(&self) -> &[ElementId] {
		&self.visible
	}

	#[must_use]
	pub fn visible_keys(&self) -> Vec<&str> {
		self.visible.iter().filter_map(|id| self.elements.get(id)).map(|element| element.key.as_str()).collect()
	}

	/// The texts of the visible elements, as they were when each element was built.
	#[must_use]
	pub fn visible_texts(&self) -> Vec<&str> {
		self.visible.iter().filter_map(|id| self.elements.get(id)).map(|element| element.text.as_str()).collect()
	}

	#[must_use]
	pub fn placeholder(&self) -> Option<&str> {
		self.placeholder.as_deref()
	}

	/// Simulates a click on the visible element with the given `key`.
	///
	/// Returns the key as the delegated event target, or [`None`] if nothing visible carries it.
	#[must_use]
	pub fn click(&self, key: &str) -> Option<&Key> {
		self.visible
			.iter()
			.filter_map(|id| self.elements.get(id))
			.map(|element| &element.key)
			.find(|visible_key| visible_key.as_str() == key)
	}
}
impl Surface for MemorySurface {
	type Element = ElementId;

	fn create(&mut self, key: &Key, item: &Item) -> Option<ElementId> {
		let id = ElementId(self.next_id);
		self.next_id += 1;
		self.elements.insert(
			id,
			MemoryElement {
				key: key.clone(),
				text: item.text.clone(),
				released: false,
			},
		);
		self.stats.creates += 1;
		trace!(%key, ?id, "Created element.");
		Some(id)
	}

	fn release(&mut self, element: ElementId) {
		match self.elements.get_mut(&element) {
			Some(MemoryElement { released: true, .. }) => error!(id = ?element, "Tried to release an element twice."),
			Some(MemoryElement { key, released, .. }) => {
				*released = true;
				self.stats.releases += 1;
				trace!(%key, id = ?element, "Released element.");
			}
			None => error!(id = ?element, "Tried to release an unknown element."),
		}
	}

	#[instrument(skip(self, content))]
	fn commit(&mut self, content: Content<'_, ElementId>, mode: CommitMode) {
		self.stats.commits += 1;
		match content {
			Content::Elements(elements) => {
				self.placeholder = None;
				self.visible.clear();
				for &element in elements {
					if !self.elements.get(&element).map_or(false, |element| !element.released) {
						warn!(id = ?element, "Skipping unknown or released element in commit.");
						continue;
					}
					self.visible.push(element);
					if mode == CommitMode::Incremental {
						self.stats.layout_flushes += 1;
					}
				}
				if mode == CommitMode::Batched {
					self.stats.layout_flushes += 1;
				}
			}
			Content::Placeholder(text) => {
				self.visible.clear();
				self.placeholder = Some(text.to_owned());
				self.stats.layout_flushes += 1;
			}
		}
		self.elements.retain(|_, element| !element.released);
		trace!(visible = self.visible.len(), "Committed.");
	}
}
