//! The ordered source of truth that renderers display.

use crate::item::{Item, ItemId};
use hashbrown::HashSet;
use tracing::{debug, error, instrument, trace};

/// An ordered collection of [`Item`]s with unique, monotonically assigned [`ItemId`]s.
///
/// Insertion order is display order. Operations that wouldn't change anything
/// (blank text, unknown ids, …) are silent no-ops and report so through their return value.
#[derive(Debug, Clone)]
pub struct ItemList {
	items: Vec<Item>,
	next_id: Option<ItemId>,
}
impl Default for ItemList {
	fn default() -> Self {
		Self::new()
	}
}
impl ItemList {
	#[must_use]
	pub fn new() -> Self {
		Self {
			items: Vec::new(),
			next_id: Some(ItemId::FIRST),
		}
	}

	/// Appends a new item with the trimmed `text` and returns its id.
	///
	/// Blank `text` is ignored, as is any `add` after the id space ran out.
	#[instrument(skip(self, text))]
	pub fn add(&mut self, text: &str) -> Option<ItemId> {
		let text = text.trim();
		if text.is_empty() {
			trace!("Ignoring blank item text.");
			return None;
		}

		let id = match self.next_id {
			Some(id) => id,
			None => {
				error!("Item ids are exhausted. Ignoring `add`.");
				return None;
			}
		};
		self.next_id = id.next();

		self.items.push(Item { id, text: text.to_owned() });
		debug!(%id, "Added item.");
		Some(id)
	}

	/// Removes the item with the given `id`, if present.
	#[instrument(skip(self))]
	pub fn delete(&mut self, id: ItemId) -> Option<Item> {
		let index = self.position(id)?;
		debug!("Deleted item.");
		Some(self.items.remove(index))
	}

	/// Removes all items. Ids are not reset.
	#[instrument(skip(self))]
	pub fn clear(&mut self) -> Vec<Item> {
		let removed = std::mem::take(&mut self.items);
		debug!("Cleared {} item(s).", removed.len());
		removed
	}

	/// Moves the items named in `ids` to the front, in that order.
	///
	/// Unnamed items keep their relative order behind them.
	/// Unknown and repeated ids are ignored.
	///
	/// Returns whether the order changed.
	#[instrument(skip(self, ids), fields(ids.len = ids.len()))]
	pub fn reorder(&mut self, ids: &[ItemId]) -> bool {
		let mut seen = HashSet::with_capacity(ids.len());
		let mut reordered = Vec::with_capacity(self.items.len());
		for &id in ids {
			if !seen.insert(id) {
				trace!(%id, "Ignoring repeated id.");
				continue;
			}
			match self.position(id) {
				Some(index) => reordered.push(index),
				None => trace!(%id, "Ignoring unknown id."),
			}
		}
		reordered.extend((0..self.items.len()).filter(|&index| !seen.contains(&self.items[index].id)));

		if reordered.iter().enumerate().all(|(position, &index)| position == index) {
			return false;
		}

		let mut slots: Vec<Option<Item>> = self.items.drain(..).map(Some).collect();
		self.items.extend(reordered.into_iter().filter_map(|index| slots[index].take()));
		debug!("Reordered items.");
		true
	}

	/// Replaces an item's text in place, keeping its id. `text` is trimmed like in [`add`](`ItemList::add`).
	///
	/// Returns `false` if there is no such item, `text` is blank or the text is unchanged.
	#[instrument(skip(self, text))]
	pub fn set_text(&mut self, id: ItemId, text: &str) -> bool {
		let text = text.trim();
		if text.is_empty() {
			trace!("Ignoring blank item text.");
			return false;
		}

		match self.items.iter_mut().find(|item| item.id == id) {
			Some(item) if item.text != text => {
				item.text = text.to_owned();
				debug!("Changed item text.");
				true
			}
			_ => false,
		}
	}

	#[must_use]
	pub fn get(&self, id: ItemId) -> Option<&Item> {
		self.items.iter().find(|item| item.id == id)
	}

	#[must_use]
	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = &Item> {
		self.items.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	fn position(&self, id: ItemId) -> Option<usize> {
		self.items.iter().position(|item| item.id == id)
	}
}
