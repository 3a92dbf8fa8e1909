//! The list's data model: [`Item`]s, their [`ItemId`]s and the [`Key`]s derived from them.

use core::{
	borrow::Borrow,
	fmt::{self, Display, Formatter},
	num::NonZeroU32,
};

/// Prefix of every [`Key`].
pub const KEY_PREFIX: &str = "item-";

/// Identity of an [`Item`] within one [`ItemList`](`crate::item_list::ItemList`).
///
/// Ids start at `1` and are never handed out twice by the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(NonZeroU32);
impl ItemId {
	/// The first id a fresh list assigns.
	pub const FIRST: Self = Self(NonZeroU32::MIN);

	#[must_use]
	pub fn new(id: u32) -> Option<Self> {
		NonZeroU32::new(id).map(Self)
	}

	#[must_use]
	pub fn get(self) -> u32 {
		self.0.get()
	}

	/// The id assigned after this one, or [`None`] once the id space is exhausted.
	#[must_use]
	pub fn next(self) -> Option<Self> {
		self.0.checked_add(1).map(Self)
	}

	#[must_use]
	pub fn key(self) -> Key {
		Key(format!("{}{}", KEY_PREFIX, self.0))
	}
}
impl Display for ItemId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Stable identifier of an item's rendered output: `"item-"` followed by the item's id.
///
/// Keys correlate old and new output across reconciliation passes.
/// They [`Borrow`] as [`str`], so maps keyed by them can be queried with plain string slices,
/// for example an element's `data-key` attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(String);
impl Key {
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Recovers the [`ItemId`] a key was derived from.
	///
	/// Returns [`None`] for strings that aren't of the form `"item-<non-zero integer>"`.
	#[must_use]
	pub fn item_id(key: &str) -> Option<ItemId> {
		let digits = key.strip_prefix(KEY_PREFIX)?;
		// `u32::from_str` accepts a leading `+`, which would make the mapping ambiguous.
		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0') {
			return None;
		}
		digits.parse().ok().and_then(ItemId::new)
	}
}
impl Borrow<str> for Key {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Key {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Key {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
impl From<ItemId> for Key {
	fn from(id: ItemId) -> Self {
		id.key()
	}
}

/// One entry of the list.
///
/// Two items with the same [`ItemId`] are the same logical entity, even if their `text` differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
	pub id: ItemId,
	pub text: String,
}
impl Item {
	#[must_use]
	pub fn key(&self) -> Key {
		self.id.key()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_derivation() {
		let id = ItemId::new(42).unwrap();
		assert_eq!(id.key().as_str(), "item-42");
		assert_eq!(Key::item_id("item-42"), Some(id));
	}

	#[test]
	fn foreign_keys_are_rejected() {
		for key in ["", "item-", "item-0", "item-007", "item-+1", "item-1x", "entry-1", "item-99999999999"] {
			assert_eq!(Key::item_id(key), None, "{:?}", key);
		}
	}

	#[test]
	fn ids_run_out() {
		let last = ItemId::new(u32::MAX).unwrap();
		assert_eq!(last.next(), None);
		assert_eq!(ItemId::FIRST.next(), ItemId::new(2));
	}
}
