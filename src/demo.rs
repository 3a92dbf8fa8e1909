//! The interactive list: an owned context object that turns user intents into render passes.

use crate::{
	item::{ItemId, Key},
	item_list::ItemList,
	mount::{RenderSummary, Renderer},
	surface::Surface,
};
use tracing::{debug, instrument, trace};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
	/// The text input changed. Only updates the draft, nothing is rendered.
	Input(String),
	/// Adds the current draft as an item and clears the draft.
	Submit,
	Add(String),
	Delete(ItemId),
	Clear,
	/// See [`ItemList::reorder`].
	Reorder(Vec<ItemId>),
	/// Changes an item's text without changing its identity.
	Edit(ItemId, String),
}

/// A text input whose displayed value is always the one stored here.
///
/// The value is written on every input event and read back from here on submit,
/// rather than being read ad hoc from the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlledInput {
	value: String,
}
impl ControlledInput {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn set(&mut self, value: impl Into<String>) {
		self.value = value.into();
	}

	/// Takes the current value, leaving the input empty.
	pub fn take(&mut self) -> String {
		std::mem::take(&mut self.value)
	}
}

/// The single dispatch point for clicks inside the list.
///
/// Instead of one listener per element, a clicked element's key is routed back to the item it was rendered for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;
impl Dispatcher {
	/// Resolves a click on the element with `target_key` into a [`Intent::Delete`].
	///
	/// Keys that weren't produced by this crate resolve to [`None`].
	#[must_use]
	pub fn route(self, target_key: &str) -> Option<Intent> {
		let intent = Key::item_id(target_key).map(Intent::Delete);
		trace!(target_key, ?intent, "Routed click.");
		intent
	}
}

/// Holds one list's complete state: items, the draft input, the renderer and the surface it renders to.
///
/// Every mutating [`Intent`] renders exactly once. Intents that don't change anything render nothing.
#[derive(Debug)]
pub struct ListDemo<S, R> {
	items: ItemList,
	input: ControlledInput,
	renderer: R,
	surface: S,
	render_count: usize,
	totals: RenderSummary,
}
impl<S, R> ListDemo<S, R>
where
	S: Surface,
	R: Renderer<S>,
{
	/// Takes over `surface` and renders the (empty) initial state to it.
	pub fn new(surface: S, renderer: R) -> Self {
		let mut demo = Self {
			items: ItemList::new(),
			input: ControlledInput::new(),
			renderer,
			surface,
			render_count: 0,
			totals: RenderSummary::default(),
		};
		demo.render();
		demo
	}

	/// Applies `intent` and returns what the resulting render pass did, or [`None`] if nothing changed.
	#[cfg_attr(feature = "dangerous-logging", instrument(skip(self)))]
	#[cfg_attr(not(feature = "dangerous-logging"), instrument(skip(self, intent)))]
	pub fn dispatch(&mut self, intent: Intent) -> Option<RenderSummary> {
		let changed = match intent {
			Intent::Input(value) => {
				self.input.set(value);
				false
			}
			Intent::Submit => {
				// A rejected draft stays in the input.
				let added = self.items.add(self.input.value()).is_some();
				if added {
					self.input.take();
				}
				added
			}
			Intent::Add(text) => self.items.add(&text).is_some(),
			Intent::Delete(id) => self.items.delete(id).is_some(),
			Intent::Clear => !self.items.clear().is_empty(),
			Intent::Reorder(ids) => self.items.reorder(&ids),
			Intent::Edit(id, text) => self.items.set_text(id, &text),
		};

		if changed {
			Some(self.render())
		} else {
			debug!("Nothing changed. Skipping render.");
			None
		}
	}

	/// Routes a click on the element with `target_key` through the [`Dispatcher`].
	pub fn click(&mut self, target_key: &str) -> Option<RenderSummary> {
		let intent = Dispatcher.route(target_key)?;
		self.dispatch(intent)
	}

	fn render(&mut self) -> RenderSummary {
		let summary = self.renderer.render(&mut self.surface, self.items.items());
		self.render_count += 1;
		self.totals += summary;
		summary
	}

	#[must_use]
	pub fn items(&self) -> &ItemList {
		&self.items
	}

	#[must_use]
	pub fn input(&self) -> &ControlledInput {
		&self.input
	}

	#[must_use]
	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	#[must_use]
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Number of render passes so far, including the initial one.
	#[must_use]
	pub fn render_count(&self) -> usize {
		self.render_count
	}

	/// Sum of all render passes so far.
	#[must_use]
	pub fn totals(&self) -> RenderSummary {
		self.totals
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		mount::MountDriver,
		surface::{ElementId, MemorySurface},
	};

	fn demo() -> ListDemo<MemorySurface, MountDriver<ElementId>> {
		ListDemo::new(MemorySurface::new(), MountDriver::default())
	}

	#[test]
	fn controlled_submit() {
		let mut demo = demo();
		assert_eq!(demo.dispatch(Intent::Input("  milk ".to_owned())), None);
		assert_eq!(demo.input().value(), "  milk ");

		let summary = demo.dispatch(Intent::Submit).unwrap();
		assert_eq!(summary.created, 1);
		assert_eq!(demo.input().value(), "");
		assert_eq!(demo.surface().visible_texts(), ["milk"]);

		assert_eq!(demo.dispatch(Intent::Submit), None);
	}

	#[test]
	fn blank_submit_keeps_draft() {
		let mut demo = demo();
		demo.dispatch(Intent::Input("   ".to_owned()));
		assert_eq!(demo.dispatch(Intent::Submit), None);
		assert_eq!(demo.input().value(), "   ");
		assert_eq!(demo.render_count(), 1);
		assert!(demo.items().is_empty());
	}

	#[test]
	fn no_ops_do_not_render() {
		let mut demo = demo();
		assert_eq!(demo.render_count(), 1);
		assert_eq!(demo.dispatch(Intent::Add("   ".to_owned())), None);
		assert_eq!(demo.dispatch(Intent::Delete(ItemId::FIRST)), None);
		assert_eq!(demo.dispatch(Intent::Clear), None);
		assert_eq!(demo.dispatch(Intent::Reorder(vec![ItemId::FIRST])), None);
		assert_eq!(demo.dispatch(Intent::Edit(ItemId::FIRST, "x".to_owned())), None);
		assert_eq!(demo.render_count(), 1);
		assert_eq!(demo.surface().stats().commits, 1);
	}

	#[test]
	fn delegated_delete() {
		let mut demo = demo();
		demo.dispatch(Intent::Add("a".to_owned()));
		demo.dispatch(Intent::Add("b".to_owned()));

		let target = demo.surface().click("item-1").cloned().unwrap();
		let summary = demo.click(target.as_str()).unwrap();
		assert_eq!((summary.discarded, summary.reused, summary.created), (1, 1, 0));
		assert_eq!(demo.surface().visible_keys(), ["item-2"]);

		assert_eq!(demo.click("not-an-item"), None);
		assert_eq!(Dispatcher.route("item-5"), Some(Intent::Delete(ItemId::new(5).unwrap())));
	}
}
