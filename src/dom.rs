//! A [`Surface`] that renders into the child nodes of a browser DOM element.
//!
//! Each item becomes
//!
//! ```html
//! <div class="list-item" data-key="item-1"><span>text</span><button class="btn btn-danger">Delete</button></div>
//! ```
//!
//! Clicks on any of the delete buttons are caught by a single listener on the container
//! and queued by key. Drain them with [`DomSurface::take_clicks`] and feed them to
//! [`ListDemo::click`](`crate::demo::ListDemo::click`).

use crate::{
	item::{Item, Key},
	options::CommitMode,
	surface::{Content, Surface},
};
use core::cell::RefCell;
use js_sys::Function;
use std::{collections::VecDeque, rc::Rc};
use tracing::{error, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast};

/// Name of the attribute that carries an element's [`Key`].
pub const KEY_ATTRIBUTE: &str = "data-key";

const ITEM_CLASS: &str = "list-item";
const DELETE_CLASS: &str = "btn btn-danger";
const PLACEHOLDER_CLASS: &str = "list-placeholder";

/// Attached to a container [`web_sys::Element`], this `struct` owns that element's child nodes.
///
/// The delegated click listener is removed again when the [`DomSurface`] is dropped.
#[derive(Debug)]
pub struct DomSurface {
	container: web_sys::Element,
	document: web_sys::Document,
	clicks: Rc<RefCell<VecDeque<String>>>,
	click_handler: Closure<dyn Fn(web_sys::Event)>,
	released: Vec<web_sys::Element>,
	commits: usize,
}
impl DomSurface {
	/// Takes over the child nodes of `container`.
	///
	/// Returns [`None`] if `container` isn't part of a document.
	#[must_use]
	#[instrument]
	pub fn new_for_element_child_nodes(container: web_sys::Element) -> Option<Self> {
		let document = match container.owner_document() {
			Some(document) => document,
			None => {
				error!("No owner document found for the container element.");
				return None;
			}
		};

		let clicks = Rc::new(RefCell::new(VecDeque::new()));
		let click_handler = Closure::wrap(Box::new({
			let clicks = Rc::clone(&clicks);
			move |event: web_sys::Event| {
				let span = trace_span!("Delegated click");
				let _enter = span.enter();
				if let Some(key) = delegated_key(&event) {
					trace!(%key, "Queued click.");
					clicks.borrow_mut().push_back(key);
				}
			}
		}) as Box<dyn Fn(web_sys::Event)>);

		if let Err(error) = container.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref::<Function>()) {
			error!("Failed to add delegated click listener: {:?}", error);
		}

		Some(Self {
			container,
			document,
			clicks,
			click_handler,
			released: Vec::new(),
			commits: 0,
		})
	}

	/// Drains the keys of the items whose delete buttons were clicked, oldest first.
	#[must_use]
	pub fn take_clicks(&self) -> Vec<String> {
		self.clicks.borrow_mut().drain(..).collect()
	}

	#[must_use]
	pub fn commits(&self) -> usize {
		self.commits
	}

	fn build_item(&self, key: &Key, item: &Item) -> Result<web_sys::Element, wasm_bindgen::JsValue> {
		let element = self.document.create_element("div")?;
		element.set_class_name(ITEM_CLASS);
		element.set_attribute(KEY_ATTRIBUTE, key.as_str())?;

		let text = self.document.create_element("span")?;
		text.set_text_content(Some(&item.text));
		element.append_child(&text)?;

		let delete = self.document.create_element("button")?;
		delete.set_class_name(DELETE_CLASS);
		delete.set_text_content(Some("Delete"));
		element.append_child(&delete)?;

		Ok(element)
	}

	fn attach_batched(&self, elements: &[web_sys::Element]) {
		let fragment = self.document.create_document_fragment();
		for element in elements {
			if let Err(error) = fragment.append_child(element) {
				error!("Failed to stage element: {:?}", error);
			}
		}
		if let Err(error) = self.container.append_child(&fragment) {
			error!("Failed to insert staged elements: {:?}", error);
		}
	}

	fn attach_incremental(&self, elements: &[web_sys::Element]) {
		for element in elements {
			if let Err(error) = self.container.append_child(element) {
				error!("Failed to insert element: {:?}", error);
			}
		}
	}
}
impl Surface for DomSurface {
	type Element = web_sys::Element;

	fn create(&mut self, key: &Key, item: &Item) -> Option<web_sys::Element> {
		match self.build_item(key, item) {
			Ok(element) => Some(element),
			Err(error) => {
				error!(%key, "Failed to create element: {:?}", error);
				None
			}
		}
	}

	fn release(&mut self, element: web_sys::Element) {
		// Taken down by the next commit.
		self.released.push(element);
	}

	#[instrument(skip(self, content))]
	fn commit(&mut self, content: Content<'_, web_sys::Element>, mode: CommitMode) {
		self.commits += 1;

		// Detaches reused elements too. They are re-inserted below.
		self.container.set_text_content(None);
		for element in self.released.drain(..) {
			element.remove();
		}

		match content {
			Content::Elements(elements) => match mode {
				CommitMode::Batched => self.attach_batched(elements),
				CommitMode::Incremental => self.attach_incremental(elements),
			},
			Content::Placeholder(text) => match self.document.create_element("div") {
				Ok(placeholder) => {
					placeholder.set_class_name(PLACEHOLDER_CLASS);
					placeholder.set_text_content(Some(text));
					if let Err(error) = self.container.append_child(&placeholder) {
						error!("Failed to insert placeholder: {:?}", error);
					}
				}
				Err(error) => error!("Failed to create placeholder: {:?}", error),
			},
		}

		let child_count = self.container.child_element_count();
		trace!(child_count, "Committed.");
	}
}
impl Drop for DomSurface {
	fn drop(&mut self) {
		if let Err(error) = self
			.container
			.remove_event_listener_with_callback("click", self.click_handler.as_ref().unchecked_ref::<Function>())
		{
			warn!("Failed to remove delegated click listener: {:?}", error);
		}
	}
}

/// Finds the key of the item whose delete button was the target of `event`, if any.
fn delegated_key(event: &web_sys::Event) -> Option<String> {
	let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
	let button = target.closest("button").ok()??;
	let item = button.closest(&format!("[{}]", KEY_ATTRIBUTE)).ok()??;
	item.get_attribute(KEY_ATTRIBUTE)
}
