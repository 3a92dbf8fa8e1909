//! Picks up keyed elements that are already present in a container, for example from server-rendered markup.

use crate::{dom::KEY_ATTRIBUTE, element_cache::KeyedElementCache, item::Key};
use tracing::{instrument, trace, warn};

/// Collects the keyed child elements of `container`, in display order.
///
/// Children without a [`KEY_ATTRIBUTE`], with a key that doesn't name an item, or with a repeated key are left out.
/// Pass the result to [`MountDriver::with_mounted`](`crate::mount::MountDriver::with_mounted`) to reuse them.
#[must_use]
#[instrument]
pub fn load_keyed_children(container: &web_sys::Element) -> (KeyedElementCache<web_sys::Element>, Vec<Key>) {
	let children = container.children();
	let mut cache = KeyedElementCache::new();
	let mut order = Vec::with_capacity(children.length() as usize);
	for i in 0..children.length() {
		let Some(child) = children.item(i) else { continue };
		let Some(key) = child.get_attribute(KEY_ATTRIBUTE) else {
			trace!("Skipping unkeyed child {}.", i);
			continue;
		};
		let Some(key) = Key::item_id(&key).map(Key::from) else {
			warn!("Skipping child with unrecognised key {:?}.", key);
			continue;
		};
		if cache.contains_key(key.as_str()) {
			warn!(%key, "Skipping child with repeated key.");
			continue;
		}
		cache.put(key.clone(), child);
		order.push(key);
	}
	trace!("Loaded {} keyed element(s).", order.len());
	(cache, order)
}
