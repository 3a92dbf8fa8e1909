//! Keyed list reconciliation, side by side with the clear-and-rebuild approach it improves on.
//!
//! An [`ItemList`](`item_list::ItemList`) is the source of truth. A [`Renderer`](`mount::Renderer`) makes a
//! [`Surface`](`surface::Surface`) show it:
//!
//! - [`MountDriver`](`mount::MountDriver`) keeps rendered elements in a [`KeyedElementCache`](`element_cache::KeyedElementCache`),
//!   [`reconcile`](`reconcile::reconcile`)s each new list against the previous one by [`Key`](`item::Key`)
//!   and only builds elements for new items.
//! - [`FullRebuild`](`mount::FullRebuild`) discards and rebuilds every element on every change.
//!
//! [`ListDemo`](`demo::ListDemo`) ties one list, one renderer and one surface together behind a single
//! [`dispatch`](`demo::ListDemo::dispatch`) entry point.

#![doc(html_root_url = "https://docs.rs/keyed-dom/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod demo;
pub mod dom;
pub mod element_cache;
pub mod item;
pub mod item_list;
pub mod load;
pub mod mount;
pub mod options;
pub mod reconcile;
pub mod surface;
