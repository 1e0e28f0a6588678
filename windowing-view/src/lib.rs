//! A framework-neutral windowed list renderer for the `windowing` crate.
//!
//! The `windowing` crate is UI-agnostic and only deals in offsets and indexes. This crate adds
//! the piece a UI layer actually mounts:
//!
//! - [`WindowedList`]: owns the items, the height rule, and the caller's strategies
//!   (`render_item`, `key_extractor`, empty/loading/header/footer content) and renders a
//!   [`Frame`] of absolutely positioned nodes for the current scroll state.
//! - Animated scroll-to-index that follows its target item, ticked by the adapter
//!   ([`ScrollAnimation`], [`Easing`]).
//!
//! The node type is generic; no UI toolkit bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animation;
mod frame;
mod key;
mod list;

#[cfg(test)]
mod tests;

pub use animation::{Easing, ScrollAnimation};
pub use frame::{Body, Frame, Positioned, Region};
pub use list::{KeyExtractor, RenderItem, RenderSlot, WindowedList};
