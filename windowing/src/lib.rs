//! A headless list windowing engine.
//!
//! For the renderer shell that owns items and produces positioned nodes, see the
//! `windowing-view` crate.
//!
//! This crate holds the algorithmic core of rendering a long list inside a fixed-size
//! viewport while only materializing the slice that is on screen:
//!
//! - [`OffsetIndex`]: cumulative offsets and total extent, built in one linear pass from the
//!   items and a [`HeightRule`]. Fixed-height lists need no table at all.
//! - [`visible_range`] / [`resolve_range`]: scroll offset + viewport extent → the range of
//!   indexes to materialize, expanded by overscan. `O(1)` for fixed heights, a binary search
//!   for dynamic ones.
//! - [`Window`]: the viewport state (scroll offset, container extent, scrolling and loading
//!   flags), scroll-to-index, and end-reached detection for infinite scrolling.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport extent along the scroll axis
//! - scroll notifications
//! - the items and how tall each one is
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod end_reached;
mod offsets;
mod options;
mod range;
mod state;
mod types;
mod window;


pub use offsets::{HeightFn, HeightRule, MIN_HEIGHT, OffsetIndex, sanitize_height};
pub use options::{
    DEFAULT_END_REACHED_THRESHOLD, EndReachedCallback, InitialOffset, OnChangeCallback,
    WindowOptions,
};
pub use range::{DEFAULT_OVERSCAN, expand, resolve_range, visible_range};
pub use state::{FrameState, ItemAnchor, ScrollState, ViewportState};
pub use types::{Align, ScrollDirection, ScrollPhase, VisibleRange, WindowItem};
pub use window::Window;
