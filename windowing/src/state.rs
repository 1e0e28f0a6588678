//! Snapshots of a [`Window`](crate::Window) that callers can persist and hand back later.
//!
//! With `feature = "serde"`, every type here implements `Serialize`/`Deserialize`.

/// Viewport geometry at capture time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub container_extent: f64,
}

/// The viewport's leading edge, expressed as `delta` past the start of item `index`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemAnchor {
    pub index: usize,
    pub delta: f64,
}

/// Scroll position at capture time.
///
/// `offset` is the raw position. `anchor` is the same position relative to the item under the
/// leading edge; it still points at that item after a rebuild changed the heights above it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: f64,
    pub anchor: Option<ItemAnchor>,
    pub is_scrolling: bool,
}

/// Viewport + scroll state.
///
/// The window never persists this itself. Callers that keep a scroll position across remounts
/// capture it here and pass it to `Window::restore_frame_state` (or an
/// `InitialOffset::Provider`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
