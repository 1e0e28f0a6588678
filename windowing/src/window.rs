use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use crate::end_reached::EndReachedGate;
use crate::range::{self, sanitize_scroll_offset};
use crate::{
    Align, FrameState, InitialOffset, ItemAnchor, OffsetIndex, ScrollDirection, ScrollPhase,
    ScrollState, ViewportState, VisibleRange, WindowItem, WindowOptions,
};

/// The stateful half of the engine: viewport state plus the current [`OffsetIndex`].
///
/// This type is UI-agnostic:
/// - It holds no items and no UI objects, only their offsets.
/// - Your adapter drives it with scroll events, resizes and loading state.
/// - Rendering reads the overscanned range through `range()` / `for_each_item`.
///
/// One window owns one viewport state; windows never share anything.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    index: OffsetIndex,
    container_extent: f64,
    scroll_offset: f64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,
    is_loading: bool,
    end_reached: EndReachedGate,

    batch_depth: usize,
    last_observed: Option<Observed>,
}

/// What a renderer can see. `on_change` fires only when this differs from its last delivery.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Observed {
    range: VisibleRange,
    scroll_offset: f64,
    container_extent: f64,
    total_extent: f64,
    is_scrolling: bool,
    is_loading: bool,
}

impl Window {
    /// Creates an empty window (no items) from options.
    ///
    /// `options.container_extent` and `options.initial_offset` are applied immediately.
    pub fn new(options: WindowOptions) -> Self {
        Self::with_index(options, OffsetIndex::empty())
    }

    pub fn with_index(options: WindowOptions, index: OffsetIndex) -> Self {
        let container_extent = sanitize_extent(options.container_extent);
        let scroll_offset = sanitize_scroll_offset(options.initial_offset.resolve());
        wdebug!(
            count = index.len(),
            container_extent,
            overscan = options.overscan,
            "Window::new"
        );
        Self {
            options,
            index,
            container_extent,
            scroll_offset,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            is_loading: false,
            end_reached: EndReachedGate::new(),
            batch_depth: 0,
            last_observed: None,
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Viewport geometry and scroll position are kept: `container_extent` and `initial_offset`
    /// are only sampled by `Window::new`.
    pub fn set_options(&mut self, options: WindowOptions) {
        let same_callback = match (&self.options.on_change, &options.on_change) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same_callback {
            self.last_observed = None;
        }
        self.options = options;
        wtrace!(
            overscan = self.options.overscan,
            threshold = self.options.end_reached_threshold,
            "Window::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Window, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        // A new callback starts from the current state.
        self.last_observed = None;
        self.notify();
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) {
        self.options.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
    }

    pub fn set_end_reached_threshold(&mut self, threshold: f64) {
        self.options.end_reached_threshold = threshold;
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_initial_offset(&mut self, initial_offset: f64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
    }

    fn observed(&self) -> Observed {
        Observed {
            range: self.range(),
            scroll_offset: self.scroll_offset,
            container_extent: self.container_extent,
            total_extent: self.total_extent(),
            is_scrolling: self.is_scrolling,
            is_loading: self.is_loading,
        }
    }

    fn notify(&mut self) {
        if self.batch_depth == 0 {
            self.deliver_change();
        }
    }

    fn deliver_change(&mut self) {
        let Some(cb) = self.options.on_change.clone() else {
            return;
        };
        let observed = self.observed();
        if self.last_observed == Some(observed) {
            return;
        }
        self.last_observed = Some(observed);
        cb(self, self.is_scrolling);
    }

    /// Applies several updates, then calls `on_change` at most once.
    ///
    /// Nothing is delivered if the updates cancel out (same range, offset, extent and flags as
    /// the last delivery).
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.deliver_change();
        }
    }

    pub fn offset_index(&self) -> &OffsetIndex {
        &self.index
    }

    /// Replaces the offset index wholesale (after the items or the height rule changed).
    ///
    /// The scroll offset is left alone; if the list shrank below it, range queries clamp to the
    /// last item until the next scroll event.
    pub fn set_offset_index(&mut self, index: OffsetIndex) {
        if index.len() != self.index.len() {
            self.end_reached.rearm();
        }
        wdebug!(
            prev = self.index.len(),
            count = index.len(),
            total = index.total_extent(),
            "set_offset_index"
        );
        self.index = index;
        self.notify();
    }

    pub fn total_items(&self) -> usize {
        self.index.len()
    }

    pub fn total_extent(&self) -> f64 {
        self.index.total_extent()
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn phase(&self) -> ScrollPhase {
        if self.is_scrolling {
            ScrollPhase::Scrolling
        } else {
            ScrollPhase::Idle
        }
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Returns to idle once `is_scrolling_reset_delay_ms` elapsed since the last scroll event.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sets the caller-driven loading state. `on_end_reached` never fires while loading.
    pub fn set_is_loading(&mut self, is_loading: bool) {
        if self.is_loading == is_loading {
            return;
        }
        self.is_loading = is_loading;
        self.notify();
    }

    pub fn container_extent(&self) -> f64 {
        self.container_extent
    }

    /// Updates the viewport size, e.g. after a resize.
    pub fn set_container_extent(&mut self, extent: f64) {
        let extent = sanitize_extent(extent);
        if self.container_extent == extent {
            return;
        }
        self.container_extent = extent;
        self.notify();
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = sanitize_scroll_offset(offset);
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.partial_cmp(&prev) {
            Some(cmp::Ordering::Greater) => Some(ScrollDirection::Forward),
            Some(cmp::Ordering::Less) => Some(ScrollDirection::Backward),
            _ => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: f64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll notification from the UI layer.
    ///
    /// Updates the position synchronously, marks the window as scrolling and evaluates the
    /// end-reached threshold. Returns `true` if `on_end_reached` fired.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) -> bool {
        wtrace!(offset, now_ms, "on_scroll");
        let mut fired = false;
        self.batch_update(|w| {
            w.set_scroll_offset(offset);
            w.notify_scroll_event(now_ms);
            fired = w.check_end_reached();
        });
        fired
    }

    /// Remaining distance between the viewport's trailing edge and the end of the list.
    pub fn remaining_extent(&self) -> f64 {
        self.total_extent() - self.scroll_offset - self.container_extent
    }

    /// Evaluates the end-reached threshold against the current state.
    ///
    /// `on_scroll` calls this for you; call it directly after mount or after loading finishes
    /// if the list may already be shorter than the threshold. Returns `true` if the callback
    /// fired.
    pub fn check_end_reached(&mut self) -> bool {
        let Some(cb) = self.options.on_end_reached.clone() else {
            return false;
        };
        if self.index.is_empty() {
            return false;
        }
        let remaining = self.remaining_extent();
        let threshold = self.options.end_reached_threshold;
        if !self.end_reached.observe(remaining, threshold, self.is_loading) {
            return false;
        }
        wdebug!(remaining, threshold, count = self.index.len(), "end reached");
        cb();
        true
    }

    /// Whether the next crossing of the end-reached threshold will fire the callback.
    pub fn is_end_reached_armed(&self) -> bool {
        self.end_reached.is_armed()
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_extent() - self.container_extent).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        sanitize_scroll_offset(offset).min(self.max_scroll_offset())
    }

    /// Computes the (clamped) offset that brings `index` into view with `align`.
    ///
    /// Returns `None` for an out-of-range index.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<f64> {
        let item = self.item(index)?;
        let view = self.container_extent;

        let target = match align {
            Align::Start => item.offset,
            Align::End => item.end() - view,
            Align::Center => item.offset + item.height / 2.0 - view / 2.0,
            Align::Auto => {
                let cur = self.clamp_scroll_offset(self.scroll_offset);
                let cur_end = cur + view;
                if item.offset >= cur && item.end() <= cur_end {
                    cur
                } else if item.offset < cur || item.height > view {
                    item.offset
                } else {
                    item.end() - view
                }
            }
        };

        Some(self.clamp_scroll_offset(target))
    }

    /// Programmatically scrolls to an index (no animation).
    ///
    /// Out-of-range indexes are ignored (they are usually stale after the list shrank) and
    /// return `None`. Otherwise returns the applied offset. This does not mark the window as
    /// scrolling, but it does evaluate the end-reached threshold.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f64> {
        let Some(offset) = self.scroll_to_index_offset(index, align) else {
            wwarn!(
                index,
                count = self.index.len(),
                "scroll_to_index: index out of range"
            );
            return None;
        };
        self.batch_update(|w| {
            w.set_scroll_offset(offset);
            w.check_end_reached();
        });
        Some(offset)
    }

    /// Scrolls to an absolute offset, clamped to the scrollable range. Returns the applied offset.
    pub fn scroll_to_offset(&mut self, offset: f64) -> f64 {
        let offset = self.clamp_scroll_offset(offset);
        self.batch_update(|w| {
            w.set_scroll_offset(offset);
            w.check_end_reached();
        });
        offset
    }

    /// The materialized range (visible range plus overscan).
    pub fn range(&self) -> VisibleRange {
        self.range_for(self.scroll_offset, self.container_extent)
    }

    pub fn range_for(&self, scroll_offset: f64, container_extent: f64) -> VisibleRange {
        range::resolve_range(
            &self.index,
            scroll_offset,
            container_extent,
            self.options.overscan,
        )
    }

    /// The strictly visible range (no overscan).
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.scroll_offset, self.container_extent)
    }

    pub fn visible_range_for(&self, scroll_offset: f64, container_extent: f64) -> VisibleRange {
        range::visible_range(&self.index, scroll_offset, container_extent)
    }

    /// First materialized index.
    pub fn start_index(&self) -> Option<usize> {
        self.range().inclusive().map(|(start, _)| start)
    }

    /// Last materialized index (inclusive).
    pub fn end_index(&self) -> Option<usize> {
        self.range().last_index()
    }

    pub fn item(&self, index: usize) -> Option<WindowItem> {
        Some(WindowItem {
            index,
            offset: self.index.offset(index)?,
            height: self.index.height(index)?,
        })
    }

    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        self.index.index_at_or_before(offset)
    }

    pub fn item_at_offset(&self, offset: f64) -> Option<WindowItem> {
        self.item(self.index_at_offset(offset)?)
    }

    pub fn for_each_item(&self, f: impl FnMut(WindowItem)) {
        self.for_each_item_for(self.scroll_offset, self.container_extent, f);
    }

    pub fn for_each_item_for(
        &self,
        scroll_offset: f64,
        container_extent: f64,
        mut f: impl FnMut(WindowItem),
    ) {
        for i in self.range_for(scroll_offset, container_extent).iter() {
            if let Some(item) = self.item(i) {
                f(item);
            }
        }
    }

    /// Collects the materialized items into `out` (clears `out` first).
    ///
    /// Prefer `for_each_item` with a reused scratch buffer in hot paths.
    pub fn collect_items(&self, out: &mut Vec<WindowItem>) {
        out.clear();
        self.for_each_item(|it| out.push(it));
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            container_extent: self.container_extent,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            anchor: self.anchor(),
            is_scrolling: self.is_scrolling,
        }
    }

    /// The item under the viewport's leading edge and how far past its start the edge sits.
    pub fn anchor(&self) -> Option<ItemAnchor> {
        let index = self.index.index_at_or_before(self.scroll_offset)?;
        let offset = self.index.offset(index)?;
        Some(ItemAnchor {
            index,
            delta: self.scroll_offset - offset,
        })
    }

    /// Resolves `anchor` against the current index, or `None` if its item no longer exists.
    ///
    /// The delta is kept within the item, which may have shrunk since the anchor was taken.
    pub fn anchor_offset(&self, anchor: ItemAnchor) -> Option<f64> {
        let offset = self.index.offset(anchor.index)?;
        let height = self.index.height(anchor.index)?;
        Some(offset + anchor.delta.max(0.0).min(height))
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.set_container_extent(viewport.container_extent);
    }

    /// Restores scroll state from a previously captured snapshot.
    ///
    /// The anchor wins over the raw offset while its item exists, so a snapshot taken before a
    /// rebuild lands on the same item. Otherwise the raw offset is clamped to the current list.
    /// When `scroll.is_scrolling` is `true`, this behaves like a scroll event at `now_ms`.
    pub fn restore_scroll_state(&mut self, scroll: ScrollState, now_ms: u64) {
        let offset = scroll
            .anchor
            .and_then(|anchor| self.anchor_offset(anchor))
            .unwrap_or(scroll.offset);
        self.batch_update(|w| {
            w.set_scroll_offset_clamped(offset);
            if scroll.is_scrolling {
                w.notify_scroll_event(now_ms);
            } else {
                w.set_is_scrolling(false);
            }
        });
    }

    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        self.batch_update(|w| {
            w.restore_viewport_state(frame.viewport);
            w.restore_scroll_state(frame.scroll, now_ms);
        });
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}
