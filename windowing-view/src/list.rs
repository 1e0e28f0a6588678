use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use windowing::{Align, HeightRule, OffsetIndex, VisibleRange, Window, WindowOptions};

use crate::{Body, Easing, Frame, Positioned, Region, ScrollAnimation};

/// Renders one item: `(item, index) -> node`.
pub type RenderItem<T, N> = Arc<dyn Fn(&T, usize) -> N + Send + Sync>;

/// Extracts an item's key: `(item, index) -> key`. Keys must be unique within one render.
pub type KeyExtractor<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Produces caller-supplied content that is not an item (empty state, loading, header, footer).
pub type RenderSlot<N> = Arc<dyn Fn() -> N + Send + Sync>;

/// A windowed list: owns the items, the strategies that describe them, and a [`Window`].
///
/// Rendering only reads state (`&self`), so a panic from `render_item` or `key_extractor`
/// propagates to the caller without touching the scroll position or the offset index.
///
/// The node type `N` is whatever the host draws with; it is opaque here.
pub struct WindowedList<T, N> {
    items: Arc<[T]>,
    height_rule: HeightRule<T>,
    render_item: RenderItem<T, N>,
    key_extractor: KeyExtractor<T>,
    empty: Option<RenderSlot<N>>,
    loading: Option<RenderSlot<N>>,
    header: Option<RenderSlot<N>>,
    footer: Option<RenderSlot<N>>,
    window: Window,
    animation: Option<ScrollAnimation>,
}

impl<T, N> WindowedList<T, N> {
    /// Builds the offset index for `items` right away; a panicking height rule panics here.
    ///
    /// The viewport size and overscan come from `options` (see [`WindowOptions::new`]).
    pub fn new(
        items: impl Into<Arc<[T]>>,
        height_rule: HeightRule<T>,
        render_item: impl Fn(&T, usize) -> N + Send + Sync + 'static,
        key_extractor: impl Fn(&T, usize) -> String + Send + Sync + 'static,
        options: WindowOptions,
    ) -> Self {
        let items = items.into();
        let index = build_index(&items, &height_rule);
        Self {
            items,
            height_rule,
            render_item: Arc::new(render_item),
            key_extractor: Arc::new(key_extractor),
            empty: None,
            loading: None,
            header: None,
            footer: None,
            window: Window::with_index(options, index),
            animation: None,
        }
    }

    pub fn with_empty(mut self, empty: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.empty = Some(Arc::new(empty));
        self
    }

    pub fn with_loading(mut self, loading: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.loading = Some(Arc::new(loading));
        self
    }

    pub fn with_header(mut self, header: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.header = Some(Arc::new(header));
        self
    }

    pub fn with_footer(mut self, footer: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.footer = Some(Arc::new(footer));
        self
    }

    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    pub fn height_rule(&self) -> &HeightRule<T> {
        &self.height_rule
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Direct access to the window, e.g. to install `on_change` or tweak options.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Replaces the items. The offset index is rebuilt only if `items` is a different
    /// allocation than the current one; returns `true` if it was rebuilt.
    ///
    /// Keep the same `Arc` across renders when nothing changed to avoid the `O(n)` rebuild.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) -> bool {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return false;
        }
        self.items = items;
        self.rebuild();
        true
    }

    /// Replaces the height rule; returns `true` if the offset index was rebuilt.
    pub fn set_height_rule(&mut self, height_rule: HeightRule<T>) -> bool {
        if self.height_rule.same_as(&height_rule) {
            return false;
        }
        self.height_rule = height_rule;
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        let index = build_index(&self.items, &self.height_rule);
        wtrace!(count = index.len(), "WindowedList::rebuild");
        self.window.set_offset_index(index);
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.window.set_is_loading(is_loading);
    }

    pub fn is_loading(&self) -> bool {
        self.window.is_loading()
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) {
        self.window.set_on_end_reached(on_end_reached);
    }

    /// Re-evaluates the end-reached threshold without a scroll event.
    ///
    /// Call after mounting a list that may not fill the viewport, or after loading finishes
    /// (`set_loading(false)`) while the viewport is still near the end. Returns `true` if
    /// `on_end_reached` fired.
    pub fn check_end_reached(&mut self) -> bool {
        self.window.check_end_reached()
    }

    /// Call this when the host reports a scroll (wheel, drag, scrollbar).
    ///
    /// Cancels any running animation. Returns `true` if `on_end_reached` fired.
    pub fn on_scroll(&mut self, scroll_offset: f64, now_ms: u64) -> bool {
        self.cancel_animation();
        self.window.on_scroll(scroll_offset, now_ms)
    }

    /// Call this when the viewport is resized.
    pub fn on_resize(&mut self, container_extent: f64) {
        self.window.set_container_extent(container_extent);
    }

    /// Scrolls to `index` immediately. Out-of-range indexes are ignored and return `None`.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f64> {
        self.cancel_animation();
        self.window.scroll_to_index(index, align)
    }

    /// Starts an animated scroll to `index`, driven by [`Self::tick`].
    ///
    /// Calling this again before the previous animation settles replaces it; the new one
    /// departs from the current scroll offset. Returns the target offset as of now, or `None`
    /// (leaving any running animation untouched) for an out-of-range index.
    pub fn scroll_to_index_animated(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<f64> {
        let to = self.window.scroll_to_index_offset(index, align)?;
        let from = self.window.scroll_offset();
        wtrace!(index, from, to, duration_ms, "WindowedList::scroll_to_index_animated");
        self.animation = Some(ScrollAnimation::new(
            from,
            index,
            align,
            now_ms,
            duration_ms,
            easing,
        ));
        Some(to)
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Advances the list.
    ///
    /// - If an animation is running, scrolls to its next offset and returns it. The animation
    ///   ends (and the window goes idle) once it lands, or early if its item disappeared.
    /// - Otherwise, runs the idle debounce and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let Some(animation) = self.animation else {
            self.window.update_scrolling(now_ms);
            return None;
        };

        let Some(offset) = animation.offset_at(&self.window, now_ms) else {
            wwarn!(
                index = animation.index(),
                count = self.items.len(),
                "WindowedList::tick: animation target is gone"
            );
            self.animation = None;
            self.window.set_is_scrolling(false);
            return None;
        };
        self.window.on_scroll(offset, now_ms);

        if animation.is_finished(now_ms) {
            self.animation = None;
            self.window.set_is_scrolling(false);
        }
        Some(self.window.scroll_offset())
    }

    pub fn range(&self) -> VisibleRange {
        self.window.range()
    }

    pub fn start_index(&self) -> Option<usize> {
        self.window.start_index()
    }

    pub fn end_index(&self) -> Option<usize> {
        self.window.end_index()
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Renders the current state.
    ///
    /// Only items in the materialized range are passed to `render_item` / `key_extractor`.
    pub fn render(&self) -> Frame<N> {
        let header = self.header.as_ref().map(|f| f());
        let body = match &self.empty {
            Some(empty) if self.items.is_empty() && !self.window.is_loading() => {
                Body::Empty(empty())
            }
            _ => Body::Region(self.render_region()),
        };
        let footer = self.footer.as_ref().map(|f| f());
        Frame {
            header,
            body,
            footer,
        }
    }

    fn render_region(&self) -> Region<N> {
        let range = self.window.range();
        let mut items = Vec::with_capacity(range.len());
        self.window.for_each_item(|it| {
            let Some(item) = self.items.get(it.index) else {
                return;
            };
            items.push(Positioned {
                key: (self.key_extractor)(item, it.index),
                index: it.index,
                offset: it.offset,
                height: it.height,
                node: (self.render_item)(item, it.index),
            });
        });

        let duplicate = crate::key::first_duplicate(items.iter().map(|p| &p.key));
        #[cfg(feature = "tracing")]
        if let Some(key) = duplicate {
            wwarn!(key, "WindowedList::render: duplicate item key");
        }
        debug_assert!(
            duplicate.is_none(),
            "WindowedList::render: duplicate item key {duplicate:?}"
        );

        let loading = if self.window.is_loading() {
            self.loading.as_ref().map(|f| f())
        } else {
            None
        };

        Region {
            container_extent: self.window.container_extent(),
            total_extent: self.window.total_extent(),
            scroll_offset: self.window.scroll_offset(),
            items,
            loading,
        }
    }
}

fn build_index<T>(items: &[T], height_rule: &HeightRule<T>) -> OffsetIndex {
    if items.is_empty() {
        return OffsetIndex::empty();
    }
    OffsetIndex::build(items, height_rule)
}

impl<T, N> fmt::Debug for WindowedList<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedList")
            .field("items", &self.items.len())
            .field("height_rule", &self.height_rule)
            .field("window", &self.window)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}
