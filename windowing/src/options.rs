use alloc::sync::Arc;

use crate::range::DEFAULT_OVERSCAN;
use crate::window::Window;

/// A callback fired when the window's state changes.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&Window, bool) + Send + Sync>;

/// A callback fired when the remaining distance to the end of the list drops below the
/// configured threshold.
pub type EndReachedCallback = Arc<dyn Fn() + Send + Sync>;

/// Default remaining distance (in list units) below which `on_end_reached` fires.
pub const DEFAULT_END_REACHED_THRESHOLD: f64 = 200.0;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(f64),
    /// A lazily evaluated initial offset provider (called by `Window::new`).
    ///
    /// Useful for restoring a position the caller persisted elsewhere.
    Provider(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> f64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::Window`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
#[derive(Clone)]
pub struct WindowOptions {
    /// Viewport size along the scroll axis, sampled when the window is created.
    ///
    /// Call `Window::set_container_extent` when the viewport is resized.
    pub container_extent: f64,

    /// Extra items materialized before and after the visible range.
    pub overscan: usize,

    pub initial_offset: InitialOffset,

    /// `on_end_reached` fires once the remaining distance
    /// (`total_extent - scroll_offset - container_extent`) is below this value.
    pub end_reached_threshold: f64,

    pub on_end_reached: Option<EndReachedCallback>,

    /// Optional callback fired when the window's state changes.
    pub on_change: Option<OnChangeCallback>,

    /// How long after the last scroll event the window returns to idle.
    pub is_scrolling_reset_delay_ms: u64,
}

impl WindowOptions {
    pub fn new(container_extent: f64) -> Self {
        Self {
            container_extent,
            overscan: DEFAULT_OVERSCAN,
            initial_offset: InitialOffset::default(),
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            on_end_reached: None,
            on_change: None,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub fn with_container_extent(mut self, container_extent: f64) -> Self {
        self.container_extent = container_extent;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: f64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: f64) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Window, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("container_extent", &self.container_extent)
            .field("overscan", &self.overscan)
            .field("initial_offset", &self.initial_offset)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("on_end_reached", &self.on_end_reached.is_some())
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
