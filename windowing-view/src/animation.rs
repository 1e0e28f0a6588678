use windowing::{Align, Window};

/// How an animated scroll distributes its travel over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// Fast start, slow landing on the target item.
    #[default]
    EaseOut,
}

impl Easing {
    /// Maps elapsed progress to travelled distance, both as fractions in `[0, 1]`.
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::EaseOut => {
                let rest = 1.0 - p;
                1.0 - rest * rest * rest
            }
        }
    }
}

/// An in-flight scroll toward an item.
///
/// The animation aims at an item, not at a pixel offset. Each step re-resolves the item's
/// aligned offset against the window, so a rebuild or a resize mid-flight bends the path toward
/// the item's new position instead of landing on a stale offset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnimation {
    index: usize,
    align: Align,
    from: f64,
    started_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl ScrollAnimation {
    pub(crate) fn new(
        from: f64,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            index,
            align,
            from,
            started_ms: now_ms,
            duration_ms,
            easing,
        }
    }

    /// The item being scrolled to.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Elapsed fraction of the duration in `[0, 1]`. A zero duration is complete at once.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// The offset `window` should show at `now_ms`, within its scrollable range.
    ///
    /// Returns `None` once the target item no longer exists.
    pub fn offset_at(&self, window: &Window, now_ms: u64) -> Option<f64> {
        let to = window.scroll_to_index_offset(self.index, self.align)?;
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return Some(to);
        }
        let travelled = self.easing.apply(progress);
        Some(window.clamp_scroll_offset(self.from + (to - self.from) * travelled))
    }
}
