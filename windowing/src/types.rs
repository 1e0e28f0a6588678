/// Where a target item should land in the viewport after a scroll-to-index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Item's leading edge at the viewport's leading edge.
    #[default]
    Start,
    /// Item's midpoint at the viewport's midpoint.
    Center,
    /// Item's trailing edge at the viewport's trailing edge.
    End,
    /// The smallest scroll that brings the item fully into view (no-op if it already is).
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A contiguous run of item indexes.
///
/// `end_index` is exclusive. Use [`VisibleRange::inclusive`] for the `[first, last]` form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Index of the last item in the range, if any.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }

    /// The range as inclusive `(first, last)` indexes, or `None` when empty.
    pub fn inclusive(&self) -> Option<(usize, usize)> {
        self.last_index().map(|last| (self.start_index, last))
    }

    /// Returns `true` when every index of `other` is also in `self`.
    pub fn covers(&self, other: &VisibleRange) -> bool {
        other.is_empty()
            || (self.start_index <= other.start_index && self.end_index >= other.end_index)
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// One materialized item: its index plus where it sits on the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowItem {
    pub index: usize,
    /// Distance from the start of the list to the item's leading edge.
    pub offset: f64,
    pub height: f64,
}

impl WindowItem {
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }

    /// Returns `true` if `position` lies in `[offset, offset + height)`.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.offset && position < self.end()
    }
}

/// Whether the window is currently being scrolled.
///
/// `Idle -> Scrolling` on every scroll event; back to `Idle` once no event arrived for the
/// configured reset delay (or when the adapter says so).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}
