use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Heights below this (and NaN/infinite heights) are replaced by it when building an index.
pub const MIN_HEIGHT: f64 = 1.0;

/// A per-item height function: `(item, index) -> height`.
pub type HeightFn<T> = Arc<dyn Fn(&T, usize) -> f64 + Send + Sync>;

/// Describes how tall each item is.
///
/// The rule is evaluated once per item when an [`OffsetIndex`] is built, never while scrolling.
pub enum HeightRule<T> {
    /// Every item has the same height. Range queries are `O(1)` and no table is allocated.
    Fixed(f64),
    /// Height is a function of the item and its index. Range queries are `O(log n)`.
    Dynamic(HeightFn<T>),
}

impl<T> HeightRule<T> {
    pub fn fixed(height: f64) -> Self {
        Self::Fixed(height)
    }

    pub fn dynamic(f: impl Fn(&T, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    /// Returns `true` if both rules are the same rule (same constant, or the same `Arc`).
    ///
    /// Two distinct closures with identical behavior are *not* the same rule; an index built
    /// from one is rebuilt when switching to the other.
    pub fn same_as(&self, other: &HeightRule<T>) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.to_bits() == b.to_bits(),
            (Self::Dynamic(a), Self::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> Clone for HeightRule<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(h) => Self::Fixed(*h),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for HeightRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Table {
    Fixed { count: usize, height: f64 },
    Dynamic { heights: Vec<f64>, offsets: Vec<f64> },
}

/// Cumulative offsets for a sequence of items.
///
/// `offset(0) == 0`, `offset(i) == offset(i - 1) + height(i - 1)`, and
/// `total_extent() == offset(n - 1) + height(n - 1)` (or `0` for an empty sequence).
/// Extents that would overflow saturate at `f64::MAX`.
///
/// An index is immutable: when items or the height rule change, build a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetIndex {
    table: Table,
    total_extent: f64,
}

impl Default for OffsetIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl OffsetIndex {
    pub fn empty() -> Self {
        Self {
            table: Table::Dynamic {
                heights: Vec::new(),
                offsets: Vec::new(),
            },
            total_extent: 0.0,
        }
    }

    /// An index of `count` items that are all `height` tall.
    pub fn fixed(count: usize, height: f64) -> Self {
        let height = sanitize_height(height, 0);
        let mut total_extent = count as f64 * height;
        if !total_extent.is_finite() {
            wwarn!(count, height, "total extent overflows, saturating at f64::MAX");
            total_extent = f64::MAX;
        }
        Self {
            table: Table::Fixed { count, height },
            total_extent,
        }
    }

    /// Builds the index for `items` under `rule`.
    ///
    /// A panic inside a dynamic rule propagates from here, at build time.
    pub fn build<T>(items: &[T], rule: &HeightRule<T>) -> Self {
        match rule {
            HeightRule::Fixed(h) => Self::fixed(items.len(), *h),
            HeightRule::Dynamic(f) => {
                Self::from_heights(items.iter().enumerate().map(|(i, item)| f(item, i)))
            }
        }
    }

    /// Builds the index with a fallible height function.
    ///
    /// Stops at the first error and returns it; no partial index is produced.
    pub fn try_build<T, E>(
        items: &[T],
        mut height: impl FnMut(&T, usize) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let mut heights = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            heights.push(height(item, i)?);
        }
        Ok(Self::from_heights(heights))
    }

    /// Builds a dynamic index from raw heights in a single prefix-sum pass.
    pub fn from_heights(heights: impl IntoIterator<Item = f64>) -> Self {
        let iter = heights.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out_heights = Vec::with_capacity(lower);
        let mut offsets = Vec::with_capacity(lower);
        let mut total = 0.0f64;
        let mut saturated = false;
        for (i, h) in iter.enumerate() {
            let h = sanitize_height(h, i);
            offsets.push(total);
            out_heights.push(h);
            total += h;
            if total > f64::MAX {
                if !saturated {
                    wwarn!(index = i, "total extent overflows, saturating at f64::MAX");
                    saturated = true;
                }
                total = f64::MAX;
            }
        }
        wdebug!(count = offsets.len(), total, "OffsetIndex::from_heights");
        Self {
            table: Table::Dynamic {
                heights: out_heights,
                offsets,
            },
            total_extent: total,
        }
    }

    pub fn len(&self) -> usize {
        match &self.table {
            Table::Fixed { count, .. } => *count,
            Table::Dynamic { offsets, .. } => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.table, Table::Fixed { .. })
    }

    /// The uniform item height, for fixed indexes.
    pub fn fixed_height(&self) -> Option<f64> {
        match self.table {
            Table::Fixed { height, .. } => Some(height),
            Table::Dynamic { .. } => None,
        }
    }

    pub fn total_extent(&self) -> f64 {
        self.total_extent
    }

    pub fn offset(&self, index: usize) -> Option<f64> {
        match &self.table {
            Table::Fixed { count, height } => {
                (index < *count).then(|| fixed_offset(index, *height))
            }
            Table::Dynamic { offsets, .. } => offsets.get(index).copied(),
        }
    }

    pub fn height(&self, index: usize) -> Option<f64> {
        match &self.table {
            Table::Fixed { count, height } => (index < *count).then_some(*height),
            Table::Dynamic { heights, .. } => heights.get(index).copied(),
        }
    }

    /// Materialized heights. Empty for fixed indexes, which store no table.
    pub fn heights(&self) -> &[f64] {
        match &self.table {
            Table::Fixed { .. } => &[],
            Table::Dynamic { heights, .. } => heights,
        }
    }

    /// Materialized offsets. Empty for fixed indexes, which store no table.
    pub fn offsets(&self) -> &[f64] {
        match &self.table {
            Table::Fixed { .. } => &[],
            Table::Dynamic { offsets, .. } => offsets,
        }
    }

    /// The rightmost index whose offset is `<= position`, clamped to the last item.
    ///
    /// Positions before the first item map to `0`. Returns `None` only for an empty index.
    pub fn index_at_or_before(&self, position: f64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        let index = match &self.table {
            Table::Fixed { height, .. } => {
                if position > 0.0 {
                    fixed_floor(position, *height, |o| o <= position)
                } else {
                    0
                }
            }
            Table::Dynamic { offsets, .. } => offsets
                .partition_point(|&o| o <= position)
                .saturating_sub(1),
        };
        Some(index.min(last))
    }

    /// The rightmost index whose offset is strictly `< position`, clamped to the last item.
    ///
    /// Returns `None` if no item starts before `position`.
    pub fn index_before(&self, position: f64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        let index = match &self.table {
            Table::Fixed { height, .. } => {
                if position.is_nan() || position <= 0.0 {
                    return None;
                }
                // Item 0 starts at 0 < position, so the result is always a real item.
                fixed_floor(position, *height, |o| o < position)
            }
            Table::Dynamic { offsets, .. } => offsets
                .partition_point(|&o| o < position)
                .checked_sub(1)?,
        };
        Some(index.min(last))
    }
}

fn fixed_offset(index: usize, height: f64) -> f64 {
    (index as f64 * height).min(f64::MAX)
}

/// The rightmost `i` for which `before(offset(i))` holds, for a fixed `height`.
///
/// `position / height` is only an estimate: `(i * height) / height` can round to just under
/// `i`. The estimate is off by at most one, so it is corrected once against the same product
/// `offset` returns.
fn fixed_floor(position: f64, height: f64, before: impl Fn(f64) -> bool) -> usize {
    // Truncation is `floor` for non-negative values; saturates for huge ones.
    let i = (position / height) as usize;
    if i < usize::MAX && before(fixed_offset(i + 1, height)) {
        i + 1
    } else if i > 0 && !before(fixed_offset(i, height)) {
        i - 1
    } else {
        i
    }
}

/// Replaces non-positive and non-finite heights with [`MIN_HEIGHT`].
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn sanitize_height(height: f64, index: usize) -> f64 {
    if height.is_finite() && height > 0.0 {
        return height;
    }
    wwarn!(index, height, "invalid item height, clamping to MIN_HEIGHT");
    MIN_HEIGHT
}
