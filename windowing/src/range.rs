//! Maps a scroll position and viewport extent to the items that must be materialized.
//!
//! With a fixed-height [`OffsetIndex`] every query is `O(1)`; with a dynamic one it is a binary
//! search over the offset table, `O(log n)`.

use crate::{OffsetIndex, VisibleRange};

/// Default number of extra items materialized on each side of the visible range.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Returns the strictly visible range for a viewport (no overscan).
///
/// - The first item is the rightmost one whose offset is `<= scroll_offset`; an item starting
///   exactly at the scroll offset is the first visible item.
/// - The last item is the rightmost one whose offset is `< scroll_offset + extent`.
///
/// Degenerate inputs never panic:
/// - an empty index yields [`VisibleRange::EMPTY`];
/// - a negative or NaN `scroll_offset` is treated as `0`;
/// - a `scroll_offset` past the end clamps to the last item;
/// - a non-positive or NaN `extent` yields an empty range anchored at the first item, which
///   overscan can still grow (see [`expand`]).
pub fn visible_range(index: &OffsetIndex, scroll_offset: f64, extent: f64) -> VisibleRange {
    let scroll_offset = sanitize_scroll_offset(scroll_offset);
    let Some(start) = index.index_at_or_before(scroll_offset) else {
        return VisibleRange::EMPTY;
    };
    if extent.is_nan() || extent <= 0.0 {
        return VisibleRange::new(start, start);
    }

    let last = index
        .index_before(scroll_offset + extent)
        .unwrap_or(start)
        .max(start);
    VisibleRange::new(start, last + 1)
}

/// Grows `range` by `overscan` items on both ends, clamped to `[0, count)`.
pub fn expand(range: VisibleRange, overscan: usize, count: usize) -> VisibleRange {
    if count == 0 {
        return VisibleRange::EMPTY;
    }
    let start = range.start_index.min(count).saturating_sub(overscan);
    let end = range.end_index.saturating_add(overscan).min(count);
    VisibleRange::new(start, end)
}

/// The materialized range: [`visible_range`] expanded by `overscan`.
pub fn resolve_range(
    index: &OffsetIndex,
    scroll_offset: f64,
    extent: f64,
    overscan: usize,
) -> VisibleRange {
    let visible = visible_range(index, scroll_offset, extent);
    let range = expand(visible, overscan, index.len());
    wtrace!(
        scroll_offset,
        extent,
        overscan,
        start = range.start_index,
        end = range.end_index,
        "resolve_range"
    );
    range
}

pub(crate) fn sanitize_scroll_offset(offset: f64) -> f64 {
    if offset.is_nan() || offset < 0.0 {
        0.0
    } else {
        offset
    }
}
