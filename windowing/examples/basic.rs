// Example: fixed-height list, scroll, and scroll-to-index.
use windowing::{Align, HeightRule, OffsetIndex, Window, WindowOptions};

fn main() {
    let items: Vec<u32> = (0..1_000_000).collect();
    let index = OffsetIndex::build(&items, &HeightRule::fixed(20.0));
    let mut w = Window::with_index(WindowOptions::new(400.0), index);

    w.on_scroll(123_456.0, 0);
    let mut visible = Vec::new();
    w.collect_items(&mut visible);
    println!("total_extent={}", w.total_extent());
    println!("range={:?}", w.range().inclusive());
    println!("first={:?}", visible.first());

    let off = w.scroll_to_index(999_999, Align::End);
    println!("after scroll_to_index: target={off:?} offset={}", w.scroll_offset());
}
