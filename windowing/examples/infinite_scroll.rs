// Example: end-reached detection driving page loads.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use windowing::{OffsetIndex, Window, WindowOptions};

fn main() {
    let wants_more = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&wants_more);
    let options = WindowOptions::new(500.0)
        .with_end_reached_threshold(300.0)
        .with_on_end_reached(Some(move || flag.store(true, Ordering::SeqCst)));

    let mut pages = 1usize;
    let mut w = Window::with_index(options, OffsetIndex::fixed(50, 40.0));

    let mut now_ms = 0u64;
    while pages < 4 {
        now_ms += 16;
        let next = w.scroll_offset() + 120.0;
        w.on_scroll(next, now_ms);

        if wants_more.swap(false, Ordering::SeqCst) {
            w.set_is_loading(true);
            pages += 1;
            println!("t={now_ms} loading page {pages} at offset={}", w.scroll_offset());
            w.set_offset_index(OffsetIndex::fixed(pages * 50, 40.0));
            w.set_is_loading(false);
        }
    }
    println!("items={} total_extent={}", w.total_items(), w.total_extent());
}
