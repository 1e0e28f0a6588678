// Example: animated scroll-to-index without holding any UI objects.
//
// A host would call `tick(now_ms)` from its frame loop and apply the returned offset to the
// real scroll container (if any), then render.
use windowing::{Align, HeightRule, WindowOptions};
use windowing_view::{Easing, WindowedList};

fn main() {
    let mut list = WindowedList::new(
        (0..10_000u32).collect::<Vec<_>>(),
        HeightRule::fixed(24.0),
        |row: &u32, _| format!("row {row}"),
        |row: &u32, _| row.to_string(),
        WindowOptions::new(480.0),
    );

    let target = list.scroll_to_index_animated(2_000, Align::Center, 0, 240, Easing::EaseOut);
    println!("target_offset={target:?}");

    let mut now_ms = 0u64;
    while list.is_animating() {
        now_ms += 16;
        // Halfway through, the user asks for a different row; the newer target wins.
        if now_ms == 96 {
            list.scroll_to_index_animated(500, Align::Start, now_ms, 240, Easing::EaseOut);
        }
        if let Some(off) = list.tick(now_ms) {
            if now_ms % 48 == 0 {
                println!("t={now_ms} off={off} range={:?}", list.range().inclusive());
            }
        }
    }
    println!("settled at {}", list.window().scroll_offset());
}
