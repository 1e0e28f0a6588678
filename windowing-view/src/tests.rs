use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::panic::{AssertUnwindSafe, catch_unwind};

use windowing::{Align, HeightRule, WindowOptions};

fn rows(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn fixed_list(n: u32, options: WindowOptions) -> WindowedList<u32, String> {
    WindowedList::new(
        rows(n),
        HeightRule::fixed(50.0),
        |item: &u32, _| format!("row {item}"),
        |item: &u32, _| format!("item-{item}"),
        options,
    )
}

fn counting_rule(calls: &Arc<AtomicUsize>) -> HeightRule<u32> {
    let calls = Arc::clone(calls);
    HeightRule::dynamic(move |_: &u32, index| {
        calls.fetch_add(1, Ordering::SeqCst);
        30.0 + (index % 5) as f64 * 10.0
    })
}

fn indexes(frame: &Frame<String>) -> Vec<usize> {
    frame.items().iter().map(|p| p.index).collect()
}

#[test]
fn renders_only_the_materialized_range() {
    let list = fixed_list(100, WindowOptions::new(200.0).with_overscan(3));
    let frame = list.render();

    assert!(!frame.is_empty_state());
    assert_eq!(indexes(&frame), (0..=6).collect::<Vec<_>>());
    let region = frame.region().unwrap();
    assert_eq!(region.container_extent, 200.0);
    assert_eq!(region.total_extent, 5000.0);
    assert!(region.loading.is_none());

    let first = &frame.items()[0];
    assert_eq!(first.key, "item-0");
    assert_eq!(first.node, "row 0");
    assert_eq!(first.offset, 0.0);
    assert_eq!(first.height, 50.0);
    assert_eq!(frame.items()[6].offset, 300.0);
    assert_eq!(list.start_index(), Some(0));
    assert_eq!(list.end_index(), Some(6));
    assert_eq!(list.total_items(), 100);
}

#[test]
fn scrolling_moves_the_rendered_slice() {
    let mut list = fixed_list(100, WindowOptions::new(200.0).with_overscan(3));
    list.on_scroll(500.0, 0);
    let frame = list.render();
    assert_eq!(indexes(&frame), (7..=16).collect::<Vec<_>>());
    assert_eq!(frame.region().unwrap().scroll_offset, 500.0);
    let keys: Vec<&str> = frame.keys().collect();
    assert_eq!(keys.first(), Some(&"item-7"));
    assert_eq!(keys.last(), Some(&"item-16"));

    list.on_resize(400.0);
    assert_eq!(list.range().inclusive(), Some((7, 20)));
}

#[test]
fn dynamic_items_are_laid_out_back_to_back() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut list = WindowedList::new(
        rows(100),
        counting_rule(&calls),
        |item: &u32, _| item.to_string(),
        |item: &u32, _| item.to_string(),
        WindowOptions::new(300.0),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 100);

    list.on_scroll(1234.0, 0);
    let frame = list.render();
    let items = frame.items();
    assert!(!items.is_empty());
    for pair in items.windows(2) {
        assert_eq!(pair[0].index + 1, pair[1].index);
        assert_eq!(pair[0].end(), pair[1].offset);
    }
    // Scrolling never re-evaluates the height rule.
    assert_eq!(calls.load(Ordering::SeqCst), 100);
}

#[test]
fn empty_sequence_renders_the_empty_state() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rendered = Arc::new(AtomicUsize::new(0));
    let rendered2 = Arc::clone(&rendered);
    let list = WindowedList::new(
        Vec::<u32>::new(),
        counting_rule(&calls),
        move |item: &u32, _| {
            rendered2.fetch_add(1, Ordering::SeqCst);
            item.to_string()
        },
        |item: &u32, _| item.to_string(),
        WindowOptions::new(200.0),
    )
    .with_empty(|| "nothing here".to_string());

    let frame = list.render();
    assert_eq!(frame.body, Body::Empty("nothing here".to_string()));
    assert!(frame.items().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(rendered.load(Ordering::SeqCst), 0);
    assert!(list.window().offset_index().is_empty());
    assert!(list.range().is_empty());
}

#[test]
fn empty_sequence_without_empty_content_renders_an_empty_region() {
    let list = fixed_list(0, WindowOptions::new(200.0));
    let frame = list.render();
    let region = frame.region().unwrap();
    assert!(region.items.is_empty());
    assert_eq!(region.total_extent, 0.0);
}

#[test]
fn loading_content_is_appended_outside_the_extent() {
    let mut list = fixed_list(0, WindowOptions::new(200.0))
        .with_empty(|| "empty".to_string())
        .with_loading(|| "loading".to_string());

    // Empty but loading: the region (with the loading node) wins over the empty state.
    list.set_loading(true);
    let frame = list.render();
    assert!(!frame.is_empty_state());
    assert_eq!(frame.region().unwrap().loading.as_deref(), Some("loading"));

    list.set_items(rows(10));
    let frame = list.render();
    let region = frame.region().unwrap();
    assert_eq!(region.items.len(), 7);
    assert_eq!(region.loading.as_deref(), Some("loading"));
    assert_eq!(region.total_extent, 500.0);

    list.set_loading(false);
    assert!(list.render().region().unwrap().loading.is_none());
}

#[test]
fn header_and_footer_are_not_virtualized() {
    let list = fixed_list(100, WindowOptions::new(200.0))
        .with_header(|| "header".to_string())
        .with_footer(|| "footer".to_string());
    let frame = list.render();
    assert_eq!(frame.header.as_deref(), Some("header"));
    assert_eq!(frame.footer.as_deref(), Some("footer"));
    assert_eq!(frame.region().unwrap().total_extent, 5000.0);
}

#[test]
fn index_is_rebuilt_only_on_identity_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let items: Arc<[u32]> = rows(20).into();
    let rule = counting_rule(&calls);
    let mut list = WindowedList::new(
        Arc::clone(&items),
        rule.clone(),
        |item: &u32, _| item.to_string(),
        |item: &u32, _| item.to_string(),
        WindowOptions::new(100.0),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 20);

    assert!(!list.set_items(Arc::clone(&items)));
    assert!(!list.set_height_rule(rule.clone()));
    assert_eq!(calls.load(Ordering::SeqCst), 20);

    // Equal contents, new allocation: rebuilt.
    assert!(list.set_items(rows(20)));
    assert_eq!(calls.load(Ordering::SeqCst), 40);

    assert!(list.set_height_rule(HeightRule::fixed(10.0)));
    assert_eq!(calls.load(Ordering::SeqCst), 40);
    assert_eq!(list.window().total_extent(), 200.0);
    assert!(!list.set_height_rule(HeightRule::fixed(10.0)));
}

#[test]
fn end_reached_fires_once_per_crossing() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut list = fixed_list(
        100,
        WindowOptions::new(200.0)
            .with_end_reached_threshold(100.0)
            .with_on_end_reached(Some(move || {
                fired2.fetch_add(1, Ordering::SeqCst);
            })),
    );

    for (t, offset) in [4000.0, 4600.0, 4750.0, 4760.0, 4790.0, 4800.0]
        .into_iter()
        .enumerate()
    {
        list.on_scroll(offset, t as u64 * 16);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // The caller starts loading the next page; scroll events while loading never fire.
    list.set_loading(true);
    list.on_scroll(4700.0, 200);
    list.on_scroll(4800.0, 216);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    list.set_items(rows(200));
    list.set_loading(false);
    list.on_scroll(9000.0, 300);
    list.on_scroll(9760.0, 316);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn end_reached_can_be_checked_without_scrolling() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut list = fixed_list(
        3,
        WindowOptions::new(400.0).with_on_end_reached(Some(move || {
            fired2.fetch_add(1, Ordering::SeqCst);
        })),
    );

    // Three rows never fill the viewport, so no scroll event will ever arrive.
    list.set_loading(true);
    assert!(!list.check_end_reached());
    list.set_loading(false);
    assert!(list.check_end_reached());
    assert!(!list.check_end_reached());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // A page arrived but it is still short: loading finished, check again.
    list.set_loading(true);
    list.set_items(rows(5));
    list.set_loading(false);
    assert!(list.check_end_reached());
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn scroll_to_index_is_immediate_and_ignores_stale_indexes() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    assert_eq!(list.scroll_to_index(50, Align::Center), Some(2425.0));
    assert_eq!(list.window().scroll_offset(), 2425.0);

    assert_eq!(list.scroll_to_index(100, Align::Start), None);
    assert_eq!(list.window().scroll_offset(), 2425.0);
}

#[test]
fn animated_scroll_reaches_its_target() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    let to = list
        .scroll_to_index_animated(50, Align::Center, 0, 100, Easing::EaseOut)
        .unwrap();
    assert_eq!(to, 2425.0);
    assert!(list.is_animating());

    let mut last = 0.0;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(offset) = list.tick(now_ms) {
            assert!(offset >= last);
            last = offset;
        }
    }
    assert!(!list.is_animating());
    assert!(!list.window().is_scrolling());
    assert_eq!(list.window().scroll_offset(), 2425.0);
}

#[test]
fn animated_scroll_last_write_wins() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    list.scroll_to_index_animated(50, Align::Start, 0, 100, Easing::Linear);
    assert_eq!(list.tick(50), Some(1250.0));

    assert_eq!(
        list.scroll_to_index_animated(10, Align::Start, 50, 100, Easing::Linear),
        Some(500.0)
    );
    assert_eq!(list.tick(100), Some(875.0));
    list.tick(150);
    assert!(!list.is_animating());
    assert_eq!(list.window().scroll_offset(), 500.0);

    // Stale index: no-op, nothing starts.
    assert_eq!(
        list.scroll_to_index_animated(1000, Align::Start, 200, 100, Easing::Linear),
        None
    );
    assert!(!list.is_animating());
}

#[test]
fn user_scroll_cancels_animation() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    list.scroll_to_index_animated(80, Align::Start, 0, 300, Easing::Linear);
    list.tick(30);
    list.on_scroll(100.0, 40);
    assert!(!list.is_animating());
    assert_eq!(list.tick(60), None);
    assert_eq!(list.window().scroll_offset(), 100.0);
}

#[test]
fn render_panic_leaves_state_intact() {
    let mut list: WindowedList<u32, String> = WindowedList::new(
        rows(100),
        HeightRule::fixed(50.0),
        |item: &u32, index| {
            if index == 5 {
                panic!("cannot render row 5");
            }
            item.to_string()
        },
        |item: &u32, _| item.to_string(),
        WindowOptions::new(200.0),
    );
    let range = list.range();

    let res = catch_unwind(AssertUnwindSafe(|| list.render()));
    assert!(res.is_err());
    assert_eq!(list.window().scroll_offset(), 0.0);
    assert_eq!(list.range(), range);
    assert_eq!(list.window().total_extent(), 5000.0);

    list.on_scroll(1000.0, 0);
    let frame = list.render();
    assert_eq!(indexes(&frame), (17..=26).collect::<Vec<_>>());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "duplicate item key")]
fn duplicate_keys_are_caught_in_debug_builds() {
    let list: WindowedList<u32, String> = WindowedList::new(
        rows(10),
        HeightRule::fixed(50.0),
        |item: &u32, _| item.to_string(),
        |_: &u32, _| "same".to_string(),
        WindowOptions::new(200.0),
    );
    list.render();
}

#[test]
fn first_duplicate_finds_repeated_keys() {
    let keys: Vec<String> = ["a", "b", "c", "b"].iter().map(|k| k.to_string()).collect();
    assert_eq!(crate::key::first_duplicate(&keys), Some("b"));
    assert_eq!(crate::key::first_duplicate(&keys[..3]), None);
}

#[test]
fn animation_follows_its_item_across_a_rebuild() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    list.scroll_to_index_animated(50, Align::Start, 0, 100, Easing::Linear);
    assert_eq!(list.tick(50), Some(1250.0));

    // Rows doubled in height: item 50 now starts at 5000, not 2500.
    list.set_height_rule(HeightRule::fixed(100.0));
    assert_eq!(list.tick(75), Some(3750.0));
    assert_eq!(list.tick(100), Some(5000.0));
    assert!(!list.is_animating());
}

#[test]
fn animation_stops_when_its_item_disappears() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    list.scroll_to_index_animated(80, Align::Start, 0, 100, Easing::EaseOut);
    list.tick(10);
    assert_eq!(list.animation().map(|a| a.index()), Some(80));

    list.set_items(rows(20));
    assert_eq!(list.tick(20), None);
    assert!(!list.is_animating());
    assert!(!list.window().is_scrolling());
}

#[test]
fn zero_duration_animation_lands_on_first_tick() {
    let mut list = fixed_list(100, WindowOptions::new(200.0));
    assert_eq!(
        list.scroll_to_index_animated(30, Align::Start, 5, 0, Easing::EaseOut),
        Some(1500.0)
    );
    assert_eq!(list.tick(5), Some(1500.0));
    assert!(!list.is_animating());
}

#[test]
fn easing_curves() {
    for easing in [Easing::Linear, Easing::EaseOut] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert_eq!(easing.apply(-1.0), 0.0);
        assert_eq!(easing.apply(2.0), 1.0);
    }
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::EaseOut.apply(0.5), 0.875);
    assert_eq!(Easing::default(), Easing::EaseOut);
}
