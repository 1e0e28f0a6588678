// Example: variable-height rows and index lookup by offset.
use windowing::{HeightRule, OffsetIndex, resolve_range};

fn main() {
    let lines: Vec<&str> = ["short", "a much longer line that wraps", "mid", ""]
        .into_iter()
        .cycle()
        .take(10_000)
        .collect();
    let rule = HeightRule::dynamic(|line: &&str, _| 18.0 * (1 + line.len() / 16) as f64);
    let index = OffsetIndex::build(&lines, &rule);

    println!("total_extent={}", index.total_extent());
    for scroll in [0.0, 5_000.0, 250_000.0] {
        let range = resolve_range(&index, scroll, 600.0, 2);
        println!("scroll={scroll} range={:?}", range.inclusive());
    }
    println!("row at 10000px: {:?}", index.index_at_or_before(10_000.0));
}
