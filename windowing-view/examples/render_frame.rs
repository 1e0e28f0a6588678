// Example: a windowed list producing positioned nodes for a host to draw.
use windowing::{HeightRule, WindowOptions};
use windowing_view::{Body, WindowedList};

#[derive(Debug)]
struct Contact {
    id: u64,
    name: String,
}

fn main() {
    let contacts: Vec<Contact> = (0..5_000)
        .map(|id| Contact {
            id,
            name: format!("contact #{id}"),
        })
        .collect();

    let mut list = WindowedList::new(
        contacts,
        HeightRule::fixed(48.0),
        |c: &Contact, _| format!("[{}]", c.name),
        |c: &Contact, _| c.id.to_string(),
        WindowOptions::new(480.0).with_overscan(2),
    )
    .with_header(|| "Contacts".to_string())
    .with_empty(|| "No contacts".to_string())
    .with_loading(|| "Loading...".to_string());

    list.on_scroll(10_000.0, 0);
    let frame = list.render();
    if let Some(header) = &frame.header {
        println!("{header}");
    }
    match &frame.body {
        Body::Empty(node) => println!("{node}"),
        Body::Region(region) => {
            println!(
                "extent={} total={} scroll={}",
                region.container_extent, region.total_extent, region.scroll_offset
            );
            for p in &region.items {
                println!("  key={} y={} h={} {}", p.key, p.offset, p.height, p.node);
            }
        }
    }
}
