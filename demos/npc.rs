//! Store a few NPC stats and print the tree.
//!
//! Run with `RUST_LOG=rb_ordered_map=trace` to see the structural events.

use rb_ordered_map::OrderedMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut npc = OrderedMap::new();
    npc.insert("health", 10);
    npc.insert("armor", 20);
    npc.insert("ammo", 5);
    npc.print();

    let mut cursor = npc.cursor();
    loop {
        if let Ok((key, value)) = cursor.entry() {
            println!("{key} {value}");
        }
        if !cursor.has_next() {
            break;
        }
        cursor.move_next();
    }
}
