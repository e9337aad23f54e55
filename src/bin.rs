use avl_ordered_set::OrderedSet;
use tracing::{info, Level};

pub fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::INFO)
        .init();

    let mut set = (1..10_000 as u32).rev().collect::<OrderedSet<_>>();
    info!(len = set.len(), "filled set");

    for i in (1..10_000).step_by(2) {
        set.erase(&i);
    }
    info!(len = set.len(), first = ?set.first(), "dropped odd values");

    for i in 1..10_000 {
        set.take(&i);
    }
    info!(len = set.len(), "drained set");
}
