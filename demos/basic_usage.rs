extern crate twoq;

use twoq::metrics::CacheMetrics;
use twoq::TwoQCache;

/// Stand-in for an expensive lookup, such as reading a page from disk.
fn slow_lookup(page: &u32) -> String {
    format!("contents of page {page}")
}

fn main() {
    println!("2Q Cache Basic Usage");
    println!("====================");

    // 6 entries: A1in holds 3, Am holds 3, Aout remembers 6 keys.
    let mut cache = TwoQCache::new(6, slow_lookup).unwrap();
    println!(
        "capacity {} (A1in {}, Am {}, Aout {})\n",
        cache.capacity(),
        cache.a1in_capacity(),
        cache.am_capacity(),
        cache.ghost_capacity()
    );

    // Pages 1 and 2 are requested twice and become hot.
    for page in [1, 2, 1, 2] {
        let (hit, value) = cache.access(page);
        println!("page {page}: {:<4} -> {value}", if hit { "hit" } else { "miss" });
    }

    // A one-off scan flows through A1in without touching the hot pages.
    println!("\nscanning pages 100..110");
    for page in 100..110 {
        cache.access(page);
    }

    for page in [1, 2] {
        println!(
            "page {page} is {:?} after the scan",
            cache.location(&page).map(|l| l.queue_name())
        );
    }

    // A recently evicted probationary page goes straight to Am when it returns.
    let ghost = *cache.ghost_keys().next().unwrap();
    let (hit, _) = cache.access(ghost);
    println!(
        "\nghost page {ghost} requested again: hit={hit}, now in {:?}",
        cache.location(&ghost).map(|l| l.queue_name())
    );

    println!("\nhits {} / misses {}", cache.hits(), cache.misses());
    for (name, value) in cache.stats().metrics() {
        println!("  {name:<24} {value:.3}");
    }
}
