extern crate twoq;

use twoq::{OptimalCache, TwoQCache};

fn two_q_hits(capacity: usize, trace: &[u32]) -> u64 {
    let mut cache = TwoQCache::new(capacity, |k: &u32| *k).unwrap();
    for &key in trace {
        cache.access(key);
    }
    cache.hits()
}

fn optimal_hits(capacity: usize, trace: &[u32]) -> usize {
    let mut cache = OptimalCache::new(capacity, trace.to_vec()).unwrap();
    cache.run()
}

fn main() {
    println!("2Q vs Optimal");
    println!("=============");
    println!("The optimal cache knows the whole trace in advance, so its hit");
    println!("count is an upper bound for any online policy.\n");

    let workloads: Vec<(&str, usize, Vec<u32>)> = vec![
        ("repeated pair", 4, [1, 2].repeat(8)),
        ("loop larger than cache", 4, (0..6).cycle().take(36).collect()),
        (
            "hot set with scans",
            8,
            (0..200)
                .map(|i| if i % 2 == 0 { i % 4 } else { 1_000 + i })
                .collect(),
        ),
        ("reference trace", 6, vec![1, 2, 3, 4, 4, 5, 2, 3, 3, 7, 8, 9, 1, 2, 3]),
    ];

    println!(
        "{:<24} {:>8} {:>8} {:>8} {:>10}",
        "Workload", "Requests", "2Q", "OPT", "2Q/OPT"
    );
    println!("{}", "-".repeat(62));

    for (name, capacity, trace) in &workloads {
        let two_q = two_q_hits(*capacity, trace);
        let optimal = optimal_hits(*capacity, trace);
        let ratio = if optimal > 0 {
            format!("{:.1}%", two_q as f64 / optimal as f64 * 100.0)
        } else {
            "-".to_string()
        };
        println!(
            "{:<24} {:>8} {:>8} {:>8} {:>10}",
            name,
            trace.len(),
            two_q,
            optimal,
            ratio
        );
    }
}
