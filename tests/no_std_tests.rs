#![no_std]
extern crate alloc;
extern crate twoq;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use twoq::config::{OptimalCacheConfig, TwoQCacheConfig};
use twoq::loader::{FnLoader, TryFnLoader};
use twoq::{Location, OptimalCache, TwoQCache};

// Helper functions to create caches with the init pattern
fn make_two_q(cap: usize) -> TwoQCache<String, usize, FnLoader<fn(&String) -> usize>> {
    let config = TwoQCacheConfig { capacity: cap };
    TwoQCache::init(config, FnLoader(String::len as fn(&String) -> usize), None).unwrap()
}

fn make_optimal(cap: usize, trace: Vec<String>) -> OptimalCache<String> {
    let config = OptimalCacheConfig { capacity: cap };
    OptimalCache::init(config, trace, None).unwrap()
}

#[test]
fn test_two_q_in_no_std() {
    let mut cache = make_two_q(4);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key22 = String::from("key22");
    let key333 = String::from("key333");

    assert_eq!(cache.access(key1.clone()), (false, &4));
    assert_eq!(cache.access(key1.clone()), (true, &4));
    assert_eq!(cache.location(&key1), Some(Location::Hot));

    cache.access(key22.clone());
    cache.access(key333.clone());
    cache.access(String::from("k"));

    // key22 fell out of A1in and is remembered as a ghost.
    assert!(cache.is_ghost(&key22));
    assert_eq!(cache.peek(&key333), Some(&6));
    cache.check_invariants().unwrap();
}

#[test]
fn test_two_q_fallible_loader_in_no_std() {
    let config = TwoQCacheConfig { capacity: 2 };
    let mut cache = TwoQCache::init(
        config,
        TryFnLoader(|k: &u32| if *k == 0 { Err("zero") } else { Ok(format!("v{k}")) }),
        None,
    )
    .unwrap();

    assert_eq!(cache.try_access(0), Err("zero"));
    assert!(cache.is_empty());
    let loaded = cache.try_access(3).map(|(hit, v)| (hit, v.clone()));
    assert_eq!(loaded, Ok((false, String::from("v3"))));
}

#[test]
fn test_optimal_in_no_std() {
    let trace: Vec<String> = [1, 2, 3, 1, 4, 2, 5]
        .iter()
        .map(|k| format!("page{k}"))
        .collect();
    let mut cache = make_optimal(4, trace);
    assert_eq!(cache.run(), 2);
    assert_eq!(cache.misses(), 5);
    cache.check_invariants().unwrap();
}

#[test]
fn test_reference_trace_both_engines_in_no_std() {
    let keys = vec![1u32, 2, 3, 4, 4, 5, 2, 3, 3, 7, 8, 9, 1, 2, 3];

    let mut two_q = TwoQCache::new(6, |k: &u32| *k).unwrap();
    for &key in &keys {
        two_q.access(key);
    }
    assert_eq!(two_q.hits(), 6);

    let mut optimal = OptimalCache::new(6, keys).unwrap();
    assert_eq!(optimal.run(), 7);
}

// Without `hashbrown` both engines fall back to std's HashMap, whose default
// hash builder is `RandomState`.
#[cfg(not(feature = "hashbrown"))]
mod std_hash_map {
    extern crate std;

    use super::*;
    use std::collections::hash_map::RandomState;

    #[test]
    fn test_default_hasher_is_std_random_state() {
        let config = TwoQCacheConfig { capacity: 4 };
        let mut cache =
            TwoQCache::init(config, FnLoader(|k: &u32| k * 2), Some(RandomState::new())).unwrap();
        for key in [1, 2, 1, 3, 4, 2] {
            cache.access(key);
            cache.check_invariants().unwrap();
        }
        // 2 was ghosted, so its second request is a miss.
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.location(&2), Some(Location::Hot));

        let config = OptimalCacheConfig { capacity: 2 };
        let mut optimal =
            OptimalCache::init(config, vec![1u32, 2, 1, 3, 2], Some(RandomState::new())).unwrap();
        assert_eq!(optimal.run(), 2);
    }
}
