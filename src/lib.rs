#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Engine Selection
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          Which engine do I need?                             │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                              │
//! │  Are requests known in advance?                                              │
//! │                                                                              │
//! │      No ──▶ ┌──────────────┐   online, scan resistant, loads values          │
//! │             │  TwoQCache   │   through a Loader on every miss                │
//! │             └──────────────┘                                                 │
//! │                                                                              │
//! │     Yes ──▶ ┌──────────────┐   offline, replays the whole trace and          │
//! │             │ OptimalCache │   reports the best achievable hit count         │
//! │             └──────────────┘                                                 │
//! │                                                                              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Engine | Description | Minimum capacity | Per access |
//! |--------|-------------|------------------|------------|
//! | [`TwoQCache`] | Two-Queue: probationary FIFO, hot LRU, ghost list | 2 | O(1) |
//! | [`OptimalCache`] | Belady's offline optimum | 1 | O(1) hit, O(capacity) full miss |
//!
//! ## Code Examples
//!
//! ### 2Q
//!
//! A key seen once waits in the probationary FIFO; a second request while it
//! is still there promotes it to the hot queue.
//!
//! ```rust
//! use twoq::{Location, TwoQCache};
//!
//! let mut cache = TwoQCache::new(4, |k: &u32| format!("data_for_key_{k}")).unwrap();
//!
//! let (hit, value) = cache.access(1);
//! assert!(!hit);
//! assert_eq!(value, "data_for_key_1");
//! assert_eq!(cache.location(&1), Some(Location::Probationary));
//!
//! assert!(cache.access(1).0);
//! assert_eq!(cache.location(&1), Some(Location::Hot));
//! ```
//!
//! ### 2Q with a fallible loader
//!
//! ```rust
//! use twoq::TwoQCache;
//!
//! let mut cache = TwoQCache::try_new(4, |k: &i64| {
//!     if *k < 0 { Err("negative key") } else { Ok(*k * 2) }
//! })
//! .unwrap();
//!
//! assert_eq!(cache.try_access(21), Ok((false, &42)));
//! assert_eq!(cache.try_access(-1), Err("negative key"));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ### Optimal
//!
//! ```rust
//! use twoq::OptimalCache;
//!
//! let trace = vec![1, 2, 1, 2, 1, 2, 1, 2];
//! let mut cache = OptimalCache::new(4, trace).unwrap();
//! assert_eq!(cache.run(), 6);
//! ```
//!
//! ### Metrics
//!
//! Both engines implement [`metrics::CacheMetrics`]:
//!
//! ```rust
//! use twoq::metrics::CacheMetrics;
//! use twoq::TwoQCache;
//!
//! let mut cache = TwoQCache::new(4, |k: &u32| *k).unwrap();
//! for key in [1, 1, 2] {
//!     cache.access(key);
//! }
//! let metrics = cache.metrics();
//! assert_eq!(metrics["cache_hits"], 1.0);
//! assert_eq!(metrics["promotions"], 1.0);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | ✓ | Use hashbrown's `HashMap` (works in `no_std`) |
//! | `std` | | Standard library support for `thiserror` and `tracing` |
//! | `nightly` | | Nightly-only hashbrown optimizations |

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Algorithm-specific metadata types.
///
/// - `Location`: which 2Q container owns a key
/// - `NextUse`: trace position of a key's next request, for the optimal engine
pub mod meta;

/// Doubly linked list backed by an index arena.
///
/// Internal infrastructure shared by both engines. Nodes are addressed by
/// integer handles so an entry can be unlinked or moved in O(1) without
/// holding references into the list.
pub(crate) mod list;

/// Error types returned by constructors and invariant checks.
pub mod error;

/// Cache configuration structures.
pub mod config;

/// Value loaders invoked by the 2Q engine on a miss.
pub mod loader;

/// Two-Queue (2Q) cache implementation.
///
/// An online cache that keeps one-off requests in a small probationary FIFO
/// and promotes keys on their second request to a recency-ordered hot queue.
/// A ghost list of recently evicted probationary keys lets a key that returns
/// shortly after eviction skip probation.
pub mod two_q;

/// Offline optimal (Belady) cache implementation.
///
/// Replays a fully known trace, evicting the key whose next request lies
/// furthest in the future. Serves as the upper bound for online policies.
pub mod optimal;

/// Cache metrics system.
///
/// Counters for both engines reported through a common trait.
pub mod metrics;

pub use error::{ConfigError, InvariantError};
pub use loader::{FnLoader, Loader, TryFnLoader};
pub use meta::{Location, NextUse};
pub use optimal::OptimalCache;
pub use two_q::TwoQCache;
