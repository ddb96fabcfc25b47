//! Cache Configuration Module
//!
//! This module provides configuration structures for both cache engines.
//! Each engine has its own dedicated configuration struct with public fields.
//!
//! Configuration structs are plain data: build them with a struct literal and
//! hand them to the engine's `init` constructor, which validates them and
//! returns a [`ConfigError`](crate::error::ConfigError) when the capacity is
//! below the engine's minimum.
//!
//! | Config | Cache | Minimum capacity |
//! |--------|-------|------------------|
//! | `TwoQCacheConfig` | [`TwoQCache`](crate::TwoQCache) | 2 |
//! | `OptimalCacheConfig` | [`OptimalCache`](crate::OptimalCache) | 1 |
//!
//! # Examples
//!
//! ```
//! use twoq::config::TwoQCacheConfig;
//! use twoq::loader::FnLoader;
//! use twoq::TwoQCache;
//!
//! let config = TwoQCacheConfig { capacity: 8 };
//! assert_eq!(config.a1in_capacity(), 4);
//! assert_eq!(config.am_capacity(), 4);
//!
//! let cache = TwoQCache::init(config, FnLoader(|k: &u32| k * 10), None).unwrap();
//! assert_eq!(cache.capacity(), 8);
//! ```

pub mod optimal;
pub mod two_q;

pub use optimal::OptimalCacheConfig;
pub use two_q::TwoQCacheConfig;
