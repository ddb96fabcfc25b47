//! Configuration for the Two-Queue (2Q) cache.
//!
//! The total capacity is split between the probationary FIFO (A1in) and the
//! hot queue (Am). The ghost list (Aout) remembers up to `capacity` evicted
//! keys; ghosts hold no values and do not count against resident capacity.
//!
//! ```text
//! capacity = 7
//!   A1in: 7 / 2     = 3 entries
//!   Am:   7 - 3     = 4 entries
//!   Aout: 7 keys
//! ```

use core::fmt;

use crate::error::ConfigError;

/// Configuration for a 2Q (Two-Queue) cache.
///
/// # Examples
///
/// ```
/// use twoq::config::TwoQCacheConfig;
///
/// let config = TwoQCacheConfig { capacity: 7 };
/// assert_eq!(config.a1in_capacity(), 3);
/// assert_eq!(config.am_capacity(), 4);
/// assert_eq!(config.ghost_capacity(), 7);
/// assert!(config.validate().is_ok());
///
/// assert!(TwoQCacheConfig { capacity: 1 }.validate().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TwoQCacheConfig {
    /// Total number of resident entries (A1in + Am). Must be at least 2.
    pub capacity: usize,
}

impl TwoQCacheConfig {
    /// Smallest total capacity that leaves both queues non-empty.
    pub const MIN_CAPACITY: usize = 2;

    /// Capacity of the probationary FIFO (A1in).
    #[inline]
    pub fn a1in_capacity(&self) -> usize {
        self.capacity / 2
    }

    /// Capacity of the hot queue (Am).
    #[inline]
    pub fn am_capacity(&self) -> usize {
        self.capacity - self.a1in_capacity()
    }

    /// Number of evicted probationary keys remembered in the ghost list (Aout).
    #[inline]
    pub fn ghost_capacity(&self) -> usize {
        self.capacity
    }

    /// Checks that the capacity can be split into two non-empty queues.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < Self::MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                engine: "2Q",
                capacity: self.capacity,
                minimum: Self::MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for TwoQCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoQCacheConfig")
            .field("capacity", &self.capacity)
            .field("a1in_capacity", &self.a1in_capacity())
            .field("am_capacity", &self.am_capacity())
            .field("ghost_capacity", &self.ghost_capacity())
            .finish()
    }
}
