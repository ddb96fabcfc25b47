//! Configuration for the offline optimal (Belady) cache.

use core::fmt;

use crate::error::ConfigError;

/// Configuration for an optimal (Belady) cache.
///
/// # Examples
///
/// ```
/// use twoq::config::OptimalCacheConfig;
///
/// assert!(OptimalCacheConfig { capacity: 1 }.validate().is_ok());
/// assert!(OptimalCacheConfig { capacity: 0 }.validate().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OptimalCacheConfig {
    /// Maximum number of resident keys. Must be at least 1.
    pub capacity: usize,
}

impl OptimalCacheConfig {
    /// Smallest capacity the optimal engine accepts.
    pub const MIN_CAPACITY: usize = 1;

    /// Checks that the capacity is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < Self::MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                engine: "optimal",
                capacity: self.capacity,
                minimum: Self::MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for OptimalCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimalCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_config_validation() {
        assert!(OptimalCacheConfig { capacity: 1 }.validate().is_ok());
        assert!(OptimalCacheConfig { capacity: 1000 }.validate().is_ok());
        assert_eq!(
            OptimalCacheConfig { capacity: 0 }.validate(),
            Err(ConfigError::CapacityTooSmall {
                engine: "optimal",
                capacity: 0,
                minimum: 1,
            })
        );
    }
}
