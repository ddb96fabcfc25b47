//! Error types for the cache engines.
//!
//! - [`ConfigError`]: returned by fallible constructors when a capacity is
//!   below the engine's minimum. The engine instance is never produced, so
//!   there is nothing to retry with the same arguments.
//! - [`InvariantError`]: returned by `check_invariants` when the internal
//!   bookkeeping of an engine disagrees with itself.
//!
//! ```
//! use twoq::error::ConfigError;
//! use twoq::TwoQCache;
//!
//! let err = TwoQCache::new(1, |k: &u32| *k).unwrap_err();
//! assert!(matches!(err, ConfigError::CapacityTooSmall { minimum: 2, .. }));
//! ```

extern crate alloc;

use alloc::string::String;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested capacity is below what the engine needs to operate.
    #[error("{engine} cache capacity must be at least {minimum}, got {capacity}")]
    CapacityTooSmall {
        /// Engine that rejected the configuration.
        engine: &'static str,
        /// Capacity that was requested.
        capacity: usize,
        /// Smallest capacity the engine accepts.
        minimum: usize,
    },
}

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cache invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::CapacityTooSmall {
            engine: "2Q",
            capacity: 1,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "2Q cache capacity must be at least 2, got 1"
        );
    }

    #[test]
    fn test_invariant_error_message() {
        let err = InvariantError::new("A1in over capacity");
        assert_eq!(err.message(), "A1in over capacity");
        assert_eq!(
            err.to_string(),
            "cache invariant violated: A1in over capacity"
        );
    }
}
