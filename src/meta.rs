//! Per-Entry Metadata Types
//!
//! Small tag types attached to entries by the two engines.
//!
//! | Engine  | Metadata   | Description |
//! |---------|------------|-------------|
//! | 2Q      | `Location` | Which container currently owns the key |
//! | Optimal | `NextUse`  | Trace position of the key's next request |
//!
//! ```
//! use twoq::meta::{Location, NextUse};
//!
//! assert!(Location::Probationary.is_resident());
//! assert!(!Location::Ghost.is_resident());
//!
//! // A key that never recurs is always the worst one to keep.
//! assert!(NextUse::Never > NextUse::At(usize::MAX));
//! ```

/// Container that owns a key inside a 2Q cache.
///
/// A key is in at most one location at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Resident in the probationary FIFO (A1in).
    Probationary,
    /// Resident in the hot, recency-ordered queue (Am).
    Hot,
    /// Not resident; the identity is remembered in the ghost list (Aout).
    Ghost,
}

impl Location {
    /// Returns `true` if the key's value is held by the cache.
    #[inline]
    pub fn is_resident(self) -> bool {
        !matches!(self, Location::Ghost)
    }

    /// Conventional 2Q name of the container.
    pub fn queue_name(self) -> &'static str {
        match self {
            Location::Probationary => "A1in",
            Location::Hot => "Am",
            Location::Ghost => "Aout",
        }
    }
}

/// Position of a key's next request in a trace.
///
/// Ordered so that `Never` compares greater than any finite position: an entry
/// that will not be requested again is always the first eviction candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NextUse {
    /// The key is requested again at this trace index.
    At(usize),
    /// The key does not occur again.
    Never,
}

impl NextUse {
    /// Returns `true` for [`NextUse::Never`].
    #[inline]
    pub fn is_never(self) -> bool {
        matches!(self, NextUse::Never)
    }

    /// Returns the trace index of the next request, if any.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            NextUse::At(i) => Some(i),
            NextUse::Never => None,
        }
    }
}
