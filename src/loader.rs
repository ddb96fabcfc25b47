//! Value loader capability for the 2Q cache.
//!
//! The loader is the costly step the cache exists to avoid: it runs
//! synchronously, exactly once per miss, and never on a hit. It is supplied
//! when the cache is built and owned by the cache from then on.
//!
//! Closures are adapted with [`FnLoader`] (cannot fail) or [`TryFnLoader`]
//! (returns a `Result`). Anything else can implement [`Loader`] directly.
//!
//! ```
//! use twoq::loader::{Loader, TryFnLoader};
//!
//! let mut loader = TryFnLoader(|k: &i32| {
//!     if *k < 0 { Err("negative key") } else { Ok(*k * 2) }
//! });
//! assert_eq!(loader.load(&21), Ok(42));
//! assert_eq!(loader.load(&-1), Err("negative key"));
//! ```

use core::convert::Infallible;
use core::fmt;

/// Produces the value for a key that is not resident.
pub trait Loader<K, V> {
    /// Error returned when the value cannot be produced.
    type Error;

    /// Produces the value for `key`.
    fn load(&mut self, key: &K) -> Result<V, Self::Error>;
}

/// Adapts an infallible closure `FnMut(&K) -> V` into a [`Loader`].
#[derive(Clone, Copy)]
pub struct FnLoader<F>(pub F);

impl<K, V, F> Loader<K, V> for FnLoader<F>
where
    F: FnMut(&K) -> V,
{
    type Error = Infallible;

    #[inline]
    fn load(&mut self, key: &K) -> Result<V, Infallible> {
        Ok((self.0)(key))
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLoader")
    }
}

/// Adapts a fallible closure `FnMut(&K) -> Result<V, E>` into a [`Loader`].
#[derive(Clone, Copy)]
pub struct TryFnLoader<F>(pub F);

impl<K, V, E, F> Loader<K, V> for TryFnLoader<F>
where
    F: FnMut(&K) -> Result<V, E>,
{
    type Error = E;

    #[inline]
    fn load(&mut self, key: &K) -> Result<V, E> {
        (self.0)(key)
    }
}

impl<F> fmt::Debug for TryFnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TryFnLoader")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_loader_counts_calls() {
        let mut calls = 0;
        {
            let mut loader = FnLoader(|k: &u32| {
                calls += 1;
                k + 1
            });
            assert_eq!(loader.load(&1), Ok(2));
            assert_eq!(loader.load(&2), Ok(3));
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_try_fn_loader_propagates_error() {
        let mut loader = TryFnLoader(|k: &u32| if *k == 0 { Err(()) } else { Ok(*k) });
        assert_eq!(loader.load(&0), Err(()));
        assert_eq!(loader.load(&5), Ok(5));
    }
}
