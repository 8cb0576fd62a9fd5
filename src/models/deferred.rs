//! Deferred-fetch state for lazily populated sub-resources.

use std::fmt;

use crate::error::ApiError;

/// A stored, zero-argument fetch that retrieves the current server-side value
/// of a sub-resource when invoked.
pub type FetchFn<T> = Box<dyn Fn() -> Result<Vec<T>, ApiError> + Send + Sync>;

/// The two states of a lazily populated sub-resource.
///
/// `Unresolved` means the matching populate operation was never called on
/// this item; reading the accessor fails with
/// [`ApiError::UnpopulatedProperty`]. `Resolved` holds the deferred fetch,
/// which is re-invoked on every access — results are never memoized, because
/// the underlying server-side data may change between reads.
///
/// Concurrent first access from multiple threads may issue duplicate
/// requests; the fetch is not a single-flight contract.
#[derive(Default)]
pub enum Deferred<T> {
    /// The populate operation has not been called.
    #[default]
    Unresolved,
    /// A fetch has been attached; each access invokes it.
    Resolved(FetchFn<T>),
}

impl<T> Deferred<T> {
    /// Invokes the stored fetch, or fails if the sub-resource was never
    /// populated. `property` names the accessor in the error.
    pub fn resolve(&self, property: &'static str) -> Result<Vec<T>, ApiError> {
        match self {
            Self::Unresolved => Err(ApiError::UnpopulatedProperty { property }),
            Self::Resolved(fetch) => fetch(),
        }
    }

    /// Installs a fetch, replacing any previous one. Last write wins.
    pub fn set(&mut self, fetch: FetchFn<T>) {
        *self = Self::Resolved(fetch);
    }

    /// Returns `true` once a fetch has been attached.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("Deferred::Unresolved"),
            Self::Resolved(_) => f.write_str("Deferred::Resolved(..)"),
        }
    }
}
