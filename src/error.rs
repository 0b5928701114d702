//! Errors reported by `OrderedMap` and its cursors.

use thiserror::Error;

/// Failure of a checked map or cursor access.
///
/// Both kinds are deterministic and caused by the caller, so there is
/// nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum MapError {
    /// The requested key is not stored in the map.
    #[error("key not found")]
    KeyNotFound,
    /// The cursor is not positioned on any entry, which happens when it
    /// was created over an empty map.
    #[error("cursor is not positioned on an entry: the map is empty")]
    EmptyCollection,
}
