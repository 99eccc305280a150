//! `IndexTrailError`: unified error type for index-trail public APIs.
//!
//! Every fallible operation in the crate reports through this enum,
//! synchronously and without internal retries. Offending keys and
//! positions are carried as their `Debug` rendering so the error type
//! stays non-generic.

use thiserror::Error;

/// Unified error type for index-trail operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexTrailError {
    /// A selection was constructed from an array that is not one-dimensional.
    #[error("selection input must be one-dimensional, got {ndim} dimensions")]
    InvalidShape {
        /// Number of dimensions of the offending array.
        ndim: usize,
    },
    /// An array's dimensionality does not match the number of axis selections.
    #[error("array has {ndim} dimensions but {selections} axis selections were supplied")]
    AxisCountMismatch {
        /// Number of dimensions of the array.
        ndim: usize,
        /// Number of axis selections supplied.
        selections: usize,
    },
    /// An axis length does not match its selection's position-space size.
    #[error("axis {axis} has length {len} but its selection covers {expected} positions")]
    AxisLengthMismatch {
        /// Index of the mismatched axis.
        axis: usize,
        /// Length of the array along that axis.
        len: usize,
        /// Size of the selection supplied for that axis.
        expected: usize,
    },
    /// A dictionary coordinate's arity differs from the number of axis selections.
    #[error("coordinate has {found} components but {expected} axis selections were supplied")]
    CoordinateArity {
        /// Number of axis selections supplied.
        expected: usize,
        /// Number of components in the offending coordinate.
        found: usize,
    },
    /// Construction input repeats an original key.
    #[error("duplicate key `{0}` in selection input")]
    DuplicateKey(String),
    /// Construction input repeats a position.
    #[error("duplicate position `{0}` in selection input")]
    DuplicateValue(String),
    /// A lookup referenced a key absent from the relevant mapping.
    #[error("key `{0}` not found in selection")]
    KeyNotFound(String),
}
