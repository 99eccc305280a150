//! # index-trail
//!
//! index-trail is a small Rust library for index bookkeeping across
//! selection pipelines. When array-like data is filtered, gathered, or
//! relabeled several times in a row, a [`Selection`](selection::Selection)
//! records which original elements survived and where they landed, so a
//! result in the final, fully-filtered space can be mapped back to its
//! original position in one O(1) lookup, and successive filtration steps
//! compose into a single equivalent selection.
//!
//! ## Features
//! - [`OrderedBimap`](bimap::OrderedBimap): an immutable, insertion-ordered
//!   bidirectional map with O(1) lookup in both directions
//! - [`Selection`](selection::Selection): construction from boolean masks,
//!   integer gathers, or arbitrary key sequences; inverse views;
//!   left-to-right composition (also as the infix `>>` operator)
//! - Index-array interop with [`ndarray`]: a selection's
//!   [`index_array`](selection::Selection::index_array) plugs directly into
//!   `select`-style integer indexing
//! - Batched array↔dictionary conversion across one selection per axis
//!   ([`convert`])
//!
//! ## Determinism
//!
//! All structures are immutable once built and every operation is a
//! finite, deterministic computation; tests that use randomized data fix
//! `SmallRng` seeds explicitly.
//!
//! ## Usage
//! ```rust
//! # fn try_main() -> Result<(), index_trail::error::IndexTrailError> {
//! use index_trail::prelude::*;
//! use ndarray::{array, Axis};
//!
//! let x = array![3.0, 1.0, 4.0, 1.0, 5.0];
//! let keep = x.mapv(|v| v > 2.0);
//! let sel = Selection::from_mask(&keep)?;
//!
//! // The selection doubles as the integer gather equivalent to the mask.
//! let filtered = x.select(Axis(0), sel.index_array());
//! assert_eq!(filtered, array![3.0, 4.0, 5.0]);
//!
//! // Position 2 of the filtered array came from original position 4.
//! assert_eq!(sel.inverse().position(&2)?, 4);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

pub mod bimap;
pub mod bounds;
pub mod convert;
pub mod debug_invariants;
pub mod error;
pub mod selection;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::bimap::OrderedBimap;
    pub use crate::bounds::KeyLike;
    pub use crate::convert::{array_to_dict, array_to_dict_1d, dict_to_array, dict_to_array_1d};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::error::IndexTrailError;
    pub use crate::selection::Selection;
}
