//! Common bound aliases used across the crate.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds will automatically implement them. They are zero-cost and only
//! reduce duplication in `where` clauses.

/// Canonical bound set for keys and positions in a selection.
///
/// Rationale:
/// - `Eq + Hash` for the `HashMap`-backed lookup in both directions
/// - `Clone` so pairs can be re-emitted by `inverse` and composition
/// - `Debug` for diagnostics and error messages naming the offending key
pub trait KeyLike: Clone + Eq + std::hash::Hash + std::fmt::Debug {}
impl<T> KeyLike for T where T: Clone + Eq + std::hash::Hash + std::fmt::Debug {}
