//! `OrderedBimap`: an insertion-ordered, injective key/value correspondence.
//!
//! The map stores a finite one-to-one correspondence between keys and
//! values with O(1) lookup in both directions. Insertion order is
//! preserved and semantically meaningful: iteration always yields pairs
//! in the order they were supplied at construction, which is what lets a
//! [`Selection`](crate::selection::Selection) treat the pair sequence as
//! its dense position ordering.
//!
//! # Invariants
//!
//! - No key appears twice and no value appears twice (injective both ways).
//! - `fwd` and `inv` index exactly the entries of `pairs`.
//! - The map is immutable after construction.
//!
//! These invariants are established by [`from_pairs`](OrderedBimap::from_pairs)
//! and checked in debug builds (and under the `check-invariants` feature).
//! They can also be verified manually via
//! [`validate_invariants`](crate::DebugInvariants::validate_invariants).

use crate::bounds::KeyLike;
use crate::debug_invariants::DebugInvariants;
use crate::error::IndexTrailError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An immutable, insertion-ordered bidirectional map.
///
/// Both directions resolve in O(1) on the *same* instance: the pair list
/// is the single source of truth and the two hash maps only hold indices
/// into it, so two-way lookup costs no data duplication. A first-class
/// transposed instance is available via [`inverse`](Self::inverse).
#[derive(Clone)]
pub struct OrderedBimap<K, V> {
    /// `(key, value)` pairs in insertion order.
    pairs: Vec<(K, V)>,
    /// Key to index into `pairs`.
    fwd: HashMap<K, usize>,
    /// Value to index into `pairs`.
    inv: HashMap<V, usize>,
}

impl<K: KeyLike, V: KeyLike> OrderedBimap<K, V> {
    /// Build a map from an ordered sequence of `(key, value)` pairs.
    ///
    /// # Errors
    /// Returns `Err(DuplicateKey)` if any key repeats, or
    /// `Err(DuplicateValue)` if any value repeats. The first offender in
    /// input order is reported.
    ///
    /// # Complexity
    /// **O(n)** expected; lookups afterwards are **O(1)**.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, IndexTrailError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let iter = pairs.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out = Self {
            pairs: Vec::with_capacity(lower),
            fwd: HashMap::with_capacity(lower),
            inv: HashMap::with_capacity(lower),
        };
        for (k, v) in iter {
            if out.fwd.contains_key(&k) {
                return Err(IndexTrailError::DuplicateKey(format!("{k:?}")));
            }
            if out.inv.contains_key(&v) {
                return Err(IndexTrailError::DuplicateValue(format!("{v:?}")));
            }
            let slot = out.pairs.len();
            out.fwd.insert(k.clone(), slot);
            out.inv.insert(v.clone(), slot);
            out.pairs.push((k, v));
        }
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        out.debug_assert_invariants();
        Ok(out)
    }

    /// Forward lookup: the value associated with `key`.
    #[inline]
    pub fn value_of(&self, key: &K) -> Option<&V> {
        self.fwd.get(key).map(|&i| &self.pairs[i].1)
    }

    /// Inverse lookup: the key associated with `value`.
    #[inline]
    pub fn key_of(&self, value: &V) -> Option<&K> {
        self.inv.get(value).map(|&i| &self.pairs[i].0)
    }

    /// Returns true iff `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.fwd.contains_key(key)
    }

    /// Returns true iff `value` is present.
    #[inline]
    pub fn contains_value(&self, value: &V) -> bool {
        self.inv.contains_key(value)
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.fwd.len(), self.pairs.len());
        self.pairs.len()
    }

    /// Whether the map has zero pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterator over `(key, value)` pairs in insertion order.
    ///
    /// Restartable: each call starts a fresh pass over the same sequence.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.pairs.iter(),
        }
    }

    /// Iterator over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.pairs.iter().map(|(k, _)| k)
    }

    /// Iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.pairs.iter().map(|(_, v)| v)
    }

    /// Materialize the transposed map (values become keys and vice versa).
    ///
    /// The result is a first-class `OrderedBimap<V, K>` preserving pair
    /// order; transposing twice yields a map equal to the original.
    ///
    /// # Complexity
    /// **O(n)**. For two-way lookup on one instance, prefer
    /// [`value_of`](Self::value_of) / [`key_of`](Self::key_of), which need
    /// no transposition at all.
    pub fn inverse(&self) -> OrderedBimap<V, K> {
        let pairs: Vec<(V, K)> = self
            .pairs
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();
        let fwd = pairs
            .iter()
            .enumerate()
            .map(|(i, (v, _))| (v.clone(), i))
            .collect();
        let inv = pairs
            .iter()
            .enumerate()
            .map(|(i, (_, k))| (k.clone(), i))
            .collect();
        OrderedBimap { pairs, fwd, inv }
    }
}

/// Borrowing iterator over the pairs of an [`OrderedBimap`].
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: KeyLike, V: KeyLike> IntoIterator for &'a OrderedBimap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Equality compares the ordered pair sequences; the hash maps are
/// derived state.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedBimap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl<K: Eq, V: Eq> Eq for OrderedBimap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedBimap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.pairs.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Serializes as the ordered pair list.
impl<K, V> Serialize for OrderedBimap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.pairs.iter().map(|(k, v)| (k, v)))
    }
}

/// Deserializes the pair list and re-runs construction validation, so a
/// corrupt payload (duplicate key or value) is rejected rather than
/// admitted as an inconsistent map.
impl<'de, K, V> Deserialize<'de> for OrderedBimap<K, V>
where
    K: Deserialize<'de> + KeyLike,
    V: Deserialize<'de> + KeyLike,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs: Vec<(K, V)> = Vec::deserialize(deserializer)?;
        OrderedBimap::from_pairs(pairs).map_err(serde::de::Error::custom)
    }
}

impl<K: KeyLike, V: KeyLike> DebugInvariants for OrderedBimap<K, V> {
    fn debug_assert_invariants(&self) {
        crate::trail_debug_assert_ok!(self.validate_invariants(), "OrderedBimap invalid");
    }

    fn validate_invariants(&self) -> Result<(), IndexTrailError> {
        // Both directions must point each pair back at its own slot; a
        // duplicate key or value in `pairs` shows up here as a slot clash.
        for (slot, (k, v)) in self.pairs.iter().enumerate() {
            match self.fwd.get(k) {
                Some(&i) if i == slot => {}
                _ => return Err(IndexTrailError::DuplicateKey(format!("{k:?}"))),
            }
            match self.inv.get(v) {
                Some(&i) if i == slot => {}
                _ => return Err(IndexTrailError::DuplicateValue(format!("{v:?}"))),
            }
        }
        // Neither direction may index entries beyond the pair list
        // (ALWAYS check both directions).
        if self.fwd.len() != self.pairs.len() {
            let keys: std::collections::HashSet<_> = self.pairs.iter().map(|(k, _)| k).collect();
            if let Some(k) = self.fwd.keys().find(|k| !keys.contains(k)) {
                return Err(IndexTrailError::DuplicateKey(format!("{k:?}")));
            }
        }
        if self.inv.len() != self.pairs.len() {
            let values: std::collections::HashSet<_> = self.pairs.iter().map(|(_, v)| v).collect();
            if let Some(v) = self.inv.keys().find(|v| !values.contains(v)) {
                return Err(IndexTrailError::DuplicateValue(format!("{v:?}")));
            }
        }
        Ok(())
    }
}
