//! `Selection`: an order-preserving correspondence between an original
//! index space and the dense position space left by a filtration step.
//!
//! A selection is built once, from a boolean mask, an integer gather
//! array, or an arbitrary key sequence, and is immutable afterwards. It
//! answers both "where did original element `k` land?" (forward lookup)
//! and "which original element sits at position `j`?" (inverse lookup),
//! and selections compose left-to-right so a whole pipeline of filters
//! collapses into a single mapping back to the original space.
//!
//! ```rust
//! # fn try_main() -> Result<(), index_trail::error::IndexTrailError> {
//! use index_trail::selection::Selection;
//! use ndarray::array;
//!
//! let keep = array![true, false, true, true];
//! let sel = Selection::from_mask(&keep)?;
//! assert_eq!(sel.position(&2)?, 1);
//! assert_eq!(sel.inverse().position(&1)?, 2);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

use crate::bimap::{self, OrderedBimap};
use crate::bounds::KeyLike;
use crate::error::IndexTrailError;
use ndarray::{ArrayBase, Data, Dimension, Ix1};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Shr;

/// An injective, order-preserving mapping from original keys `K` to
/// selected positions `V`.
///
/// Directly constructed selections map into the dense positions
/// `0..n-1` (`V = usize`); [`inverse`](Self::inverse) and
/// [`then`](Self::then) produce selections whose position space is
/// whatever the construction chain dictates, including key-to-key maps.
#[derive(Clone)]
pub struct Selection<K = usize, V = usize> {
    map: OrderedBimap<K, V>,
    /// Original keys ordered by assigned position; computed at most once.
    index: OnceCell<Vec<K>>,
}

/// Reduce a possibly dynamic-dimension array to a 1-D view, reporting the
/// actual dimensionality on failure.
fn one_dimensional<A, S, D>(
    x: &ArrayBase<S, D>,
) -> Result<ndarray::ArrayView1<'_, A>, IndexTrailError>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = x.ndim();
    x.view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| IndexTrailError::InvalidShape { ndim })
}

impl Selection<usize, usize> {
    /// Build a selection from a boolean mask over the original space.
    ///
    /// The original keys are the positions where the mask is true, in
    /// ascending order; dense positions `0..k` are assigned in that same
    /// order. The index-array view is available immediately.
    ///
    /// # Errors
    /// Returns `Err(InvalidShape)` if `mask` is not one-dimensional.
    pub fn from_mask<S, D>(mask: &ArrayBase<S, D>) -> Result<Self, IndexTrailError>
    where
        S: Data<Elem = bool>,
        D: Dimension,
    {
        let flat = one_dimensional(mask)?;
        let keys: Vec<usize> = flat
            .iter()
            .enumerate()
            .filter_map(|(i, &kept)| kept.then_some(i))
            .collect();
        let map = OrderedBimap::from_pairs(keys.iter().copied().enumerate().map(|(j, i)| (i, j)))?;
        let index = OnceCell::new();
        let _ = index.set(keys);
        Ok(Self { map, index })
    }

    /// Build a selection from an integer gather array.
    ///
    /// The original keys are the array's elements in array order;
    /// position `j` goes to the `j`-th element. Order is significant and
    /// arbitrary; a repeated element violates injectivity.
    ///
    /// # Errors
    /// Returns `Err(InvalidShape)` if `indices` is not one-dimensional,
    /// or `Err(DuplicateKey)` if the gather repeats a value.
    pub fn from_indices<S, D>(indices: &ArrayBase<S, D>) -> Result<Self, IndexTrailError>
    where
        S: Data<Elem = usize>,
        D: Dimension,
    {
        let flat = one_dimensional(indices)?;
        let keys: Vec<usize> = flat.iter().copied().collect();
        let map = OrderedBimap::from_pairs(keys.iter().copied().enumerate().map(|(j, i)| (i, j)))?;
        let index = OnceCell::new();
        let _ = index.set(keys);
        Ok(Self { map, index })
    }
}

impl<K: KeyLike> Selection<K, usize> {
    /// Build a selection from an arbitrary sequence of keys.
    ///
    /// Positions are assigned densely in iteration order. Use this path
    /// for non-numeric keys or one-shot iterators that are not readily
    /// expressed as an array.
    ///
    /// ```rust
    /// # fn try_main() -> Result<(), index_trail::error::IndexTrailError> {
    /// use index_trail::selection::Selection;
    /// let sel = Selection::from_keys("abc".chars())?;
    /// assert_eq!(sel.position(&'c')?, 2);
    /// # Ok(())
    /// # }
    /// # try_main().unwrap();
    /// ```
    ///
    /// # Errors
    /// Returns `Err(DuplicateKey)` if the sequence repeats a key.
    pub fn from_keys<I>(keys: I) -> Result<Self, IndexTrailError>
    where
        I: IntoIterator<Item = K>,
    {
        let map = OrderedBimap::from_pairs(keys.into_iter().enumerate().map(|(j, k)| (k, j)))?;
        Ok(Self {
            map,
            index: OnceCell::new(),
        })
    }

    /// Compose with a selection built from a boolean mask over this
    /// selection's position space.
    ///
    /// Convenience for `self.then(&Selection::from_mask(mask)?)`, the
    /// common shape when chaining filtration steps.
    pub fn then_mask<S, D>(&self, mask: &ArrayBase<S, D>) -> Result<Selection<K, usize>, IndexTrailError>
    where
        S: Data<Elem = bool>,
        D: Dimension,
    {
        self.then(&Selection::from_mask(mask)?)
    }

    /// Compose with a selection built from an integer gather over this
    /// selection's position space.
    pub fn then_indices<S, D>(
        &self,
        indices: &ArrayBase<S, D>,
    ) -> Result<Selection<K, usize>, IndexTrailError>
    where
        S: Data<Elem = usize>,
        D: Dimension,
    {
        self.then(&Selection::from_indices(indices)?)
    }
}

impl<K: KeyLike, V: KeyLike> Selection<K, V> {
    /// Build a selection directly from `(key, position)` pairs.
    ///
    /// This is the mapping path used by [`inverse`](Self::inverse) and
    /// [`then`](Self::then); injectivity in both directions is still
    /// enforced.
    ///
    /// # Errors
    /// Returns `Err(DuplicateKey)` / `Err(DuplicateValue)` on a repeated
    /// key or position.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, IndexTrailError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Ok(Self {
            map: OrderedBimap::from_pairs(pairs)?,
            index: OnceCell::new(),
        })
    }

    /// Forward lookup: the position assigned to `key`.
    ///
    /// # Errors
    /// Returns `Err(KeyNotFound)` naming the key if it is absent.
    pub fn position(&self, key: &K) -> Result<V, IndexTrailError> {
        self.map
            .value_of(key)
            .cloned()
            .ok_or_else(|| IndexTrailError::KeyNotFound(format!("{key:?}")))
    }

    /// Batched forward lookup, broadcasting element-wise over `keys`.
    ///
    /// The whole call fails on the first absent key, naming it; no
    /// partial result is returned.
    pub fn positions<'a, I>(&self, keys: I) -> Result<Vec<V>, IndexTrailError>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().map(|k| self.position(k)).collect()
    }

    /// Non-failing forward lookup.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.value_of(key)
    }

    /// Non-failing inverse lookup: the original key at `position`.
    #[inline]
    pub fn original_key(&self, position: &V) -> Option<&K> {
        self.map.key_of(position)
    }

    /// Number of selected elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the selection keeps zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterator over `(key, position)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> bimap::Iter<'_, K, V> {
        self.map.iter()
    }

    /// The underlying ordered bidirectional map.
    #[inline]
    pub fn as_bimap(&self) -> &OrderedBimap<K, V> {
        &self.map
    }

    /// The inverse selection, with keys and positions swapped.
    ///
    /// The result is itself a [`Selection`], so inversion round-trips
    /// through the same type: `sel.inverse().inverse() == sel`.
    pub fn inverse(&self) -> Selection<V, K> {
        Selection {
            map: self.map.inverse(),
            index: OnceCell::new(),
        }
    }

    /// Compose this selection with a subsequent one.
    ///
    /// With `self` mapping the original space to an intermediate space
    /// and `other` mapping that intermediate space onward, the result
    /// maps the original space directly onto `other`'s position space:
    /// for every `(k, w)` in `other`, the pair
    /// `(self.original_key(k), w)` is emitted. Composition is
    /// associative but not commutative.
    ///
    /// Also available as the infix `>>` operator:
    /// `(&a >> &b)? == a.then(&b)?`.
    ///
    /// ```rust
    /// # fn try_main() -> Result<(), index_trail::error::IndexTrailError> {
    /// use index_trail::selection::Selection;
    /// let a = Selection::from_keys("abc".chars())?;
    /// let b = Selection::from_keys("def".chars())?;
    /// let renamed = a.then(&b.inverse())?;
    /// assert_eq!(renamed.position(&'a')?, 'd');
    /// assert_eq!(renamed.position(&'c')?, 'f');
    /// # Ok(())
    /// # }
    /// # try_main().unwrap();
    /// ```
    ///
    /// # Errors
    /// Returns `Err(KeyNotFound)` if any of `other`'s keys lies outside
    /// this selection's position space.
    pub fn then<W: KeyLike>(&self, other: &Selection<V, W>) -> Result<Selection<K, W>, IndexTrailError> {
        let mut pairs = Vec::with_capacity(other.len());
        for (mid, w) in other.iter() {
            let key = self
                .map
                .key_of(mid)
                .ok_or_else(|| IndexTrailError::KeyNotFound(format!("{mid:?}")))?;
            pairs.push((key.clone(), w.clone()));
        }
        Selection::from_pairs(pairs)
    }

    /// The dense array of original keys ordered by assigned position.
    ///
    /// For `K = usize` this is exactly the integer gather equivalent to
    /// the mask or index array the selection was built from, so
    /// `x.select(Axis(0), sel.index_array())` equals indexing `x` with
    /// that mask. Computed at most once: array-constructed selections
    /// carry it from construction, mapping-path selections derive it on
    /// first access.
    pub fn index_array(&self) -> &[K]
    where
        V: Ord,
    {
        self.index.get_or_init(|| {
            let mut pairs: Vec<(&K, &V)> = self.map.iter().collect();
            pairs.sort_by(|a, b| a.1.cmp(b.1));
            pairs.into_iter().map(|(k, _)| k.clone()).collect()
        })
    }
}

/// Infix "apply-then" composition: `&a >> &b` is `a.then(&b)`.
impl<K: KeyLike, V: KeyLike, W: KeyLike> Shr<&Selection<V, W>> for &Selection<K, V> {
    type Output = Result<Selection<K, W>, IndexTrailError>;

    fn shr(self, rhs: &Selection<V, W>) -> Self::Output {
        self.then(rhs)
    }
}

impl<'a, K: KeyLike, V: KeyLike> IntoIterator for &'a Selection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = bimap::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Equality compares the ordered pair sequences; the cached index array
/// is derived state.
impl<K: PartialEq, V: PartialEq> PartialEq for Selection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: Eq, V: Eq> Eq for Selection<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Selection<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selection").field(&self.map).finish()
    }
}

impl<K, V> Serialize for Selection<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for Selection<K, V>
where
    K: Deserialize<'de> + KeyLike,
    V: Deserialize<'de> + KeyLike,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            map: OrderedBimap::deserialize(deserializer)?,
            index: OnceCell::new(),
        })
    }
}
