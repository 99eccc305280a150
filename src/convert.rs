//! Batched conversion between dense arrays and original-space dictionaries.
//!
//! One selection per array axis interprets dense positions along that
//! axis as coordinates in the original space. [`array_to_dict`] reads an
//! array out into a coordinate-keyed map; [`dict_to_array`] scatters such
//! a map back into a dense array, pre-filled with a caller-supplied fill
//! value so uncovered coordinates read as "no data". The `_1d` variants
//! cover the common one-dimensional case with bare (unwrapped) keys.

use crate::bounds::KeyLike;
use crate::error::IndexTrailError;
use crate::selection::Selection;
use itertools::Itertools;
use ndarray::{Array1, ArrayBase, ArrayD, Data, Dimension, Ix1, IxDyn};
use std::collections::HashMap;

/// Check that `x` has one selection per axis and that each axis length
/// matches its selection's position-space size.
fn check_axes<K: KeyLike>(
    shape: &[usize],
    axes: &[&Selection<K>],
) -> Result<(), IndexTrailError> {
    if shape.len() != axes.len() {
        return Err(IndexTrailError::AxisCountMismatch {
            ndim: shape.len(),
            selections: axes.len(),
        });
    }
    for (axis, (&len, sel)) in shape.iter().zip(axes).enumerate() {
        if len != sel.len() {
            return Err(IndexTrailError::AxisLengthMismatch {
                axis,
                len,
                expected: sel.len(),
            });
        }
    }
    Ok(())
}

/// Convert an N-dimensional array into a map from original-space
/// coordinates to values.
///
/// Every cell's dense position along each axis is translated back to
/// that axis selection's original key, yielding one
/// `coordinate -> value` entry per array element. No ordering of the
/// result is guaranteed.
///
/// # Errors
/// Returns `Err(AxisCountMismatch)` if `x.ndim() != axes.len()`, or
/// `Err(AxisLengthMismatch)` if any axis length differs from its
/// selection's size.
pub fn array_to_dict<A, S, D, K>(
    x: &ArrayBase<S, D>,
    axes: &[&Selection<K>],
) -> Result<HashMap<Vec<K>, A>, IndexTrailError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
    K: KeyLike,
{
    check_axes(x.shape(), axes)?;
    let view = x.view().into_dyn();
    let mut out = HashMap::with_capacity(view.len());
    for (idx, value) in view.indexed_iter() {
        let coord: Vec<K> = axes
            .iter()
            .enumerate()
            .map(|(axis, sel)| {
                sel.original_key(&idx[axis])
                    .cloned()
                    .ok_or_else(|| IndexTrailError::KeyNotFound(format!("{:?}", idx[axis])))
            })
            .try_collect()?;
        out.insert(coord, value.clone());
    }
    Ok(out)
}

/// One-dimensional [`array_to_dict`] with bare (squeezed) keys.
///
/// # Errors
/// Returns `Err(InvalidShape)` if `x` is not one-dimensional, or
/// `Err(AxisLengthMismatch)` if its length differs from the selection's
/// size.
pub fn array_to_dict_1d<A, S, D, K>(
    x: &ArrayBase<S, D>,
    sel: &Selection<K>,
) -> Result<HashMap<K, A>, IndexTrailError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
    K: KeyLike,
{
    let ndim = x.ndim();
    let flat = x
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| IndexTrailError::InvalidShape { ndim })?;
    check_axes(&[flat.len()], &[sel])?;
    flat.indexed_iter()
        .map(|(i, value)| {
            let key = sel
                .original_key(&i)
                .cloned()
                .ok_or_else(|| IndexTrailError::KeyNotFound(format!("{i:?}")))?;
            Ok((key, value.clone()))
        })
        .collect()
}

/// Scatter a map of original-space coordinates into a dense
/// N-dimensional array.
///
/// The array's shape is one axis per selection, sized by that
/// selection's position-space size, and every cell starts as `fill`.
/// Each coordinate is translated key-by-key through the axis selections'
/// forward lookups and its value written at the resolved positions.
///
/// # Errors
/// Returns `Err(CoordinateArity)` if a coordinate's component count
/// differs from the number of axes, and `Err(KeyNotFound)` on the first
/// coordinate key absent from its axis selection. With `ignore_missing`
/// set, such entries are skipped without writing anything instead. Any
/// error aborts the whole conversion.
pub fn dict_to_array<A, K>(
    map: &HashMap<Vec<K>, A>,
    axes: &[&Selection<K>],
    fill: A,
    ignore_missing: bool,
) -> Result<ArrayD<A>, IndexTrailError>
where
    A: Clone,
    K: KeyLike,
{
    let shape: Vec<usize> = axes.iter().map(|sel| sel.len()).collect();
    let mut out = ArrayD::from_elem(IxDyn(&shape), fill);
    let mut skipped = 0usize;
    'entries: for (coord, value) in map {
        if coord.len() != axes.len() {
            return Err(IndexTrailError::CoordinateArity {
                expected: axes.len(),
                found: coord.len(),
            });
        }
        let mut pos = Vec::with_capacity(axes.len());
        for (key, sel) in coord.iter().zip(axes) {
            match sel.get(key) {
                Some(&p) => pos.push(p),
                None if ignore_missing => {
                    skipped += 1;
                    continue 'entries;
                }
                None => return Err(IndexTrailError::KeyNotFound(format!("{key:?}"))),
            }
        }
        out[IxDyn(&pos)] = value.clone();
    }
    if skipped > 0 {
        log::trace!("dict_to_array: skipped {skipped} entries with keys outside the axis selections");
    }
    Ok(out)
}

/// One-dimensional [`dict_to_array`] with bare (squeezed) keys.
///
/// # Errors
/// As [`dict_to_array`], minus the arity check (keys are scalar here).
pub fn dict_to_array_1d<A, K>(
    map: &HashMap<K, A>,
    sel: &Selection<K>,
    fill: A,
    ignore_missing: bool,
) -> Result<Array1<A>, IndexTrailError>
where
    A: Clone,
    K: KeyLike,
{
    let mut out = Array1::from_elem(sel.len(), fill);
    let mut skipped = 0usize;
    for (key, value) in map {
        match sel.get(key) {
            Some(&p) => out[p] = value.clone(),
            None if ignore_missing => skipped += 1,
            None => return Err(IndexTrailError::KeyNotFound(format!("{key:?}"))),
        }
    }
    if skipped > 0 {
        log::trace!("dict_to_array_1d: skipped {skipped} entries with keys outside the selection");
    }
    Ok(out)
}
