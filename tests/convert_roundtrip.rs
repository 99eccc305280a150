use index_trail::convert::{array_to_dict, array_to_dict_1d, dict_to_array, dict_to_array_1d};
use index_trail::error::IndexTrailError;
use index_trail::selection::Selection;
use ndarray::{Array2, array};
use std::collections::HashMap;

#[test]
fn one_dimensional_round_trip_uses_no_fill() {
    let sel = Selection::from_keys("abcd".chars()).unwrap();
    let x = array![1.5, 2.5, 3.5, 4.5];
    let d = array_to_dict_1d(&x, &sel).unwrap();
    assert_eq!(d.len(), 4);
    assert_eq!(d[&'c'], 3.5);
    let back = dict_to_array_1d(&d, &sel, f64::NAN, false).unwrap();
    assert_eq!(back, x);
}

#[test]
fn two_dimensional_round_trip() {
    let rows = Selection::from_keys("abc".chars()).unwrap();
    let cols = Selection::from_keys("xy".chars()).unwrap();
    let x = Array2::from_shape_vec((3, 2), vec![1, 2, 3, 4, 5, 6]).unwrap();
    let d = array_to_dict(&x, &[&rows, &cols]).unwrap();
    assert_eq!(d.len(), 6);
    assert_eq!(d[&vec!['b', 'y']], 4);
    let back = dict_to_array(&d, &[&rows, &cols], 0, false).unwrap();
    assert_eq!(back, x.into_dyn());
}

#[test]
fn partial_coverage_fills_remaining_cells() {
    let rows = Selection::from_keys("abc".chars()).unwrap();
    let cols = Selection::from_keys("xyz".chars()).unwrap();
    let mut d = HashMap::new();
    d.insert(vec!['b', 'z'], 4.0);
    d.insert(vec!['a', 'y'], 3.0);
    let x = dict_to_array(&d, &[&rows, &cols], f64::NAN, false).unwrap();
    assert_eq!(x.shape(), &[3, 3]);
    assert_eq!(x[[0, 1]], 3.0);
    assert_eq!(x[[1, 2]], 4.0);
    let filled = x.iter().filter(|v| v.is_nan()).count();
    assert_eq!(filled, 7);
}

#[test]
fn selections_interpret_dense_positions() {
    // A mask selection keeps original positions 1 and 3; the dictionary
    // is keyed by those original positions, not by dense ones.
    let mask = array![false, true, false, true];
    let sel = Selection::from_mask(&mask).unwrap();
    let values = array![10.0, 20.0];
    let d = array_to_dict_1d(&values, &sel).unwrap();
    assert_eq!(d[&1], 10.0);
    assert_eq!(d[&3], 20.0);
}

#[test]
fn dimensionality_mismatch_is_rejected() {
    let rows = Selection::from_keys("abc".chars()).unwrap();
    let x = array![[1, 2, 3], [4, 5, 6]];
    let err = array_to_dict(&x, &[&rows]).unwrap_err();
    assert_eq!(
        err,
        IndexTrailError::AxisCountMismatch {
            ndim: 2,
            selections: 1
        }
    );
}

#[test]
fn axis_length_mismatch_is_rejected() {
    let rows = Selection::from_keys("ab".chars()).unwrap();
    let cols = Selection::from_keys("xyz".chars()).unwrap();
    let x = Array2::<i32>::zeros((2, 2));
    let err = array_to_dict(&x, &[&rows, &cols]).unwrap_err();
    assert_eq!(
        err,
        IndexTrailError::AxisLengthMismatch {
            axis: 1,
            len: 2,
            expected: 3
        }
    );
}

#[test]
fn missing_keys_fail_fast_by_default() {
    let rows = Selection::from_keys("ab".chars()).unwrap();
    let cols = Selection::from_keys("xy".chars()).unwrap();
    let mut d = HashMap::new();
    d.insert(vec!['a', 'q'], 1.0);
    let err = dict_to_array(&d, &[&rows, &cols], f64::NAN, false).unwrap_err();
    assert_eq!(err, IndexTrailError::KeyNotFound("'q'".into()));
}

#[test]
fn missing_keys_skipped_when_suppressed() {
    let rows = Selection::from_keys("ab".chars()).unwrap();
    let cols = Selection::from_keys("xy".chars()).unwrap();
    let mut d = HashMap::new();
    d.insert(vec!['a', 'x'], 1.0);
    d.insert(vec!['a', 'q'], 2.0);
    d.insert(vec!['z', 'y'], 3.0);
    let x = dict_to_array(&d, &[&rows, &cols], f64::NAN, true).unwrap();
    assert_eq!(x[[0, 0]], 1.0);
    assert_eq!(x.iter().filter(|v| v.is_nan()).count(), 3);
}

#[test]
fn composed_selection_feeds_conversion() {
    // Filter, then convert the filtered array back to original labels.
    let labels = Selection::from_keys("abcde".chars()).unwrap();
    let mask = array![true, false, true, false, true];
    let step = Selection::from_mask(&mask).unwrap();
    let composed = labels.then(&step).unwrap();
    // composed maps label -> dense filtered position for surviving labels
    let filtered = array![0.1, 0.2, 0.3];
    let d = array_to_dict_1d(&filtered, &composed).unwrap();
    assert_eq!(d[&'a'], 0.1);
    assert_eq!(d[&'c'], 0.2);
    assert_eq!(d[&'e'], 0.3);
}
