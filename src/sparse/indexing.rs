//! Indexed sub-selection with dense indexing semantics.

use crate::error::{Result, SparseError};
use crate::sparse::coo::{Duplicates, SparseElement, SparseTensor};
use crate::sparse::selector::{resolve_index, AxisSelection, Indexed, Selector, SparseIndex};

/// Select from a sparse tensor the way a dense array would be indexed.
///
/// Integer selectors drop their axis, ranges keep it (re-based to zero).
/// When every axis is addressed by an integer the stored value, or zero, is
/// returned as [`Indexed::Scalar`]; otherwise the selection is a new
/// [`SparseTensor`].
///
/// # Errors
///
/// - `IndexOutOfRange` if an integer selector lies outside its axis
/// - `ShapeMismatch` if a pair of selectors is applied to a 1-D tensor
pub fn sparse_getitem<T: SparseElement>(
    tensor: &SparseTensor<T>,
    index: &SparseIndex,
) -> Result<Indexed<T>> {
    let shape = tensor.shape();
    let selectors = match *index {
        SparseIndex::Single(selector) => {
            let mut selectors = vec![selector];
            selectors.resize(shape.len(), Selector::full());
            selectors
        }
        SparseIndex::Pair(rows, cols) => {
            if shape.len() != 2 {
                return Err(SparseError::shape_mismatch(
                    "a 2-D matrix for a pair of selectors",
                    shape,
                ));
            }
            vec![rows, cols]
        }
    };
    let selections = selectors
        .iter()
        .zip(shape)
        .map(|(selector, &size)| selector.resolve(size))
        .collect::<Result<Vec<_>>>()?;

    let out_shape: Vec<usize> = selections
        .iter()
        .filter_map(|selection| match selection {
            AxisSelection::Range(range) => Some(range.len()),
            AxisSelection::Index(_) => None,
        })
        .collect();

    if out_shape.is_empty() {
        let coord: Vec<usize> = selections
            .iter()
            .filter_map(|selection| match selection {
                AxisSelection::Index(i) => Some(*i),
                AxisSelection::Range(_) => None,
            })
            .collect();
        return tensor.get(&coord).map(Indexed::Scalar);
    }

    let mut entries = Vec::new();
    'entries: for (coord, value) in tensor.iter() {
        let mut offset = 0;
        for (selection, &c) in selections.iter().zip(coord) {
            match selection {
                AxisSelection::Index(i) => {
                    if c != *i {
                        continue 'entries;
                    }
                }
                AxisSelection::Range(range) => {
                    if !range.contains(&c) {
                        continue 'entries;
                    }
                    offset = offset * range.len() + (c - range.start);
                }
            }
        }
        entries.push((offset, value));
    }

    log::trace!(
        "sparse_getitem: {:?}[{:?}] -> {:?} with {} entries",
        shape,
        index,
        out_shape,
        entries.len()
    );
    SparseTensor::assemble(out_shape, entries, Duplicates::Reject).map(Indexed::Tensor)
}

/// The element at `(row, col)` of a matrix; negative indices count from the
/// end.
pub fn sparse_get_scalar<T: SparseElement>(
    tensor: &SparseTensor<T>,
    row: isize,
    col: isize,
) -> Result<T> {
    if tensor.ndim() != 2 {
        return Err(SparseError::shape_mismatch("a 2-D matrix", tensor.shape()));
    }
    let shape = tensor.shape();
    let coord = [resolve_index(row, shape[0])?, resolve_index(col, shape[1])?];
    tensor.get(&coord)
}

/// Like [`sparse_getitem`], but only for index expressions that keep at
/// least one axis.
///
/// # Errors
///
/// `InvalidArgument` when the index addresses a single element, in addition
/// to the errors of [`sparse_getitem`].
pub fn sparse_get_tensor<T: SparseElement>(
    tensor: &SparseTensor<T>,
    index: &SparseIndex,
) -> Result<SparseTensor<T>> {
    match sparse_getitem(tensor, index)? {
        Indexed::Tensor(selected) => Ok(selected),
        Indexed::Scalar(_) => Err(SparseError::invalid_argument(
            "index",
            format!("{:?} selects a single element; use sparse_get_scalar", index),
        )),
    }
}
