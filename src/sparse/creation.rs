//! Sparse constructors: identity and interpolation matrices

use ndarray::{ArrayBase, Data, Ix2};

use crate::error::{Result, SparseError};
use crate::sparse::coo::{Duplicates, SparseElement, SparseTensor};

/// n×n sparse identity matrix.
///
/// # Errors
///
/// `InvalidArgument` when `n` is zero.
pub fn sparse_eye<T: SparseElement>(n: usize) -> Result<SparseTensor<T>> {
    if n == 0 {
        return Err(SparseError::invalid_argument(
            "n",
            "identity size must be a positive integer",
        ));
    }
    let entries = (0..n).map(|i| (i * n + i, T::one())).collect();
    SparseTensor::assemble(vec![n, n], entries, Duplicates::Reject)
}

/// Build the `num_rows × n` interpolation matrix `W` from per-point
/// interpolation indices and weights.
///
/// Row `i` of `interp_indices`/`interp_values` describes data point `i`:
/// `W[interp_indices[[i, j]], i] += interp_values[[i, j]]` for every `j`.
/// Weights that target the same cell are summed.
///
/// # Errors
///
/// - `ShapeMismatch` if the index and value arrays differ in shape
/// - `IndexOutOfRange` if an interpolation index is `>= num_rows`
pub fn make_sparse_from_indices_and_values<T, S1, S2>(
    interp_indices: &ArrayBase<S1, Ix2>,
    interp_values: &ArrayBase<S2, Ix2>,
    num_rows: usize,
) -> Result<SparseTensor<T>>
where
    T: SparseElement,
    S1: Data<Elem = usize>,
    S2: Data<Elem = T>,
{
    if interp_indices.shape() != interp_values.shape() {
        return Err(SparseError::shape_mismatch(
            format!("interp_values with shape {:?}", interp_indices.shape()),
            interp_values.shape(),
        ));
    }

    let num_points = interp_indices.nrows();
    let mut entries = Vec::with_capacity(interp_indices.len());
    for (((point, _), &row), &weight) in interp_indices.indexed_iter().zip(interp_values.iter()) {
        if row >= num_rows {
            return Err(SparseError::IndexOutOfRange {
                index: row as isize,
                size: num_rows,
            });
        }
        entries.push((row * num_points + point, weight));
    }

    log::trace!(
        "interpolation matrix: {} points x {} weights -> ({}, {})",
        num_points,
        interp_indices.ncols(),
        num_rows,
        num_points
    );
    SparseTensor::assemble(vec![num_rows, num_points], entries, Duplicates::Sum)
}
