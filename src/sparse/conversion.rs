//! Dense to sparse conversion

use ndarray::{ArrayBase, Data, Dimension};
use num_traits::{Float, NumCast};

use crate::config::SparseConfig;
use crate::error::{Result, SparseError};
use crate::sparse::coo::{check_rank, Duplicates, SparseElement, SparseTensor};

/// Convert a dense 1-D or 2-D array into a sparse tensor holding exactly its
/// non-zero entries.
///
/// # Errors
///
/// `ShapeMismatch` when the array is not rank 1 or 2.
pub fn to_sparse<T, S, D>(dense: &ArrayBase<S, D>) -> Result<SparseTensor<T>>
where
    T: SparseElement,
    S: Data<Elem = T>,
    D: Dimension,
{
    collect_entries(dense, |value| value != T::zero())
}

/// Like [`to_sparse`], but entries with `|v| <= tolerance` are dropped too.
/// NaN entries are kept.
///
/// # Errors
///
/// `InvalidArgument` for a negative or non-finite tolerance, plus the errors
/// of [`to_sparse`].
pub fn to_sparse_with_tolerance<T, S, D>(
    dense: &ArrayBase<S, D>,
    tolerance: T,
) -> Result<SparseTensor<T>>
where
    T: SparseElement + Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    if !tolerance.is_finite() || tolerance < T::zero() {
        return Err(SparseError::invalid_argument(
            "tolerance",
            format!("must be finite and non-negative, got {:?}", tolerance),
        ));
    }
    collect_entries(dense, |value| !(value.abs() <= tolerance))
}

/// [`to_sparse_with_tolerance`] using `config.drop_tolerance`.
pub fn to_sparse_with_config<T, S, D>(
    dense: &ArrayBase<S, D>,
    config: &SparseConfig,
) -> Result<SparseTensor<T>>
where
    T: SparseElement + Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    let tolerance = <T as NumCast>::from(config.drop_tolerance).ok_or_else(|| {
        SparseError::invalid_argument(
            "drop_tolerance",
            format!("{} is not representable in the element type", config.drop_tolerance),
        )
    })?;
    to_sparse_with_tolerance(dense, tolerance)
}

fn collect_entries<T, S, D, F>(dense: &ArrayBase<S, D>, keep: F) -> Result<SparseTensor<T>>
where
    T: SparseElement,
    S: Data<Elem = T>,
    D: Dimension,
    F: Fn(T) -> bool,
{
    let shape = dense.shape().to_vec();
    check_rank(&shape)?;

    // `iter` walks logical row-major order whatever the memory layout, so the
    // enumeration index is the linear offset.
    let entries: Vec<(usize, T)> = dense
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, value)| keep(value))
        .collect();

    log::debug!(
        "to_sparse: {:?} dense -> {} non-zero entries",
        shape,
        entries.len()
    );
    SparseTensor::assemble(shape, entries, Duplicates::Reject)
}
