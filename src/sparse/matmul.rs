use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::error::{Result, SparseError};
use crate::sparse::coo::{SparseElement, SparseTensor};

/// Multiply a sparse `m×k` matrix by a dense `k×n` matrix.
///
/// # Errors
///
/// `ShapeMismatch` when the sparse operand is not 2-D or the inner
/// dimensions differ.
pub fn sparse_dense_matmul<T, S>(
    sparse: &SparseTensor<T>,
    dense: &ArrayBase<S, Ix2>,
) -> Result<Array2<T>>
where
    T: SparseElement,
    S: Data<Elem = T>,
{
    let (rows, inner) = match *sparse.shape() {
        [rows, inner] => (rows, inner),
        _ => return Err(SparseError::shape_mismatch("a 2-D sparse matrix", sparse.shape())),
    };
    if dense.nrows() != inner {
        return Err(SparseError::shape_mismatch(
            format!("a dense matrix with {} rows", inner),
            dense.shape(),
        ));
    }

    let mut out = Array2::zeros((rows, dense.ncols()));
    for (coord, value) in sparse.iter() {
        let mut out_row = out.row_mut(coord[0]);
        out_row.zip_mut_with(&dense.row(coord[1]), |acc, &x| *acc = *acc + value * x);
    }
    Ok(out)
}
