//! Tiling of sparse matrices.

use crate::config::{SparseConfig, ZeroRepeatPolicy};
use crate::error::{Result, SparseError};
use crate::sparse::coo::{checked_numel, Duplicates, SparseElement, SparseTensor};

/// Tile a sparse matrix `row_repeats` times vertically and `col_repeats`
/// times horizontally, like a dense `repeat(row_repeats, col_repeats)`.
///
/// A 1-D tensor of length n is treated as a 1×n matrix. Zero repeat counts
/// are rejected; use [`sparse_repeat_with`] to pick another policy.
pub fn sparse_repeat<T: SparseElement>(
    tensor: &SparseTensor<T>,
    row_repeats: usize,
    col_repeats: usize,
) -> Result<SparseTensor<T>> {
    sparse_repeat_with(tensor, row_repeats, col_repeats, &SparseConfig::default())
}

/// [`sparse_repeat`] with the zero-count behavior taken from `config`.
///
/// # Errors
///
/// - `InvalidArgument` for a zero count under [`ZeroRepeatPolicy::Reject`],
///   or when the tiled shape would overflow
/// - `ShapeMismatch` if the input is not rank 1 or 2
pub fn sparse_repeat_with<T: SparseElement>(
    tensor: &SparseTensor<T>,
    row_repeats: usize,
    col_repeats: usize,
    config: &SparseConfig,
) -> Result<SparseTensor<T>> {
    let (rows, cols) = match *tensor.shape() {
        [n] => (1, n),
        [rows, cols] => (rows, cols),
        _ => {
            return Err(SparseError::shape_mismatch(
                "a 1-D or 2-D tensor",
                tensor.shape(),
            ))
        }
    };

    if config.zero_repeat == ZeroRepeatPolicy::Reject {
        for (arg, count) in [("row_repeats", row_repeats), ("col_repeats", col_repeats)] {
            if count == 0 {
                return Err(SparseError::invalid_argument(
                    arg,
                    "repeat counts must be positive integers",
                ));
            }
        }
    }

    let overflow = || {
        SparseError::invalid_argument(
            "repeats",
            format!(
                "tiling ({}, {}) by ({}, {}) overflows",
                rows, cols, row_repeats, col_repeats
            ),
        )
    };
    let out_rows = rows.checked_mul(row_repeats).ok_or_else(overflow)?;
    let out_cols = cols.checked_mul(col_repeats).ok_or_else(overflow)?;
    let out_shape = vec![out_rows, out_cols];
    checked_numel(&out_shape)?;

    let mut entries = Vec::with_capacity(tensor.nnz() * row_repeats * col_repeats);
    for (coord, value) in tensor.iter() {
        // 1-D entries sit in row 0 of the promoted matrix
        let (r, c) = match *coord {
            [r, c] => (r, c),
            _ => (0, coord[0]),
        };
        for i in 0..row_repeats {
            let row = r + i * rows;
            for j in 0..col_repeats {
                entries.push((row * out_cols + c + j * cols, value));
            }
        }
    }

    log::trace!(
        "sparse_repeat: {:?} x ({}, {}) -> {:?}",
        tensor.shape(),
        row_repeats,
        col_repeats,
        out_shape
    );
    SparseTensor::assemble(out_shape, entries, Duplicates::Reject)
}
