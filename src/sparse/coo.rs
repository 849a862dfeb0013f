//! Core COO implementation: struct, construction, accessors, densify

use std::fmt::Debug;

use ndarray::{ArrayD, IxDyn};
use num_traits::{One, Zero};

use crate::error::{Result, SparseError};

/// Element types that can be stored in a [`SparseTensor`].
pub trait SparseElement: Copy + PartialEq + Zero + One + Debug {}

impl<T> SparseElement for T where T: Copy + PartialEq + Zero + One + Debug {}

/// What to do when two entries land on the same coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Duplicates {
    Reject,
    Sum,
}

/// Coordinate-list sparse tensor of rank 1 or 2.
///
/// Entries are unique and kept in row-major order, so two tensors holding the
/// same entries compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseTensor<T> {
    shape: Vec<usize>,
    /// Entry-major coordinates, `ndim` values per entry.
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: SparseElement> SparseTensor<T> {
    /// Create a sparse tensor from per-axis index lists.
    ///
    /// `indices` holds one list per axis, each as long as `values`, so the
    /// k-th entry sits at `(indices[0][k], indices[1][k])`.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` if the shape is not rank 1 or 2, or the index lists
    ///   do not line up with the shape and values
    /// - `IndexOutOfRange` if a coordinate exceeds the shape
    /// - `InvalidArgument` if a coordinate appears twice
    pub fn new(shape: Vec<usize>, indices: Vec<Vec<usize>>, values: Vec<T>) -> Result<Self> {
        check_rank(&shape)?;
        if indices.len() != shape.len() {
            return Err(SparseError::shape_mismatch(
                format!("{} index lists for shape {:?}", shape.len(), shape),
                &[indices.len()],
            ));
        }
        let nnz = values.len();
        if let Some(axis) = indices.iter().find(|axis| axis.len() != nnz) {
            return Err(SparseError::shape_mismatch(
                format!("{} coordinates per axis", nnz),
                &[axis.len()],
            ));
        }

        let mut entries = Vec::with_capacity(nnz);
        for (k, &value) in values.iter().enumerate() {
            let offset = ravel(&shape, indices.iter().map(|axis| axis[k]))?;
            entries.push((offset, value));
        }
        Self::assemble(shape, entries, Duplicates::Reject)
    }

    /// Create a 2-D sparse matrix from `(row, col, value)` triplets.
    pub fn from_triplets(
        shape: (usize, usize),
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        Self::new(vec![shape.0, shape.1], vec![rows, cols], values)
    }

    /// Create a sparse tensor from `(coordinate, value)` pairs, summing the
    /// values of repeated coordinates.
    pub fn from_coalesced<I>(shape: Vec<usize>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vec<usize>, T)>,
    {
        check_rank(&shape)?;
        let entries = entries
            .into_iter()
            .map(|(coord, value)| {
                if coord.len() != shape.len() {
                    return Err(SparseError::shape_mismatch(
                        format!("coordinates of length {}", shape.len()),
                        &coord,
                    ));
                }
                Ok((ravel(&shape, coord.into_iter())?, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::assemble(shape, entries, Duplicates::Sum)
    }

    /// Create a sparse tensor with no stored entries.
    pub fn empty(shape: Vec<usize>) -> Result<Self> {
        check_rank(&shape)?;
        checked_numel(&shape)?;
        Ok(Self {
            shape,
            indices: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Build a tensor from row-major linear offsets.
    ///
    /// Callers must only pass offsets below the shape's element count.
    pub(crate) fn assemble(
        shape: Vec<usize>,
        mut entries: Vec<(usize, T)>,
        duplicates: Duplicates,
    ) -> Result<Self> {
        check_rank(&shape)?;
        let numel = checked_numel(&shape)?;
        entries.sort_by_key(|&(offset, _)| offset);

        let mut merged: Vec<(usize, T)> = Vec::with_capacity(entries.len());
        for (offset, value) in entries {
            debug_assert!(offset < numel, "offset {} outside {:?}", offset, shape);
            match merged.last_mut() {
                Some(last) if last.0 == offset => match duplicates {
                    Duplicates::Sum => last.1 = last.1 + value,
                    Duplicates::Reject => {
                        let mut coord = Vec::with_capacity(shape.len());
                        unravel_into(offset, &shape, &mut coord);
                        return Err(SparseError::invalid_argument(
                            "indices",
                            format!("duplicate coordinate {:?}", coord),
                        ));
                    }
                },
                _ => merged.push((offset, value)),
            }
        }

        let mut indices = Vec::with_capacity(merged.len() * shape.len());
        let mut values = Vec::with_capacity(merged.len());
        for (offset, value) in merged {
            unravel_into(offset, &shape, &mut indices);
            values.push(value);
        }

        Ok(Self {
            shape,
            indices,
            values,
        })
    }

    /// Returns the value stored at `coord`, or zero when nothing is stored.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when `coord` has the wrong length, `IndexOutOfRange`
    /// when it falls outside the shape.
    pub fn get(&self, coord: &[usize]) -> Result<T> {
        if coord.len() != self.ndim() {
            return Err(SparseError::shape_mismatch(
                format!("coordinate of length {}", self.ndim()),
                coord,
            ));
        }
        for (&index, &size) in coord.iter().zip(&self.shape) {
            if index >= size {
                return Err(SparseError::IndexOutOfRange {
                    index: index as isize,
                    size,
                });
            }
        }

        let (mut lo, mut hi) = (0, self.nnz());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.coord(mid).cmp(coord) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Ok(self.values[mid]),
            }
        }
        Ok(T::zero())
    }

    /// Densify: every stored value at its coordinate, zero elsewhere.
    pub fn to_dense(&self) -> ArrayD<T> {
        let mut dense = ArrayD::zeros(IxDyn(&self.shape));
        for (coord, value) in self.iter() {
            dense[IxDyn(coord)] = value;
        }
        dense
    }

    /// Swap the two axes of a matrix.
    pub fn transpose(&self) -> Result<Self> {
        if self.ndim() != 2 {
            return Err(SparseError::shape_mismatch("a 2-D matrix", &self.shape));
        }
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let entries = self
            .iter()
            .map(|(coord, value)| (coord[1] * rows + coord[0], value))
            .collect();
        Self::assemble(vec![cols, rows], entries, Duplicates::Reject)
    }
}

impl<T> SparseTensor<T> {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Per-axis index lists, the same layout [`SparseTensor::new`] accepts.
    pub fn indices(&self) -> Vec<Vec<usize>> {
        (0..self.ndim())
            .map(|axis| self.coords().map(|coord| coord[axis]).collect())
            .collect()
    }

    /// Coordinates of the stored entries in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = &[usize]> + '_ {
        // chunks_exact(0) panics; a rank-0 tensor never gets constructed
        self.indices.chunks_exact(self.ndim().max(1))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], T)> + '_
    where
        T: Copy,
    {
        self.coords().zip(self.values.iter().copied())
    }

    #[inline]
    fn coord(&self, k: usize) -> &[usize] {
        let ndim = self.ndim();
        &self.indices[k * ndim..(k + 1) * ndim]
    }
}

pub(crate) fn check_rank(shape: &[usize]) -> Result<()> {
    match shape.len() {
        1 | 2 => Ok(()),
        _ => Err(SparseError::shape_mismatch("rank 1 or 2", shape)),
    }
}

/// Product of the dimensions, failing instead of overflowing.
pub(crate) fn checked_numel(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| {
            SparseError::invalid_argument(
                "shape",
                format!("{:?} has more elements than fit in usize", shape),
            )
        })
}

/// Row-major linear offset of a coordinate, with bounds checks.
pub(crate) fn ravel<I>(shape: &[usize], coord: I) -> Result<usize>
where
    I: Iterator<Item = usize>,
{
    let mut offset = 0usize;
    for (index, &size) in coord.zip(shape) {
        if index >= size {
            return Err(SparseError::IndexOutOfRange {
                index: index as isize,
                size,
            });
        }
        offset = offset * size + index;
    }
    Ok(offset)
}

fn unravel_into(mut offset: usize, shape: &[usize], out: &mut Vec<usize>) {
    let start = out.len();
    out.resize(start + shape.len(), 0);
    for (axis, &size) in shape.iter().enumerate().rev() {
        out[start + axis] = offset % size;
        offset /= size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_sorts_entries_row_major() {
        let t = SparseTensor::new(vec![3, 3], vec![vec![2, 0, 1], vec![0, 2, 1]], vec![7, 8, 9])
            .unwrap();
        assert_eq!(t.indices(), vec![vec![0, 1, 2], vec![2, 1, 0]]);
        assert_eq!(t.values(), &[8, 9, 7]);
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = SparseTensor::new(vec![2, 2], vec![vec![1, 1], vec![0, 0]], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, SparseError::InvalidArgument { arg: "indices", .. }));
    }

    #[test]
    fn new_rejects_out_of_bounds() {
        let err = SparseTensor::new(vec![2, 2], vec![vec![0], vec![2]], vec![1.0]).unwrap_err();
        assert_eq!(err, SparseError::IndexOutOfRange { index: 2, size: 2 });
    }

    #[test]
    fn new_rejects_bad_rank_and_lengths() {
        let err = SparseTensor::<f32>::new(vec![2, 2, 2], vec![vec![], vec![], vec![]], vec![])
            .unwrap_err();
        assert!(matches!(err, SparseError::ShapeMismatch { .. }));

        let err = SparseTensor::new(vec![2, 2], vec![vec![0, 1], vec![0]], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, SparseError::ShapeMismatch { .. }));
    }

    #[test]
    fn from_coalesced_sums_duplicates() {
        let t = SparseTensor::from_coalesced(
            vec![2, 2],
            vec![(vec![0, 1], 1.5), (vec![1, 0], 2.0), (vec![0, 1], 0.5)],
        )
        .unwrap();
        assert_eq!(t.nnz(), 2);
        assert_eq!(t.get(&[0, 1]).unwrap(), 2.0);
    }

    #[test]
    fn get_returns_zero_for_missing_entries() {
        let t = SparseTensor::from_triplets((2, 3), vec![0, 1], vec![2, 0], vec![5, 6]).unwrap();
        assert_eq!(t.get(&[0, 2]).unwrap(), 5);
        assert_eq!(t.get(&[1, 0]).unwrap(), 6);
        assert_eq!(t.get(&[1, 1]).unwrap(), 0);
        assert!(matches!(
            t.get(&[2, 0]),
            Err(SparseError::IndexOutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn to_dense_and_transpose() {
        let t = SparseTensor::from_triplets((2, 3), vec![0, 1], vec![2, 0], vec![5, 6]).unwrap();
        assert_eq!(t.to_dense(), array![[0, 0, 5], [6, 0, 0]].into_dyn());
        assert_eq!(
            t.transpose().unwrap().to_dense(),
            array![[0, 6], [0, 0], [5, 0]].into_dyn()
        );
    }

    #[test]
    fn empty_tensor_densifies_to_zeros() {
        let t = SparseTensor::<f64>::empty(vec![0, 4]).unwrap();
        assert_eq!(t.nnz(), 0);
        assert_eq!(t.to_dense().shape(), &[0, 4]);
    }
}
