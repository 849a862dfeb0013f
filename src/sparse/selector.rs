//! Index expressions accepted by `sparse_getitem`.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{Result, SparseError};
use crate::sparse::coo::SparseTensor;

/// Selection along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// One position; negative values count from the end. Drops the axis.
    Index(isize),
    /// Half-open `start..end` slice with clamping, like a dense slice.
    /// `None` means "from the beginning" / "to the end". Keeps the axis.
    Range {
        start: Option<isize>,
        end: Option<isize>,
    },
}

impl Selector {
    /// The whole axis (`:`).
    pub fn full() -> Self {
        Selector::Range {
            start: None,
            end: None,
        }
    }

    pub fn range(start: isize, end: isize) -> Self {
        Selector::Range {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolve against an axis of length `size`.
    pub(crate) fn resolve(&self, size: usize) -> Result<AxisSelection> {
        match *self {
            Selector::Index(index) => resolve_index(index, size).map(AxisSelection::Index),
            Selector::Range { start, end } => {
                let start = start.map_or(0, |s| clamp_bound(s, size));
                let end = end.map_or(size, |e| clamp_bound(e, size));
                Ok(AxisSelection::Range(start..end.max(start)))
            }
        }
    }
}

/// Resolve a possibly negative position against an axis of length `size`.
pub(crate) fn resolve_index(index: isize, size: usize) -> Result<usize> {
    let resolved = if index < 0 {
        index + size as isize
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= size {
        return Err(SparseError::IndexOutOfRange { index, size });
    }
    Ok(resolved as usize)
}

/// Positions above `isize::MAX` saturate; every axis is shorter than that, so
/// they still resolve out of range (or clamp to the axis end in a slice).
fn saturating_isize(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

fn clamp_bound(bound: isize, size: usize) -> usize {
    if bound < 0 {
        (bound + size as isize).max(0) as usize
    } else {
        (bound as usize).min(size)
    }
}

impl From<isize> for Selector {
    fn from(index: isize) -> Self {
        Selector::Index(index)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Index(saturating_isize(index))
    }
}

impl From<Range<usize>> for Selector {
    fn from(range: Range<usize>) -> Self {
        Selector::range(saturating_isize(range.start), saturating_isize(range.end))
    }
}

impl From<RangeFrom<usize>> for Selector {
    fn from(range: RangeFrom<usize>) -> Self {
        Selector::Range {
            start: Some(saturating_isize(range.start)),
            end: None,
        }
    }
}

impl From<RangeTo<usize>> for Selector {
    fn from(range: RangeTo<usize>) -> Self {
        Selector::Range {
            start: None,
            end: Some(saturating_isize(range.end)),
        }
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Selector::full()
    }
}

/// A selector resolved against a concrete axis length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AxisSelection {
    Index(usize),
    Range(Range<usize>),
}

/// An index expression over a whole tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseIndex {
    /// Selects along the first axis; remaining axes are kept whole.
    Single(Selector),
    /// Selects along both axes of a matrix.
    Pair(Selector, Selector),
}

impl SparseIndex {
    pub fn single(selector: impl Into<Selector>) -> Self {
        SparseIndex::Single(selector.into())
    }

    pub fn pair(rows: impl Into<Selector>, cols: impl Into<Selector>) -> Self {
        SparseIndex::Pair(rows.into(), cols.into())
    }
}

impl From<Selector> for SparseIndex {
    fn from(selector: Selector) -> Self {
        SparseIndex::Single(selector)
    }
}

impl<A: Into<Selector>, B: Into<Selector>> From<(A, B)> for SparseIndex {
    fn from((rows, cols): (A, B)) -> Self {
        SparseIndex::pair(rows, cols)
    }
}

/// Result of indexing: a tensor when at least one axis survives, otherwise
/// the scalar at the addressed coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Indexed<T> {
    Tensor(SparseTensor<T>),
    Scalar(T),
}

impl<T> Indexed<T> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Indexed::Scalar(_))
    }

    pub fn into_tensor(self) -> Option<SparseTensor<T>> {
        match self {
            Indexed::Tensor(tensor) => Some(tensor),
            Indexed::Scalar(_) => None,
        }
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            Indexed::Scalar(value) => Some(value),
            Indexed::Tensor(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_resolves_negative_positions() {
        assert_eq!(Selector::Index(-1).resolve(5).unwrap(), AxisSelection::Index(4));
        assert_eq!(Selector::Index(0).resolve(5).unwrap(), AxisSelection::Index(0));
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(
            Selector::Index(5).resolve(5).unwrap_err(),
            SparseError::IndexOutOfRange { index: 5, size: 5 }
        );
        assert_eq!(
            Selector::Index(-6).resolve(5).unwrap_err(),
            SparseError::IndexOutOfRange { index: -6, size: 5 }
        );
    }

    #[test]
    fn range_clamps_like_dense_slices() {
        assert_eq!(Selector::full().resolve(4).unwrap(), AxisSelection::Range(0..4));
        assert_eq!(Selector::range(1, 10).resolve(4).unwrap(), AxisSelection::Range(1..4));
        assert_eq!(Selector::range(-3, -1).resolve(4).unwrap(), AxisSelection::Range(1..3));
        assert_eq!(Selector::range(3, 1).resolve(4).unwrap(), AxisSelection::Range(3..3));
        assert_eq!(Selector::range(-10, 2).resolve(4).unwrap(), AxisSelection::Range(0..2));
    }

    #[test]
    fn huge_unsigned_positions_do_not_wrap() {
        assert_eq!(Selector::from(usize::MAX), Selector::Index(isize::MAX));
        assert_eq!(
            Selector::from(usize::MAX).resolve(5).unwrap_err(),
            SparseError::IndexOutOfRange {
                index: isize::MAX,
                size: 5
            }
        );
        assert_eq!(
            Selector::from(0usize..usize::MAX).resolve(5).unwrap(),
            AxisSelection::Range(0..5)
        );
        assert_eq!(
            Selector::from(..usize::MAX).resolve(5).unwrap(),
            AxisSelection::Range(0..5)
        );
        assert_eq!(
            Selector::from(usize::MAX..).resolve(5).unwrap(),
            AxisSelection::Range(5..5)
        );
    }

    #[test]
    fn conversions_from_std_ranges() {
        assert_eq!(Selector::from(2usize..4), Selector::range(2, 4));
        assert_eq!(Selector::from(..), Selector::full());
        assert_eq!(
            SparseIndex::from((1usize, ..)),
            SparseIndex::Pair(Selector::Index(1), Selector::full())
        );
    }
}
