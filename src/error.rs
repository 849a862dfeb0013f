//! Error types for sparse tensor operations.

use thiserror::Error;

/// Result type alias using [`SparseError`].
pub type Result<T> = std::result::Result<T, SparseError>;

/// Errors raised by the sparse utilities.
///
/// Every failure is reported at the call that triggers it; no operation
/// returns a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    /// A size, repeat count or other argument has an unusable value.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A coordinate or index falls outside the tensor's shape.
    #[error("Index {index} out of range for dimension of size {size}")]
    IndexOutOfRange {
        /// The requested index (as written by the caller, may be negative)
        index: isize,
        /// Size of the dimension being indexed
        size: usize,
    },

    /// The rank or shape of an operand does not fit the operation.
    #[error("Shape mismatch: expected {expected}, got {got:?}")]
    ShapeMismatch {
        /// Human-readable description of what was expected
        expected: String,
        /// The shape that was received
        got: Vec<usize>,
    },
}

impl SparseError {
    pub(crate) fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        SparseError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    pub(crate) fn shape_mismatch(expected: impl Into<String>, got: &[usize]) -> Self {
        SparseError::ShapeMismatch {
            expected: expected.into(),
            got: got.to_vec(),
        }
    }
}
