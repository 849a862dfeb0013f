//! Coordinate-list sparse tensors and the utilities built on them.
//!
//! Dense inputs and outputs are `ndarray` arrays; [`SparseTensor`] is the only
//! sparse representation.
pub mod conversion;
pub mod coo;
pub mod creation;
pub mod indexing;
pub mod matmul;
pub mod repeat;
pub mod selector;

pub use conversion::{to_sparse, to_sparse_with_config, to_sparse_with_tolerance};
pub use coo::{SparseElement, SparseTensor};
pub use creation::{make_sparse_from_indices_and_values, sparse_eye};
pub use indexing::{sparse_get_scalar, sparse_get_tensor, sparse_getitem};
pub use matmul::sparse_dense_matmul;
pub use repeat::{sparse_repeat, sparse_repeat_with};
pub use selector::{Indexed, Selector, SparseIndex};
