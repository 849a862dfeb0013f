//! gp-sparse: sparse matrix helpers for Gaussian-process modeling.
//!
//! This crate provides a small coordinate-list sparse tensor (rank 1 or 2)
//! together with the utilities GP code leans on: identity construction,
//! dense-style indexing, tiling, dense-to-sparse conversion, interpolation
//! matrix assembly and sparse × dense products.
//!
//! All operations are pure: they never modify their inputs and report
//! failures through [`SparseError`].
pub mod config;
pub mod error;
pub mod logging;
pub mod sparse;

pub use config::{SparseConfig, ZeroRepeatPolicy};
pub use error::{Result, SparseError};
pub use sparse::{
    make_sparse_from_indices_and_values, sparse_dense_matmul, sparse_eye, sparse_get_scalar,
    sparse_get_tensor, sparse_getitem, sparse_repeat, sparse_repeat_with, to_sparse,
    to_sparse_with_config, to_sparse_with_tolerance, Indexed, Selector, SparseElement,
    SparseIndex, SparseTensor,
};
