//! Matrix and matmul descriptors
//!
//! Descriptors carry the attributes the prune operations read: dtype,
//! extents, leading dimension, order, operation and batch layout. They are
//! validated at construction and immutable afterwards.

mod matmul;
mod matrix;

pub use matmul::MatmulDescriptor;
pub use matrix::MatrixDescriptor;

/// Storage order of a matrix
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Consecutive elements of a column are adjacent
    #[default]
    ColumnMajor,
    /// Consecutive elements of a row are adjacent
    RowMajor,
}

/// Operation applied to a matrix before multiplication
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Use the matrix as stored
    #[default]
    NonTranspose,
    /// Use the transpose of the stored matrix
    Transpose,
}

/// Whether a matrix is dense or carries the 2:4 structured pattern
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatrixType {
    /// Ordinary dense matrix
    #[default]
    Dense,
    /// 2:4 structured-sparse matrix (the only kind that can be pruned)
    Structured,
}
