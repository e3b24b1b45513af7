//! Sparse matmul descriptor

use super::{MatrixDescriptor, Operation};
use crate::dtype::ComputeType;
use crate::error::{Error, Result};
use crate::runtime::Handle;

/// The parts of a sparse matmul `D = op(A) · op(B) + C` that pruning reads
///
/// Only matrix A may be structured; prune and prune-check operate on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatmulDescriptor {
    handle_id: u64,
    op_a: Operation,
    matrix_a: MatrixDescriptor,
    compute_type: ComputeType,
}

impl MatmulDescriptor {
    /// Build a matmul descriptor around matrix A
    ///
    /// # Errors
    ///
    /// - `InvalidHandle` if `matrix_a` was created against another handle
    /// - `InvalidValue` if `compute_type` is not the one required by A's dtype
    pub fn new(
        handle: &impl Handle,
        op_a: Operation,
        matrix_a: MatrixDescriptor,
        compute_type: ComputeType,
    ) -> Result<Self> {
        if matrix_a.handle_id() != handle.handle_id() {
            return Err(Error::InvalidHandle {
                reason: "matrix A was created against a different handle",
            });
        }

        // Dtypes without a kernel are left for the operations to reject
        if let Some(required) = ComputeType::for_storage(matrix_a.dtype()) {
            if required != compute_type {
                return Err(Error::invalid_value(
                    "compute_type",
                    format!(
                        "{} storage requires {:?} compute, got {:?}",
                        matrix_a.dtype(),
                        required,
                        compute_type
                    ),
                ));
            }
        }

        Ok(Self {
            handle_id: handle.handle_id(),
            op_a,
            matrix_a,
            compute_type,
        })
    }

    /// Id of the handle this descriptor was created against
    #[inline]
    pub fn handle_id(&self) -> u64 {
        self.handle_id
    }

    /// Operation applied to A
    #[inline]
    pub fn op_a(&self) -> Operation {
        self.op_a
    }

    /// Matrix A
    #[inline]
    pub fn matrix_a(&self) -> &MatrixDescriptor {
        &self.matrix_a
    }

    /// Accumulation type
    #[inline]
    pub fn compute_type(&self) -> ComputeType {
        self.compute_type
    }
}
