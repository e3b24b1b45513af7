//! Argument validation shared by every backend's prune operations

use crate::buffer::DeviceBuffer;
use crate::descriptor::{MatmulDescriptor, MatrixType};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::prune::{PruneAlgorithm, StridedView};
use crate::runtime::{Handle, Runtime};

/// Everything a kernel launch needs once the arguments are accepted
#[derive(Clone, Copy, Debug)]
pub(crate) struct PruneLaunch {
    pub dtype: DType,
    pub view: StridedView,
    /// Linear element bound, clamped to the buffers actually passed
    pub bound: usize,
}

/// Second buffer of an operation: prune output or check flag
pub(crate) enum Target<'a, R: Runtime> {
    Output(&'a DeviceBuffer<R>, PruneAlgorithm),
    Flag(&'a DeviceBuffer<R>),
}

impl<R: Runtime> Target<'_, R> {
    fn buffer(&self) -> &DeviceBuffer<R> {
        match self {
            Self::Output(buf, _) | Self::Flag(buf) => buf,
        }
    }

    fn arg(&self) -> &'static str {
        match self {
            Self::Output(..) => "output",
            Self::Flag(_) => "result",
        }
    }
}

/// Validate a prune or prune-check call in the documented order
pub(crate) fn validate<R: Runtime>(
    handle: &impl Handle,
    matmul: &MatmulDescriptor,
    input: &DeviceBuffer<R>,
    target: Target<'_, R>,
) -> Result<PruneLaunch> {
    if matmul.handle_id() != handle.handle_id() {
        return Err(Error::InvalidHandle {
            reason: "descriptor was created against a different handle",
        });
    }

    if input.is_null() {
        return Err(Error::InvalidPointer { arg: "input" });
    }
    if target.buffer().is_null() {
        return Err(Error::InvalidPointer { arg: target.arg() });
    }

    if let Target::Output(_, alg) = target {
        if alg != PruneAlgorithm::Strip {
            return Err(Error::not_implemented("prune algorithm other than strip"));
        }
    }

    let matrix = matmul.matrix_a();
    if matrix.matrix_type() != MatrixType::Structured {
        return Err(Error::not_implemented("pruning a non-structured matrix"));
    }

    let dtype = matrix.dtype();
    if !dtype.is_prunable() {
        return Err(Error::not_implemented("pruning this dtype"));
    }

    if input.dtype() != dtype {
        return Err(Error::DTypeMismatch {
            lhs: dtype,
            rhs: input.dtype(),
        });
    }

    let view = StridedView::resolve(matrix, matmul.op_a());
    let bound = match target {
        Target::Output(output, _) => {
            if output.dtype() != dtype {
                return Err(Error::DTypeMismatch {
                    lhs: dtype,
                    rhs: output.dtype(),
                });
            }
            view.bound.min(input.len()).min(output.len())
        }
        Target::Flag(flag) => {
            if flag.dtype() != DType::I32 {
                return Err(Error::DTypeMismatch {
                    lhs: DType::I32,
                    rhs: flag.dtype(),
                });
            }
            view.bound.min(input.len())
        }
    };

    Ok(PruneLaunch { dtype, view, bound })
}
