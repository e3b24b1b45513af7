//! Prune operations trait.

use crate::buffer::DeviceBuffer;
use crate::descriptor::MatmulDescriptor;
use crate::error::Result;
use crate::prune::PruneAlgorithm;
use crate::runtime::Runtime;

/// 2:4 structured-sparsity pruning of matrix A of a sparse matmul
///
/// Both operations only validate and enqueue: the work runs on `stream`, and
/// faults raised while it runs are reported by the stream's `synchronize`.
/// Validation happens before anything is issued, so a rejected call leaves
/// every buffer untouched.
///
/// Arguments are checked in this order:
///
/// 1. the descriptor belongs to this handle (`InvalidHandle`)
/// 2. no buffer is null (`InvalidPointer`)
/// 3. the algorithm is supported, prune only (`NotImplemented`)
/// 4. matrix A is structured (`NotImplemented`)
/// 5. matrix A's dtype is f16, bf16 or i8 (`NotImplemented`)
/// 6. buffer dtypes match (`DTypeMismatch`)
///
/// # Example
///
/// ```
/// use half::f16;
/// use sparselt::prelude::*;
///
/// let client = CpuRuntime::default_client(&CpuRuntime::default_device());
/// let stream = client.create_stream()?;
///
/// // A single 1×4 row: one group
/// let a = MatrixDescriptor::new(
///     &client, 1, 4, 1, DType::F16, Order::ColumnMajor, MatrixType::Structured,
/// )?;
/// let matmul = MatmulDescriptor::new(&client, Operation::NonTranspose, a, ComputeType::F32)?;
///
/// let data = [1.0, -5.0, 2.0, 0.1].map(f16::from_f32);
/// let input = DeviceBuffer::<CpuRuntime>::from_slice(&client, &data)?;
/// let output = DeviceBuffer::<CpuRuntime>::zeros(&client, 4, DType::F16)?;
///
/// client.prune(&matmul, &input, &output, PruneAlgorithm::Strip, &stream)?;
/// stream.synchronize()?;
///
/// let pruned: Vec<f16> = output.to_vec()?;
/// assert_eq!(pruned, [0.0, -5.0, 2.0, 0.0].map(f16::from_f32));
/// # Ok::<(), sparselt::error::Error>(())
/// ```
pub trait PruneOps<R: Runtime> {
    /// Prune matrix A so that every group of 4 consecutive elements along
    /// the pruning axis keeps at most its 2 largest-magnitude values
    ///
    /// `output` may be the same buffer as `input` (in-place). Otherwise the
    /// two must not overlap. Positions outside the logical matrix (padding
    /// between `rows` and `ld`) are not written.
    ///
    /// # Arguments
    /// * `matmul` - Descriptor holding matrix A and its operation
    /// * `input` - Dense values of A
    /// * `output` - Destination for the pruned values
    /// * `alg` - Pruning algorithm; only [`PruneAlgorithm::Strip`] is available
    /// * `stream` - Stream the kernel is issued on
    fn prune(
        &self,
        matmul: &MatmulDescriptor,
        input: &DeviceBuffer<R>,
        output: &DeviceBuffer<R>,
        alg: PruneAlgorithm,
        stream: &R::Stream,
    ) -> Result<()>;

    /// Check whether matrix A already satisfies the 2:4 pattern
    ///
    /// Writes `0` to `result[0]` if every group holds at most 2 strictly
    /// positive values and `1` otherwise. Negative values are not counted.
    /// `result` must be an `I32` buffer.
    fn prune_check(
        &self,
        matmul: &MatmulDescriptor,
        input: &DeviceBuffer<R>,
        result: &DeviceBuffer<R>,
        stream: &R::Stream,
    ) -> Result<()>;
}
