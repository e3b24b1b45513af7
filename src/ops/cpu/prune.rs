//! CPU implementation of prune operations.

use crate::buffer::DeviceBuffer;
use crate::descriptor::MatmulDescriptor;
use crate::error::Result;
use crate::ops::PruneOps;
use crate::ops::dispatch::dispatch_prunable;
use crate::ops::validate::{Target, validate};
use crate::prune::{PruneAlgorithm, StridedView};
use crate::runtime::cpu::kernels::{prune_check_kernel, prune_strip_kernel};
use crate::runtime::cpu::{CpuClient, CpuRuntime, CpuStream};
use crate::runtime::RuntimeStream;

type StripKernel<T> = unsafe fn(*const T, *mut T, &StridedView, usize, usize);
type CheckKernel<T> = unsafe fn(*const T, *mut i32, &StridedView, usize, usize);

/// PruneOps implementation for CPU runtime.
impl PruneOps<CpuRuntime> for CpuClient {
    fn prune(
        &self,
        matmul: &MatmulDescriptor,
        input: &DeviceBuffer<CpuRuntime>,
        output: &DeviceBuffer<CpuRuntime>,
        alg: PruneAlgorithm,
        stream: &CpuStream,
    ) -> Result<()> {
        let launch = validate(self, matmul, input, Target::Output(output, alg))
            .inspect_err(|e| log::trace!("prune rejected: {e}"))?;

        let in_place = input.ptr() == output.ptr();
        let grid = launch.view.grid();
        log::debug!(
            "prune_strip: dtype={} grid=({}, {}, {}) in_place={} bound={} stream={}",
            launch.dtype,
            grid.x,
            grid.y,
            grid.z,
            in_place,
            launch.bound,
            stream.id()
        );

        let in_addr = input.ptr() as usize;
        let out_addr = output.ptr() as usize;
        let min_len = stream.min_blocks_per_task();

        dispatch_prunable!(launch.dtype, T => {
            let kernel: StripKernel<T> = if in_place {
                prune_strip_kernel::<T, true>
            } else {
                prune_strip_kernel::<T, false>
            };
            stream.launch("prune_strip", move || unsafe {
                kernel(
                    in_addr as *const T,
                    out_addr as *mut T,
                    &launch.view,
                    launch.bound,
                    min_len,
                )
            });
        }, "pruning this dtype");

        Ok(())
    }

    fn prune_check(
        &self,
        matmul: &MatmulDescriptor,
        input: &DeviceBuffer<CpuRuntime>,
        result: &DeviceBuffer<CpuRuntime>,
        stream: &CpuStream,
    ) -> Result<()> {
        let launch = validate(self, matmul, input, Target::Flag(result))
            .inspect_err(|e| log::trace!("prune_check rejected: {e}"))?;

        let grid = launch.view.grid();
        log::debug!(
            "prune_check: dtype={} grid=({}, {}, {}) bound={} stream={}",
            launch.dtype,
            grid.x,
            grid.y,
            grid.z,
            launch.bound,
            stream.id()
        );

        let in_addr = input.ptr() as usize;
        let flag_addr = result.ptr() as usize;
        let min_len = stream.min_blocks_per_task();

        dispatch_prunable!(launch.dtype, T => {
            let kernel: CheckKernel<T> = prune_check_kernel::<T>;
            unsafe { stream.memset_zero(result.ptr(), std::mem::size_of::<i32>()) };
            stream.launch("prune_check", move || unsafe {
                kernel(
                    in_addr as *const T,
                    flag_addr as *mut i32,
                    &launch.view,
                    launch.bound,
                    min_len,
                )
            });
        }, "pruning this dtype");

        Ok(())
    }
}
