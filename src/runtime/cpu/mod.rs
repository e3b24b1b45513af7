//! CPU runtime implementation
//!
//! Device memory is host memory and kernels run on rayon worker threads
//! (or sequentially without the `rayon` feature). It is the reference
//! backend for the prune operations.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;
mod stream;

pub use client::{CpuAllocator, CpuClient, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
pub use stream::CpuStream;
