//! # sparselt
//!
//! **2:4 structured-sparsity pruning for sparse matrix multiplication.**
//!
//! Structured-sparse matmul units expect matrix A to hold at most 2 nonzero
//! values in every group of 4 consecutive elements along its reduction axis.
//! sparselt turns a dense matrix into that pattern (prune) and verifies that
//! a matrix already satisfies it (prune check).
//!
//! ## Features
//!
//! - **Strip pruning**: keeps the 2 largest-magnitude values of each group,
//!   with a fixed, reproducible tie-break
//! - **Layouts**: column- or row-major storage, transposed views, padded
//!   leading dimensions, strided batches and broadcast (stride-0) batches
//! - **In-place or out-of-place**, chosen by buffer identity
//! - **Dtypes**: f16, bf16, i8
//! - **Streams**: explicit execution contexts; kernel faults are reported at
//!   `synchronize`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sparselt::prelude::*;
//!
//! let client = CpuRuntime::default_client(&CpuRuntime::default_device());
//! let stream = client.create_stream()?;
//!
//! let a = MatrixDescriptor::new(&client, 64, 128, 64, DType::F16, Order::ColumnMajor, MatrixType::Structured)?;
//! let matmul = MatmulDescriptor::new(&client, Operation::Transpose, a, ComputeType::F32)?;
//!
//! client.prune(&matmul, &weights, &weights, PruneAlgorithm::Strip, &stream)?;
//! client.prune_check(&matmul, &weights, &flag, &stream)?;
//! stream.synchronize()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded kernel execution

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod descriptor;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod prune;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::buffer::DeviceBuffer;
    pub use crate::descriptor::{MatmulDescriptor, MatrixDescriptor, MatrixType, Operation, Order};
    pub use crate::dtype::{ComputeType, DType};
    pub use crate::error::{Error, Result, Status};
    pub use crate::ops::PruneOps;
    pub use crate::prune::PruneAlgorithm;
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, CpuStream, ParallelismConfig};
    pub use crate::runtime::{Device, Handle, Runtime, RuntimeClient, RuntimeStream};
}

/// Default runtime
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
