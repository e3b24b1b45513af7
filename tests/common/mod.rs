//! Common test utilities
#![allow(dead_code)]

use half::{bf16, f16};
use sparselt::dtype::Element;
use sparselt::prelude::*;
use sparselt::prune::StridedView;

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let _ = env_logger::builder().is_test(true).try_init();
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Shape and layout of matrix A for a test case
#[derive(Clone, Copy, Debug)]
pub struct MatrixSpec {
    pub rows: usize,
    pub cols: usize,
    pub ld: usize,
    pub dtype: DType,
    pub order: Order,
    pub op: Operation,
    pub num_batches: usize,
    pub batch_stride: usize,
}

impl MatrixSpec {
    /// Single-batch column-major matrix with `ld == rows`
    pub fn col_major(rows: usize, cols: usize, dtype: DType) -> Self {
        Self {
            rows,
            cols,
            ld: rows,
            dtype,
            order: Order::ColumnMajor,
            op: Operation::NonTranspose,
            num_batches: 1,
            batch_stride: 0,
        }
    }

    pub fn ld(self, ld: usize) -> Self {
        Self { ld, ..self }
    }

    pub fn order(self, order: Order) -> Self {
        Self { order, ..self }
    }

    pub fn op(self, op: Operation) -> Self {
        Self { op, ..self }
    }

    pub fn batches(self, num_batches: usize, batch_stride: usize) -> Self {
        Self {
            num_batches,
            batch_stride,
            ..self
        }
    }

    /// Elements spanned by one stored matrix
    pub fn footprint(&self) -> usize {
        match self.order {
            Order::ColumnMajor => self.ld * self.cols,
            Order::RowMajor => self.ld * self.rows,
        }
    }

    /// Buffer length covering every batch
    pub fn buffer_len(&self) -> usize {
        if self.batch_stride == 0 {
            self.footprint()
        } else {
            (self.num_batches - 1) * self.batch_stride + self.footprint()
        }
    }

    /// Structured matmul descriptor for this matrix
    pub fn matmul(&self, client: &CpuClient) -> MatmulDescriptor {
        self.matmul_with_type(client, MatrixType::Structured)
    }

    pub fn matmul_with_type(&self, client: &CpuClient, matrix_type: MatrixType) -> MatmulDescriptor {
        let a = MatrixDescriptor::new(
            client,
            self.rows,
            self.cols,
            self.ld,
            self.dtype,
            self.order,
            matrix_type,
        )
        .unwrap()
        .with_batches(self.num_batches, self.batch_stride)
        .unwrap();
        let compute = ComputeType::for_storage(self.dtype).unwrap_or(ComputeType::F32);
        MatmulDescriptor::new(client, self.op, a, compute).unwrap()
    }

    /// Positions of every pruning group, masked columns dropped
    pub fn groups(&self, client: &CpuClient) -> Vec<Vec<usize>> {
        let matmul = self.matmul(client);
        let view = StridedView::resolve(matmul.matrix_a(), matmul.op_a());
        groups(&view)
    }
}

/// Positions of every group of 4 along axis 1 of `view`
pub fn groups(view: &StridedView) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    for b in 0..view.num_batches {
        for i in 0..view.m {
            for j in (0..view.n).step_by(4) {
                out.push((j..(j + 4).min(view.n)).map(|c| view.offset(b, i, c)).collect());
            }
        }
    }
    out
}

/// Deterministic values in `[-15, 16]` with no zeros
pub fn nonzero_pattern(len: usize, seed: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let v = ((i.wrapping_mul(2654435761).wrapping_add(seed * 97)) % 31) as f32 - 15.0;
            if v == 0.0 { 16.0 } else { v }
        })
        .collect()
}

/// Host-side narrowing of test values into a storage type
pub trait FromF32: Element {
    fn from_f32(v: f32) -> Self;
}

impl FromF32 for f16 {
    fn from_f32(v: f32) -> Self {
        f16::from_f32(v)
    }
}

impl FromF32 for bf16 {
    fn from_f32(v: f32) -> Self {
        bf16::from_f32(v)
    }
}

impl FromF32 for i8 {
    fn from_f32(v: f32) -> Self {
        v as i8
    }
}

pub fn to_elements<T: FromF32>(values: &[f32]) -> Vec<T> {
    values.iter().map(|&v| <T as FromF32>::from_f32(v)).collect()
}

/// Run prune out-of-place and return the output
pub fn prune_host<T: Element>(
    client: &CpuClient,
    spec: &MatrixSpec,
    data: &[T],
    initial_output: &[T],
) -> Vec<T> {
    let stream = client.create_stream().unwrap();
    let matmul = spec.matmul(client);
    let input = DeviceBuffer::<CpuRuntime>::from_slice(client, data).unwrap();
    let output = DeviceBuffer::<CpuRuntime>::from_slice(client, initial_output).unwrap();
    client
        .prune(&matmul, &input, &output, PruneAlgorithm::Strip, &stream)
        .unwrap();
    stream.synchronize().unwrap();
    output.to_vec().unwrap()
}

/// Run prune in place and return the buffer contents
pub fn prune_in_place<T: Element>(client: &CpuClient, spec: &MatrixSpec, data: &[T]) -> Vec<T> {
    let stream = client.create_stream().unwrap();
    let matmul = spec.matmul(client);
    let buffer = DeviceBuffer::<CpuRuntime>::from_slice(client, data).unwrap();
    client
        .prune(&matmul, &buffer, &buffer, PruneAlgorithm::Strip, &stream)
        .unwrap();
    stream.synchronize().unwrap();
    buffer.to_vec().unwrap()
}

/// Run prune-check and return the flag
pub fn check_host<T: Element>(client: &CpuClient, spec: &MatrixSpec, data: &[T]) -> i32 {
    let stream = client.create_stream().unwrap();
    let matmul = spec.matmul(client);
    let input = DeviceBuffer::<CpuRuntime>::from_slice(client, data).unwrap();
    let flag = DeviceBuffer::<CpuRuntime>::zeros(client, 1, DType::I32).unwrap();
    client.prune_check(&matmul, &input, &flag, &stream).unwrap();
    stream.synchronize().unwrap();
    flag.to_vec::<i32>().unwrap()[0]
}

/// Number of nonzero values at `positions`
pub fn nonzeros<T: Element>(data: &[T], positions: &[usize]) -> usize {
    positions.iter().filter(|&&p| data[p] != T::zero()).count()
}
