//! Device buffers: caller-owned memory the prune operations read and write

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{Allocator, Runtime, RuntimeClient};
use std::sync::Arc;

/// Typed, reference-counted device memory
///
/// Buffers are allocated through a client's allocator and freed when the
/// last clone is dropped. Operations never allocate; they only address the
/// buffers they are handed.
pub struct DeviceBuffer<R: Runtime> {
    inner: Arc<BufferInner<R>>,
}

struct BufferInner<R: Runtime> {
    /// Raw device pointer (CPU ptr cast to u64); 0 is the null buffer
    ptr: u64,
    /// Number of elements (not bytes)
    len: usize,
    dtype: DType,
    device: R::Device,
    /// Allocator that owns `ptr`; `None` for the null buffer
    allocator: Option<R::Allocator>,
}

impl<R: Runtime> DeviceBuffer<R> {
    /// Allocate `len` zeroed elements of `dtype`
    pub fn zeros(client: &R::Client, len: usize, dtype: DType) -> Result<Self> {
        let allocator = client.allocator().clone();
        let ptr = allocator.allocate(len * dtype.size_in_bytes())?;

        Ok(Self {
            inner: Arc::new(BufferInner {
                ptr,
                len,
                dtype,
                device: client.device().clone(),
                allocator: Some(allocator),
            }),
        })
    }

    /// Allocate a buffer holding a copy of `data`
    ///
    /// The dtype is inferred from the element type.
    pub fn from_slice<T: Element>(client: &R::Client, data: &[T]) -> Result<Self> {
        let buffer = Self::zeros(client, data.len(), T::DTYPE)?;
        R::copy_to_device(bytemuck::cast_slice(data), buffer.ptr(), buffer.device())?;
        Ok(buffer)
    }

    /// The null buffer
    ///
    /// Owns no memory; passing it to an operation yields `InvalidPointer`.
    pub fn null(dtype: DType, device: &R::Device) -> Self {
        Self {
            inner: Arc::new(BufferInner {
                ptr: 0,
                len: 0,
                dtype,
                device: device.clone(),
                allocator: None,
            }),
        }
    }

    /// Raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Whether the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Whether this is a null pointer
    #[inline]
    pub fn is_null(&self) -> bool {
        self.inner.ptr == 0
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Device the memory lives on
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Copy the contents back to the host
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.check_dtype::<T>()?;
        // Allocate as T so the byte view is correctly aligned
        let mut result = vec![T::zeroed(); self.inner.len];
        R::copy_from_device(
            self.inner.ptr,
            bytemuck::cast_slice_mut(&mut result),
            &self.inner.device,
        )?;
        Ok(result)
    }

    /// Overwrite the contents from the host
    pub fn copy_from_slice<T: Element>(&self, data: &[T]) -> Result<()> {
        self.check_dtype::<T>()?;
        if data.len() != self.inner.len {
            return Err(Error::invalid_size(
                "data",
                format!("expected {} elements, got {}", self.inner.len, data.len()),
            ));
        }
        R::copy_to_device(bytemuck::cast_slice(data), self.inner.ptr, &self.inner.device)
    }

    fn check_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE != self.inner.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.inner.dtype,
                rhs: T::DTYPE,
            });
        }
        Ok(())
    }
}

impl<R: Runtime> Clone for DeviceBuffer<R> {
    /// Clone shares the allocation
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> std::fmt::Debug for DeviceBuffer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBuffer")
            .field("ptr", &format_args!("{:#x}", self.inner.ptr))
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .finish()
    }
}

impl<R: Runtime> Drop for BufferInner<R> {
    fn drop(&mut self) {
        if let Some(allocator) = &self.allocator {
            allocator.deallocate(self.ptr, self.len * self.dtype.size_in_bytes());
        }
    }
}

/// Elements needed to hold a strided-batched matrix
///
/// One full `ld × cols` matrix, extended by the batch strides when they do
/// not already cover the last batch.
pub fn strided_batched_matrix_size(
    rows: usize,
    cols: usize,
    ld: usize,
    stride: usize,
    batch_count: usize,
) -> usize {
    let mut size = ld * cols;
    if batch_count > 1 && cols > 0 {
        let last = (batch_count - 1) * stride;
        if size < last + (cols - 1) * ld + rows {
            size += last;
        }
    }
    size
}

/// Byte offset at which the metadata of a compressed matrix begins
///
/// The compressed values of all batches come first, `ld × cols` each.
pub fn compressed_metadata_offset(
    cols: usize,
    ld: usize,
    num_batches: usize,
    dtype: DType,
) -> usize {
    num_batches * ld * cols * dtype.size_in_bytes()
}
