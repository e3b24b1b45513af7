//! CPU client (the library handle) and allocator

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use super::stream::CpuStream;
use crate::error::Result;
use crate::runtime::{DefaultAllocator, Handle, Runtime, RuntimeClient};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Parallel execution settings for streams created by a client
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Worker threads of a dedicated pool; `None` uses rayon's global pool
    pub num_threads: Option<usize>,
    /// Minimum number of grid blocks a single rayon task processes
    pub min_blocks_per_task: Option<usize>,
}

impl ParallelismConfig {
    /// Create a new parallelism configuration
    pub fn new(num_threads: Option<usize>, min_blocks_per_task: Option<usize>) -> Self {
        Self {
            num_threads,
            min_blocks_per_task,
        }
    }
}

/// CPU client for operation dispatch
///
/// Every client created with [`CpuClient::new`] gets a fresh handle id;
/// clones and [`CpuClient::with_parallelism`] keep it.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    allocator: CpuAllocator,
    parallelism: ParallelismConfig,
    handle_id: u64,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        let allocator = create_cpu_allocator(device.clone());
        Self {
            device,
            allocator,
            parallelism: ParallelismConfig::default(),
            handle_id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Same handle with a different parallelism configuration
    ///
    /// Only streams created afterwards pick up the new settings.
    pub fn with_parallelism(&self, config: ParallelismConfig) -> Self {
        Self {
            parallelism: config,
            ..self.clone()
        }
    }

    /// Current parallelism configuration
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }
}

impl Handle for CpuClient {
    fn handle_id(&self) -> u64 {
        self.handle_id
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn create_stream(&self) -> Result<CpuStream> {
        CpuStream::new(self.device.clone(), self.parallelism)
    }

    fn allocator(&self) -> &CpuAllocator {
        &self.allocator
    }
}

/// CPU-specific allocator type alias
pub type CpuAllocator = DefaultAllocator<CpuDevice>;

fn create_cpu_allocator(device: CpuDevice) -> CpuAllocator {
    DefaultAllocator::new(device, CpuRuntime::allocate, CpuRuntime::deallocate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Allocator;

    #[test]
    fn test_handle_ids_are_unique() {
        let a = CpuClient::new(CpuDevice::new());
        let b = CpuClient::new(CpuDevice::new());
        assert_ne!(a.handle_id(), b.handle_id());
        assert_eq!(a.clone().handle_id(), a.handle_id());
    }

    #[test]
    fn test_with_parallelism_keeps_handle() {
        let client = CpuClient::new(CpuDevice::new());
        let tuned = client.with_parallelism(ParallelismConfig::new(Some(2), Some(4)));
        assert_eq!(tuned.handle_id(), client.handle_id());
        assert_eq!(tuned.parallelism().num_threads, Some(2));
        assert_eq!(client.parallelism(), ParallelismConfig::default());
    }

    #[test]
    fn test_allocator_counts_bytes() {
        let client = CpuClient::new(CpuDevice::new());
        let alloc = client.allocator();
        let ptr = alloc.allocate(256).unwrap();
        assert_ne!(ptr, 0);
        assert_eq!(alloc.allocated_bytes(), 256);
        alloc.deallocate(ptr, 256);
        assert_eq!(alloc.allocated_bytes(), 0);
    }
}
