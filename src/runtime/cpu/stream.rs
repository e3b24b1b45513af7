//! CPU execution stream

use super::client::ParallelismConfig;
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::RuntimeStream;
use parking_lot::Mutex;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "rayon")]
use std::sync::Arc;

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered execution context for kernel launches
///
/// Launches run to completion before returning, so work issued on one stream
/// executes in issue order. A panicking kernel does not unwind into the
/// caller: it leaves a fault on the stream that the next
/// [`synchronize`](RuntimeStream::synchronize) reports.
#[derive(Debug)]
pub struct CpuStream {
    id: u64,
    device: CpuDevice,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
    min_blocks_per_task: usize,
    fault: Mutex<Option<String>>,
}

impl CpuStream {
    pub(crate) fn new(device: CpuDevice, config: ParallelismConfig) -> Result<Self> {
        #[cfg(feature = "rayon")]
        let pool = match config.num_threads {
            Some(n) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| Error::Backend(format!("failed to build thread pool: {e}")))?,
            )),
            None => None,
        };

        Ok(Self {
            id: NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed),
            device,
            #[cfg(feature = "rayon")]
            pool,
            min_blocks_per_task: config.min_blocks_per_task.unwrap_or(1).max(1),
            fault: Mutex::new(None),
        })
    }

    /// Device this stream executes on
    pub fn device(&self) -> &CpuDevice {
        &self.device
    }

    /// Minimum number of grid blocks per parallel task
    pub(crate) fn min_blocks_per_task(&self) -> usize {
        self.min_blocks_per_task
    }

    /// Run `f` on this stream
    ///
    /// A panic inside `f` is caught and recorded; the first fault is kept
    /// until the next synchronize.
    pub(crate) fn launch<F>(&self, name: &str, f: F)
    where
        F: FnOnce() + Send,
    {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.install(f)));
        if let Err(payload) = outcome {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!("stream {}: kernel '{name}' faulted: {msg}", self.id);

            let mut fault = self.fault.lock();
            if fault.is_none() {
                *fault = Some(format!("kernel '{name}' faulted: {msg}"));
            }
        }
    }

    /// Zero `size_bytes` of device memory at `ptr`, ordered with launches
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `size_bytes` bytes.
    pub(crate) unsafe fn memset_zero(&self, ptr: u64, size_bytes: usize) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }
        unsafe {
            std::ptr::write_bytes(ptr as *mut u8, 0, size_bytes);
        }
    }

    #[cfg(feature = "rayon")]
    fn install<F>(&self, f: F)
    where
        F: FnOnce() + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn install<F>(&self, f: F)
    where
        F: FnOnce() + Send,
    {
        f()
    }
}

impl RuntimeStream for CpuStream {
    fn id(&self) -> u64 {
        self.id
    }

    fn synchronize(&self) -> Result<()> {
        // Launches complete before returning; only faults need reporting
        match self.fault.lock().take() {
            Some(msg) => Err(Error::Backend(msg)),
            None => Ok(()),
        }
    }
}
