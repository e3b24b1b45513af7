//! Trait for runtime clients that handle operation dispatch

use super::Runtime;

/// Library handle identity
///
/// Descriptors are created against a handle and remember its id; operations
/// reject descriptors that were created against a different handle.
pub trait Handle {
    /// Unique id of this handle
    ///
    /// Clones share the id; independently created handles never do.
    fn handle_id(&self) -> u64;
}

/// Trait for runtime clients that handle operation dispatch
///
/// A client is the library handle every prune operation is issued through.
pub trait RuntimeClient<R: Runtime>: Handle + Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Create a new execution stream on this client's device
    fn create_stream(&self) -> crate::error::Result<R::Stream>;

    /// Get the allocator for this client
    fn allocator(&self) -> &R::Allocator;
}
