//! Runtime backends for prune kernel execution
//!
//! This module defines the `Runtime` trait family and the CPU implementation
//! that executes the prune and prune-check kernels.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific compute unit)
//! ├── Client (the handle: dispatches operations, creates streams)
//! ├── Stream (ordered queue; launches kernels, reports faults)
//! └── Allocator (caller-side buffer memory)
//! ```

mod allocator;
pub mod cpu;
mod traits;

pub use allocator::{Allocator, DefaultAllocator};
pub use traits::{Device, Handle, Runtime, RuntimeClient, RuntimeStream};
