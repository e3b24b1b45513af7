//! Runtime traits for compute backend abstraction

pub mod client;
pub mod device;
pub mod runtime;
pub mod stream;

pub use client::{Handle, RuntimeClient};
pub use device::Device;
pub use runtime::Runtime;
pub use stream::RuntimeStream;
