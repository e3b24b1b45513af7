//! Prune operations
//!
//! Operations are defined as traits implemented by a runtime's client, which
//! doubles as the library handle:
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements PruneOps<R>
//!         ├── prune        (strip 2:4 pruning, in-place or out-of-place)
//!         └── prune_check  (0/1 flag: does A satisfy the pattern?)
//! ```
//!
//! # Implementing Operations for a New Backend
//!
//! 1. Run the shared argument validation first: every backend rejects the
//!    same calls with the same errors, before issuing work.
//! 2. Resolve the dtype with `dispatch_prunable!` and issue the kernel on
//!    the caller's stream.

pub(crate) mod dispatch;
pub(crate) mod validate;

mod cpu;
mod traits;

pub use traits::PruneOps;
