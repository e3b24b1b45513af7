//! 2:4 structured-sparsity pruning
//!
//! - [`view`]: resolves a matrix descriptor into kernel addressing parameters
//! - [`select`]: the magnitude policy choosing which 2 of every 4 values survive
//!
//! The kernels themselves live with the CPU runtime
//! (`runtime::cpu::kernels::prune`); operations are issued through
//! [`crate::ops::PruneOps`].

pub mod select;
pub mod view;

pub use select::{GROUP_SIZE, KEEP_PER_GROUP, group_passes, prune_group, select_pair};
pub use view::{BlockIdx, LaunchGrid, StridedView};

use std::fmt;

/// Pruning algorithm requested by the caller
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PruneAlgorithm {
    /// Keep the 2 largest-magnitude values of every group of 4 along the
    /// pruning axis
    #[default]
    Strip,
    /// Tile-wise pruning over 4×4 blocks (no kernel available)
    Tile,
}

impl fmt::Display for PruneAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strip => write!(f, "strip"),
            Self::Tile => write!(f, "tile"),
        }
    }
}
