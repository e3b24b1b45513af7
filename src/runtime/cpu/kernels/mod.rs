//! CPU kernel implementations
//!
//! Kernels execute a [`LaunchGrid`] of independent blocks. With the `rayon`
//! feature, blocks are distributed over the current rayon pool; otherwise
//! they run sequentially in linear block order.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod prune;

pub use prune::{prune_check_kernel, prune_strip_kernel};

use crate::prune::{BlockIdx, LaunchGrid};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Run `f` once per block of `grid`
///
/// `min_len` is the minimum number of blocks a single parallel task handles.
#[cfg(feature = "rayon")]
pub(crate) fn for_each_block<F>(grid: LaunchGrid, min_len: usize, f: F)
where
    F: Fn(BlockIdx) + Send + Sync,
{
    (0..grid.num_blocks())
        .into_par_iter()
        .with_min_len(min_len.max(1))
        .for_each(|linear| f(grid.block(linear)));
}

/// Run `f` once per block of `grid`
#[cfg(not(feature = "rayon"))]
pub(crate) fn for_each_block<F>(grid: LaunchGrid, _min_len: usize, f: F)
where
    F: Fn(BlockIdx) + Send + Sync,
{
    (0..grid.num_blocks()).for_each(|linear| f(grid.block(linear)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_every_block_visited_once() {
        let grid = LaunchGrid { x: 3, y: 2, z: 4 };
        let seen = Mutex::new(Vec::new());
        for_each_block(grid, 1, |b| seen.lock().push((b.z, b.y, b.x)));

        let mut seen = seen.into_inner();
        seen.sort_unstable();
        let expected: Vec<_> = (0..4)
            .flat_map(|z| (0..2).flat_map(move |y| (0..3).map(move |x| (z, y, x))))
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_empty_grid() {
        let grid = LaunchGrid { x: 0, y: 1, z: 1 };
        for_each_block(grid, 4, |_| panic!("no blocks expected"));
    }
}
