//! Strided view resolution
//!
//! Maps a logical matrix (possibly transposed, row- or column-major, batched
//! or broadcast) onto the two strides and batch parameters the kernels
//! address memory with.
//!
//! Axis 1 of the resolved view is the pruning axis: every group of 4 consists
//! of consecutive axis-1 positions of one axis-0 row.

use crate::descriptor::{MatrixDescriptor, Operation, Order};

/// Lanes per block along axis 0
pub const SUBGROUP_0: usize = 16;
/// Lanes per block along axis 1
pub const SUBGROUP_1: usize = 4;
/// Rows each lane walks
pub const THREAD_TILE_0: usize = 1;
/// Columns each lane walks (one group of 4)
pub const THREAD_TILE_1: usize = 4;
/// Rows covered by one block
pub const MACRO_TILE_0: usize = SUBGROUP_0 * THREAD_TILE_0;
/// Columns covered by one block
pub const MACRO_TILE_1: usize = SUBGROUP_1 * THREAD_TILE_1;
/// Lanes per block
pub const LANES_PER_BLOCK: usize = SUBGROUP_0 * SUBGROUP_1;

/// Resolved addressing parameters of a logical matrix view
///
/// Element `(i, j)` of batch `b` lives at
/// `b * batch_stride + i * stride0 + j * stride1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StridedView {
    /// Extent along axis 0
    pub m: usize,
    /// Extent along axis 1 (the pruning axis)
    pub n: usize,
    /// Distance between consecutive axis-0 positions
    pub stride0: usize,
    /// Distance between consecutive axis-1 positions
    pub stride1: usize,
    /// Batches the kernels visit
    pub num_batches: usize,
    /// Distance between consecutive batches
    pub batch_stride: usize,
    /// Linear element bound; positions at or past it read as zero
    pub bound: usize,
}

impl StridedView {
    /// Resolve the view of `desc` as seen through `op`
    ///
    /// Transposition swaps the logical extents. The contiguous axis follows
    /// `transpose XOR row_major`. A zero batch stride is the broadcast
    /// sentinel: every batch aliases the first, so only one is visited.
    ///
    /// The bound is `num_batches * batch_stride`, stretched to the end of the
    /// last batch when batches interleave inside the `ld` padding.
    pub fn resolve(desc: &MatrixDescriptor, op: Operation) -> Self {
        let transpose = op == Operation::Transpose;
        let (m, n) = if transpose {
            (desc.cols(), desc.rows())
        } else {
            (desc.rows(), desc.cols())
        };

        let ld = desc.ld();
        let row_major = desc.order() == Order::RowMajor;
        let (stride0, stride1) = if transpose != row_major {
            (ld, 1)
        } else {
            (1, ld)
        };

        let (num_batches, batch_stride) = match desc.batch_stride() {
            0 => (1, desc.footprint()),
            stride => (desc.num_batches(), stride),
        };
        // Interleaved batches end past `num_batches * batch_stride`
        let bound = (num_batches * batch_stride)
            .max((num_batches - 1) * batch_stride + desc.footprint());

        Self {
            m,
            n,
            stride0,
            stride1,
            num_batches,
            batch_stride,
            bound,
        }
    }

    /// Launch grid covering the view: one block per 16×16 tile per batch
    pub fn grid(&self) -> LaunchGrid {
        LaunchGrid {
            x: self.m.div_ceil(MACRO_TILE_0),
            y: self.n.div_ceil(MACRO_TILE_1),
            z: self.num_batches,
        }
    }

    /// Tight element count addressed by the view (last element + 1)
    pub fn footprint(&self) -> usize {
        if self.m == 0 || self.n == 0 || self.num_batches == 0 {
            return 0;
        }
        (self.num_batches - 1) * self.batch_stride
            + (self.m - 1) * self.stride0
            + (self.n - 1) * self.stride1
            + 1
    }

    /// Linear offset of element `(row, col)` of `batch`
    #[inline]
    pub fn offset(&self, batch: usize, row: usize, col: usize) -> usize {
        batch * self.batch_stride + row * self.stride0 + col * self.stride1
    }
}

/// Three-dimensional launch grid (tile-row × tile-col × batch)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaunchGrid {
    /// Blocks along axis 0
    pub x: usize,
    /// Blocks along axis 1
    pub y: usize,
    /// Blocks along the batch axis
    pub z: usize,
}

impl LaunchGrid {
    /// Total number of blocks
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Block coordinates of a linear block index (x fastest)
    #[inline]
    pub fn block(&self, linear: usize) -> BlockIdx {
        BlockIdx {
            x: linear % self.x,
            y: (linear / self.x) % self.y,
            z: linear / (self.x * self.y),
        }
    }
}

/// Coordinates of one block in a [`LaunchGrid`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockIdx {
    /// Tile index along axis 0
    pub x: usize,
    /// Tile index along axis 1
    pub y: usize,
    /// Batch index
    pub z: usize,
}
