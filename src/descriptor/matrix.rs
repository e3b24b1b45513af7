//! Matrix descriptor

use super::{MatrixType, Order};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Handle;

/// Shape, layout and batch attributes of a stored matrix
///
/// Constructed once against a handle and read-only afterwards. The batch
/// attributes default to a single, non-broadcast batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixDescriptor {
    handle_id: u64,
    rows: usize,
    cols: usize,
    ld: usize,
    dtype: DType,
    order: Order,
    matrix_type: MatrixType,
    num_batches: usize,
    batch_stride: usize,
}

impl MatrixDescriptor {
    /// Describe a `rows × cols` matrix stored with leading dimension `ld`
    ///
    /// # Errors
    ///
    /// `InvalidSize` if either extent is zero, `ld` is smaller than the
    /// contiguous extent (`rows` for column-major, `cols` for row-major) or
    /// one stored matrix does not fit in `usize` elements.
    pub fn new(
        handle: &impl Handle,
        rows: usize,
        cols: usize,
        ld: usize,
        dtype: DType,
        order: Order,
        matrix_type: MatrixType,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_size(
                "rows/cols",
                format!("matrix extents must be positive, got {rows}x{cols}"),
            ));
        }

        let (extent, name) = match order {
            Order::ColumnMajor => (rows, "rows"),
            Order::RowMajor => (cols, "cols"),
        };
        if ld < extent {
            return Err(Error::invalid_size(
                "ld",
                format!("leading dimension ({ld}) is smaller than {name} ({extent})"),
            ));
        }
        let vectors = match order {
            Order::ColumnMajor => cols,
            Order::RowMajor => rows,
        };
        if ld.checked_mul(vectors).is_none() {
            return Err(Error::invalid_size(
                "ld",
                format!("{ld} x {vectors} elements overflows usize"),
            ));
        }

        let desc = Self {
            handle_id: handle.handle_id(),
            rows,
            cols,
            ld,
            dtype,
            order,
            matrix_type,
            num_batches: 1,
            batch_stride: 0,
        };
        log::trace!("created matrix descriptor {desc:?}");
        Ok(desc)
    }

    /// Set the batch attributes
    ///
    /// `batch_stride == 0` is the broadcast sentinel: every batch aliases the
    /// same data. A non-zero stride may interleave batches inside the `ld`
    /// padding, but no two batches may share an element.
    pub fn with_batches(mut self, num_batches: usize, batch_stride: usize) -> Result<Self> {
        if num_batches == 0 {
            return Err(Error::invalid_size("num_batches", "must be at least 1"));
        }
        if batch_stride != 0 && num_batches > 1 {
            let fits = (num_batches - 1)
                .checked_mul(batch_stride)
                .and_then(|last| last.checked_add(self.footprint()))
                .and(num_batches.checked_mul(batch_stride))
                .is_some();
            if !fits {
                return Err(Error::invalid_size(
                    "batch_stride",
                    format!("{num_batches} batches of stride {batch_stride} overflow usize"),
                ));
            }
            if let Some(shift) = self.first_overlap(num_batches, batch_stride) {
                return Err(Error::invalid_size(
                    "batch_stride",
                    format!("batch {shift} of stride {batch_stride} overlaps batch 0"),
                ));
            }
        }
        self.num_batches = num_batches;
        self.batch_stride = batch_stride;
        Ok(self)
    }

    /// First batch index whose elements collide with batch 0, if any
    ///
    /// Batch `t` is batch 0 shifted by `d = t * stride`. With `e` the
    /// contiguous extent, a collision needs `d = da + db * ld` for some
    /// `|da| < e` and `|db| < vectors`, and since `e <= ld` only
    /// `db = d / ld` or `d / ld + 1` can work.
    fn first_overlap(&self, num_batches: usize, stride: usize) -> Option<usize> {
        let (extent, vectors) = match self.order {
            Order::ColumnMajor => (self.rows, self.cols),
            Order::RowMajor => (self.cols, self.rows),
        };
        let ld = self.ld;
        let span = (vectors - 1) * ld + extent;

        (1..num_batches)
            .map(|t| (t, t * stride))
            .take_while(|&(_, shift)| shift < span)
            .find(|&(_, shift)| {
                let (q, r) = (shift / ld, shift % ld);
                (r < extent && q < vectors) || (r > ld - extent && q + 1 < vectors)
            })
            .map(|(t, _)| t)
    }

    /// Id of the handle this descriptor was created against
    #[inline]
    pub fn handle_id(&self) -> u64 {
        self.handle_id
    }

    /// Stored rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Stored columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Leading dimension
    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Storage order
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Dense or structured
    #[inline]
    pub fn matrix_type(&self) -> MatrixType {
        self.matrix_type
    }

    /// Number of batches
    #[inline]
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Distance between batches in elements (0 = broadcast)
    #[inline]
    pub fn batch_stride(&self) -> usize {
        self.batch_stride
    }

    /// Elements spanned by one stored matrix: `ld` times the count of
    /// non-contiguous vectors
    #[inline]
    pub fn footprint(&self) -> usize {
        match self.order {
            Order::ColumnMajor => self.ld * self.cols,
            Order::RowMajor => self.ld * self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuClient, CpuDevice};

    fn handle() -> CpuClient {
        CpuClient::new(CpuDevice::new())
    }

    #[test]
    fn test_ld_must_cover_contiguous_extent() {
        let h = handle();
        let err = MatrixDescriptor::new(
            &h,
            16,
            8,
            8,
            DType::F16,
            Order::ColumnMajor,
            MatrixType::Structured,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSize { arg: "ld", .. }));

        // Row-major checks ld against cols instead
        let desc =
            MatrixDescriptor::new(&h, 16, 8, 8, DType::F16, Order::RowMajor, MatrixType::Dense)
                .unwrap();
        assert_eq!(desc.footprint(), 128);
    }

    #[test]
    fn test_zero_extent_rejected() {
        let err = MatrixDescriptor::new(
            &handle(),
            0,
            8,
            8,
            DType::I8,
            Order::ColumnMajor,
            MatrixType::Dense,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSize { .. }));
    }

    #[test]
    fn test_batch_attributes() {
        let h = handle();
        let desc = MatrixDescriptor::new(
            &h,
            8,
            8,
            8,
            DType::BF16,
            Order::ColumnMajor,
            MatrixType::Structured,
        )
        .unwrap();
        assert_eq!(desc.num_batches(), 1);
        assert_eq!(desc.batch_stride(), 0);
        assert_eq!(desc.handle_id(), h.handle_id());

        assert!(desc.clone().with_batches(0, 64).is_err());
        assert!(desc.clone().with_batches(2, 63).is_err());
        // Broadcast and single-batch descriptors accept any stride
        assert!(desc.clone().with_batches(4, 0).is_ok());
        assert!(desc.clone().with_batches(1, 10).is_ok());

        let batched = desc.with_batches(3, 80).unwrap();
        assert_eq!(batched.num_batches(), 3);
        assert_eq!(batched.batch_stride(), 80);
    }

    #[test]
    fn test_batches_interleaved_in_padding() {
        let h = handle();
        let desc = MatrixDescriptor::new(
            &h,
            4,
            4,
            8,
            DType::I8,
            Order::ColumnMajor,
            MatrixType::Structured,
        )
        .unwrap();

        // Batch 1 sits in rows 4..8 of batch 0's columns
        assert!(desc.clone().with_batches(2, 4).is_ok());
        // Batch 2 would land on column 1 of batch 0
        let err = desc.clone().with_batches(3, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidSize { arg: "batch_stride", .. }));
        // Shifts shorter than the contiguous extent collide immediately
        assert!(desc.clone().with_batches(2, 3).is_err());
        // Rows 6..10 of column 0 wrap into rows 0..2 of column 1
        assert!(desc.clone().with_batches(2, 6).is_err());
        // Whole columns collide, the padding of column 1 does not
        assert!(desc.clone().with_batches(2, 8).is_err());
        assert!(desc.clone().with_batches(2, 12).is_ok());
        assert!(desc.clone().with_batches(2, 26).is_err());
        // Starting past the last stored element is always disjoint
        assert!(desc.with_batches(2, 28).is_ok());
    }

    #[test]
    fn test_row_major_interleaving() {
        let h = handle();
        let desc =
            MatrixDescriptor::new(&h, 4, 4, 8, DType::F16, Order::RowMajor, MatrixType::Structured)
                .unwrap();
        assert!(desc.clone().with_batches(2, 4).is_ok());
        assert!(desc.with_batches(2, 2).is_err());
    }

    #[test]
    fn test_oversized_layouts_rejected() {
        let h = handle();
        let err = MatrixDescriptor::new(
            &h,
            4,
            4,
            usize::MAX / 2,
            DType::I8,
            Order::ColumnMajor,
            MatrixType::Structured,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSize { arg: "ld", .. }));

        let desc = MatrixDescriptor::new(
            &h,
            4,
            4,
            4,
            DType::I8,
            Order::ColumnMajor,
            MatrixType::Structured,
        )
        .unwrap();
        let err = desc.clone().with_batches(2, usize::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidSize { arg: "batch_stride", .. }));
        assert!(desc.with_batches(usize::MAX, 16).is_err());
    }
}
