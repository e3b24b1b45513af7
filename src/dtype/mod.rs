//! Data type system for sparselt buffers
//!
//! This module provides the `DType` enum naming every element type a matrix
//! or buffer may carry, the `Element` trait that connects those tags to Rust
//! types, and the compute types used by sparse matmul descriptors.

mod element;

pub use element::Element;

use std::fmt;

// ============================================================================
// Compute Type
// ============================================================================

/// Accumulation type of a sparse matrix multiplication.
///
/// Each storage type has exactly one legal compute type:
///
/// | Storage      | Compute |
/// |--------------|---------|
/// | `F16`, `BF16`| `F32`   |
/// | `I8`         | `I32`   |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ComputeType {
    /// Accumulate in 32-bit floating point
    F32,
    /// Accumulate in 32-bit signed integer
    I32,
}

impl ComputeType {
    /// The compute type required for a storage dtype, if the dtype has one
    pub const fn for_storage(dtype: DType) -> Option<Self> {
        match dtype {
            DType::F16 | DType::BF16 => Some(Self::F32),
            DType::I8 => Some(Self::I32),
            _ => None,
        }
    }
}

// ============================================================================
// DType Enum
// ============================================================================

/// Data types supported by sparselt buffers
///
/// Only `F16`, `BF16` and `I8` may be pruned. `F32` and `I32` exist for
/// dense operands and for result buffers (the prune-check flag is `I32`).
///
/// # Discriminant Values (Serialization Stability)
///
/// - Floats: 0-9 (F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I32=11, I8=13)
///
/// Existing values are NEVER changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 32-bit floating point
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,
    /// 32-bit signed integer
    I32 = 11,
    /// 8-bit signed integer
    I8 = 13,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F16 | Self::BF16 => 2,
            Self::I8 => 1,
        }
    }

    /// Returns true if the 2:4 prune kernels have an instantiation for this type
    #[inline]
    pub const fn is_prunable(self) -> bool {
        DTypeSet::PRUNABLE.contains(self)
    }

    /// Short name for display (e.g., "f16", "i8")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I32 => "i32",
            Self::I8 => "i8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Set of dtypes for efficient membership testing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DTypeSet {
    bits: u64,
}

impl DTypeSet {
    /// Types the strip prune and prune-check kernels are compiled for
    pub const PRUNABLE: Self = Self {
        bits: (1 << DType::F16 as u8) | (1 << DType::BF16 as u8) | (1 << DType::I8 as u8),
    };

    /// Check if the set contains a dtype
    #[inline]
    pub const fn contains(self, dtype: DType) -> bool {
        self.bits & (1 << dtype as u8) != 0
    }
}
