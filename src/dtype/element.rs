//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};

/// Trait for types that can be stored in a device buffer
///
/// This trait connects Rust's type system to sparselt's runtime dtype system.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `PartialOrd` - Comparison against zero in the prune-check kernel
///
/// Scoring happens in `f32`, the compute type of every prunable storage type.
/// `i8`, `f16` and `bf16` all widen to `f32` exactly.
pub trait Element: Copy + Send + Sync + Pod + Zeroable + 'static + PartialOrd {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Widen to the compute type
    fn to_compute(self) -> f32;

    /// Zero value
    fn zero() -> Self;

    /// Strictly greater than zero in the real-number value of the element
    #[inline]
    fn is_positive(self) -> bool {
        self > Self::zero()
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_compute(self) -> f32 {
        self
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn to_compute(self) -> f32 {
        self as f32
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl Element for i8 {
    const DTYPE: DType = DType::I8;

    #[inline]
    fn to_compute(self) -> f32 {
        self as f32
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

// ============================================================================
// Half-precision floating point types
// ============================================================================

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_compute(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }
}

impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_compute(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }
}
