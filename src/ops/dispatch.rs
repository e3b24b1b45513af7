//! DType dispatch for the prune kernels
//!
//! `dispatch_prunable!` takes a `DType` value and executes a code block with
//! `T` bound to the matching storage type:
//!
//! - `F16` -> `half::f16`
//! - `BF16` -> `half::bf16`
//! - `I8` -> `i8`
//!
//! Any other dtype returns `Error::NotImplemented` from the enclosing function.
//!
//! ```ignore
//! fn launch(dtype: DType) -> Result<()> {
//!     dispatch_prunable!(dtype, T => {
//!         let size = std::mem::size_of::<T>();
//!     }, "prune for this dtype");
//!     Ok(())
//! }
//! ```

macro_rules! dispatch_prunable {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F16 => {
                type $T = half::f16;
                $body
            }
            $crate::dtype::DType::BF16 => {
                type $T = half::bf16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            _ => return Err($crate::error::Error::not_implemented($error_op)),
        }
    };
}

pub(crate) use dispatch_prunable;
