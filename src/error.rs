//! Error types for sparselt

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using sparselt's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparselt operations
#[derive(Error, Debug)]
pub enum Error {
    /// The handle is not usable with the given descriptor
    #[error("Invalid handle: {reason}")]
    InvalidHandle {
        /// Why the handle was rejected
        reason: &'static str,
    },

    /// A required device buffer is null
    #[error("Invalid pointer: buffer '{arg}' is null")]
    InvalidPointer {
        /// The argument name
        arg: &'static str,
    },

    /// A size or leading dimension is not valid for the matrix
    #[error("Invalid size '{arg}': {reason}")]
    InvalidSize {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// An argument value is not valid for the configuration
    #[error("Invalid value '{arg}': {reason}")]
    InvalidValue {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// DType mismatch between a buffer and the matrix it holds
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Expected dtype
        lhs: DType,
        /// Actual dtype
        rhs: DType,
    },

    /// Backend-specific error, reported at synchronization
    #[error("Backend error: {0}")]
    Backend(String),

    /// Feature not implemented for this input
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

/// Flat status taxonomy for callers that report codes instead of errors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Operation completed
    Success = 0,
    /// Handle not initialized or not matching the descriptor
    InvalidHandle = 1,
    /// Unsupported dtype, algorithm or matrix type
    NotImplemented = 2,
    /// Null device buffer
    InvalidPointer = 3,
    /// Invalid matrix size or leading dimension
    InvalidSize = 4,
    /// Device execution fault or other internal failure
    InternalError = 6,
    /// Invalid argument value
    InvalidValue = 7,
}

impl Error {
    /// Create a not-implemented error
    pub fn not_implemented(feature: &'static str) -> Self {
        Self::NotImplemented { feature }
    }

    /// Create an invalid size error
    pub fn invalid_size(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSize {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            arg,
            reason: reason.into(),
        }
    }

    /// Map this error onto the flat status taxonomy
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidHandle { .. } => Status::InvalidHandle,
            Self::InvalidPointer { .. } => Status::InvalidPointer,
            Self::InvalidSize { .. } => Status::InvalidSize,
            Self::InvalidValue { .. } | Self::DTypeMismatch { .. } => Status::InvalidValue,
            Self::NotImplemented { .. } => Status::NotImplemented,
            Self::Backend(_) => Status::InternalError,
        }
    }
}

impl Status {
    /// Status of a finished operation
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }
}
