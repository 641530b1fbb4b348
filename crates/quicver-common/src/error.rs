// ============================================
// File: crates/quicver-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Provides foundational error types and result aliases used across
//! all quicver crates, enabling consistent error handling.
//!
//! ## Main Functionality
//! - `CommonError`: Base error enum for common operations
//! - `Result<T>`: Type alias using `CommonError`
//! - Conversion from hex decoding failures
//!
//! ## Design Philosophy
//! - Use `thiserror` for ergonomic error definitions
//! - Each crate defines its own error type that wraps `CommonError`
//! - Unrecognized peer input is NOT an error here: version lookups
//!   return the unsupported sentinel instead
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Common result type for operations that may fail.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Common error types shared across quicver crates.
///
/// # Example
/// ```
/// use quicver_common::error::{CommonError, Result};
///
/// fn require_label_bytes(data: &[u8]) -> Result<[u8; 4]> {
///     data.try_into()
///         .map_err(|_| CommonError::invalid_length(4, data.len()))
/// }
///
/// assert!(require_label_bytes(&[1, 2, 3]).is_err());
/// ```
#[derive(Error, Debug)]
pub enum CommonError {
    /// Data length doesn't match expected size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    /// Failed to decode data.
    #[error("Decoding error: {context}: {details}")]
    Decoding {
        /// What was being decoded
        context: String,
        /// Error details
        details: String,
    },
}

impl CommonError {
    /// Creates an `InvalidLength` error.
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    /// Returns `true` if this error was caused by caller-supplied input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidLength { .. } | Self::Decoding { .. })
    }
}

// ============================================
// Error Conversions
// ============================================

impl From<hex::FromHexError> for CommonError {
    fn from(err: hex::FromHexError) -> Self {
        Self::Decoding {
            context: "hex decode".into(),
            details: err.to_string(),
        }
    }
}

// ============================================
// Tests
// ============================================
