// ============================================
// File: crates/quicver-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines the few error returns of the version layer. Most lookups
//! never fail: an unrecognized label or string yields the unsupported
//! version sentinel. Errors exist only for strict entry points (typed
//! parsing, wire buffers) where the caller asked for a hard failure.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//! - `Result<T>`: Type alias using `CoreError`
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use quicver_common::error::CommonError;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for version handling.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Text did not name any supported version.
    #[error("Unsupported QUIC version: \"{input}\"")]
    UnsupportedVersion {
        /// The text that failed to parse
        input: String,
    },

    /// A label list ended in the middle of a 4-byte label.
    #[error("Truncated version label list: {remaining} trailing byte(s)")]
    TruncatedLabel {
        /// Bytes left over after the last whole label
        remaining: usize,
    },

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    /// Creates an `UnsupportedVersion` error.
    pub fn unsupported(input: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            input: input.into(),
        }
    }

    /// Returns `true` if this error came from peer or operator input
    /// rather than a local bug.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        match self {
            Self::UnsupportedVersion { .. } | Self::TruncatedLabel { .. } => true,
            Self::Common(inner) => inner.is_client_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unsupported("h3-99");
        assert_eq!(err.to_string(), "Unsupported QUIC version: \"h3-99\"");

        let err = CoreError::TruncatedLabel { remaining: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_error_classification() {
        assert!(CoreError::unsupported("x").is_input_error());
        assert!(CoreError::TruncatedLabel { remaining: 1 }.is_input_error());

        let wrapped: CoreError = CommonError::invalid_length(4, 2).into();
        assert!(wrapped.is_input_error());
        assert!(matches!(wrapped, CoreError::Common(_)));
    }
}
