// ============================================
// File: crates/quicver-cli/src/error.rs
// ============================================
//! # Tool Error Types
//!
//! ## Last Modified
//! v0.1.0 - Initial error types

use thiserror::Error;

use quicver_common::error::CommonError;
use quicver_core::error::CoreError;

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Tool error types.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        field: String,
        reason: String,
    },

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was caused by operator input rather
    /// than the environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::ConfigInvalid { .. } => true,
            Self::Core(e) => e.is_input_error(),
            Self::Common(e) => e.is_client_error(),
            Self::ConfigLoad { .. } | Self::Io(_) => false,
        }
    }
}

/// Process exit status for a failed command.
pub const EXIT_FAILURE: i32 = 1;

/// Process exit status when the operator's input was at fault.
pub const EXIT_USAGE: i32 = 2;

/// Picks the exit status for `err`.
///
/// Context layers added with `anyhow::Context` are looked through.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> i32 {
    let user_error = if let Some(e) = err.downcast_ref::<ToolError>() {
        e.is_user_error()
    } else if let Some(e) = err.downcast_ref::<CoreError>() {
        e.is_input_error()
    } else if let Some(e) = err.downcast_ref::<CommonError>() {
        e.is_client_error()
    } else {
        false
    };

    if user_error {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::config_invalid("logging.level", "unknown level 'loud'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: logging.level - unknown level 'loud'"
        );

        let err = ToolError::config_load("/etc/quicver.toml", "not found");
        assert!(err.to_string().contains("/etc/quicver.toml"));
    }

    #[test]
    fn test_exit_status() {
        let err = anyhow::Error::from(ToolError::config_invalid("logging.level", "loud"));
        assert_eq!(exit_status(&err), EXIT_USAGE);

        let err = ToolError::config_load("/etc/quicver.toml", "file not found");
        let err = anyhow::Error::from(err);
        assert_eq!(exit_status(&err), EXIT_FAILURE);

        // Bare core and common errors, as returned by `?` in command handlers
        let err = anyhow::Error::from(CoreError::unsupported("Q099"));
        assert_eq!(exit_status(&err), EXIT_USAGE);
        let err = anyhow::Error::from(CommonError::invalid_length(4, 3))
            .context("label must be 4 bytes, got 3");
        assert_eq!(exit_status(&err), EXIT_USAGE);

        let err = anyhow::anyhow!("serializer failed");
        assert_eq!(exit_status(&err), EXIT_FAILURE);
    }

    #[test]
    fn test_user_error_classification() {
        assert!(ToolError::config_invalid("x", "y").is_user_error());
        assert!(ToolError::from(CoreError::unsupported("Q099")).is_user_error());
        assert!(!ToolError::config_load("p", "r").is_user_error());
    }
}
