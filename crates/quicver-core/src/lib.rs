// ============================================
// File: crates/quicver-core/src/lib.rs
// ============================================
//! # quicver Core - QUIC Version Library
//!
//! ## Creation Reason
//! Provides the version identity, capability model and negotiation policy
//! for a QUIC stack that speaks both the legacy QUIC crypto handshake and
//! TLS 1.3. Every other component asks this crate which version is in use
//! and what that version implies.
//!
//! ## Main Functionality
//!
//! ### Version Module ([`version`])
//! - Version identity (`HandshakeProtocol`, `TransportVersion`, `ParsedVersion`)
//! - Supported table and runtime enable/disable (`VersionRegistry`)
//! - Capability predicates per version
//! - Wire labels and grease (`VersionLabel`, `VersionLabelCodec`)
//! - Text parsing, ALPN and list formatting
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  quicver-cli                        │
//! │                      │                              │
//! │                      ▼                              │
//! │                quicver-core  ◄── You are here       │
//! │                      │                              │
//! │                      ▼                              │
//! │               quicver-common                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Diagnostics
//! Developer errors (asking for capabilities of an unknown version,
//! encoding a version with no label) are reported with
//! `tracing::error!` under the [`BUG_TARGET`] target and a safe value is
//! returned. Nothing in this crate panics on such input.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Keep the supported table the single source of truth
//! - Flag names are a deployment interface; never rename them
//! - Parsing functions never fail; use `FromStr` for strict input
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Tracing target for developer-error diagnostics.
pub const BUG_TARGET: &str = "quicver::bug";

/// Reports a developer error without aborting.
macro_rules! version_bug {
    ($($arg:tt)+) => {
        ::tracing::error!(target: "quicver::bug", $($arg)+)
    };
}
pub(crate) use version_bug;

pub mod error;
pub mod version;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use error::{CoreError, Result};
pub use version::{
    parse_version_label, parse_version_list, parse_version_string, HandshakeProtocol,
    ParsedVersion, TransportVersion, VersionLabel, VersionLabelCodec, VersionRegistry,
};
