// ============================================
// File: crates/quicver-core/src/version/mod.rs
// ============================================
//! # Version Module
//!
//! ## Creation Reason
//! Every QUIC packet exchange starts by agreeing on a version. This module
//! owns the identity of each version this stack speaks, the behaviors each
//! one implies, and the encodings used to name versions on the wire and in
//! configuration.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`types`]: `HandshakeProtocol`, `TransportVersion`, `ParsedVersion`
//! - [`registry`]: supported table and runtime enable/disable policy
//! - [`capability`]: feature predicates per version
//! - [`label`]: 32-bit wire labels, grease, label list codec
//! - [`parse`]: text to version
//! - [`format`]: version to text
//!
//! ## Negotiation Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client ──── Initial (label = Q050) ─────────────► Server   │
//! │                                                             │
//! │  Server: parse_version_label(Q050)                          │
//! │          └─ not enabled                                     │
//! │                                                             │
//! │  Client ◄─── Version Negotiation ──────────────── Server    │
//! │              [grease, ff00001d, T051, Q046, Q043]           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Principles
//! - Labels are 4 bytes, big-endian
//! - Label lists are concatenated labels with no length prefix
//! - Grease labels match `?a?a?a?a` and are never a real version
//!
//! ## ⚠️ Important Note for Next Developer
//! - Adding a version means one new row in `SUPPORTED_VERSIONS` plus
//!   a `TransportVersion` variant; compile-time checks catch collisions
//! - Capability cut-points compare transport revisions by number order
//!
//! ## Last Modified
//! v0.1.0 - Initial version handling

pub mod capability;
pub mod format;
pub mod label;
pub mod parse;
pub mod registry;
pub mod types;

// Re-export primary types
pub use capability::{
    version_allows_variable_length_connection_ids, version_has_length_prefixed_connection_ids,
    version_supports_google_alt_svc_format, LAST_LEGACY_HEADER_VERSION,
    LAST_PRE_MODERNIZATION_VERSION,
};
pub use format::{
    alpn_for_version, format_label_list, format_transport_versions, format_version_list,
    VersionList, DEFAULT_TRUNCATE_AFTER,
};
pub use label::{
    label_to_handshake_protocol, label_to_transport_version, parse_version_label,
    read_label_list, uses_4bit_connection_id_length, write_label_list,
    VersionLabel, VersionLabelCodec, FIXED_GREASE_LABEL,
};
pub use parse::{parse_version_list, parse_version_string};
pub use registry::{
    all_supported_transport_versions, all_supported_versions, legacy_version_for_encapsulation,
    parsed_version_of_index, supported_entry, transport_version_of_index, transport_versions_of,
    SupportedVersion, VersionRegistry, SUPPORTED_VERSIONS,
};
pub use types::{is_valid_combination, HandshakeProtocol, ParsedVersion, TransportVersion};
