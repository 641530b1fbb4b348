// ============================================
// File: crates/quicver-core/src/version/parse.rs
// ============================================
//! # Version String Parsing
//!
//! ## Creation Reason
//! Versions arrive as text from command-line flags, configuration files
//! and ALPN. This module maps any of those spellings to a version.
//!
//! ## Main Functionality
//! - `parse_version_string`: one token, never fails
//! - `parse_version_list`: comma-separated list, lenient
//! - `FromStr` / serde support for strict callers
//!
//! ## Accepted Spellings (first match wins)
//! 1. `""` → unsupported
//! 2. `"46"` → legacy QUIC crypto revision number
//! 3. `"Q046"`, `"draft29"`, `"h3-29"`, `"h3-Q050"`, `"QUIC_VERSION_46"`
//! 4. `"ff00001d"` → TLS versions by label rendering
//! 5. anything else → unsupported
//!
//! ## ⚠️ Important Note for Next Developer
//! - Misses are expected (config skew, peer input) and logged at info
//! - Lists drop unknown and duplicate tokens instead of failing startup
//!
//! ## Last Modified
//! v0.1.0 - Initial parser

use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::format::alpn_for_version;
use super::registry::{all_supported_transport_versions, SUPPORTED_VERSIONS};
use super::types::{HandshakeProtocol, ParsedVersion, TransportVersion};
use crate::error::{CoreError, Result};

/// Parses one version token.
///
/// Returns [`ParsedVersion::UNSUPPORTED`] for anything unrecognized.
///
/// # Example
/// ```
/// use quicver_core::version::{parse_version_string, ParsedVersion};
///
/// assert_eq!(parse_version_string("43"), ParsedVersion::Q043);
/// assert_eq!(parse_version_string("h3-29"), ParsedVersion::DRAFT29);
/// assert_eq!(parse_version_string("ff00001d"), ParsedVersion::DRAFT29);
/// assert!(!parse_version_string("h3").is_known());
/// ```
#[must_use]
pub fn parse_version_string(text: &str) -> ParsedVersion {
    if text.is_empty() {
        return ParsedVersion::UNSUPPORTED;
    }

    if let Ok(number) = text.parse::<u32>() {
        if number > 0 {
            return parse_legacy_number(number);
        }
    }

    for row in &SUPPORTED_VERSIONS {
        let version = row.version;
        let matches_name = version.to_string() == text
            || alpn_for_version(version).is_some_and(|alpn| alpn == text)
            || (version.handshake_protocol() == HandshakeProtocol::QuicCrypto
                && version.transport_version().name() == text);
        if matches_name {
            return version;
        }
    }

    for row in &SUPPORTED_VERSIONS {
        if row.version.handshake_protocol() == HandshakeProtocol::Tls13
            && row.label.to_string() == text
        {
            return row.version;
        }
    }

    info!(input = text, "Unsupported QUIC version string");
    ParsedVersion::UNSUPPORTED
}

fn parse_legacy_number(number: u32) -> ParsedVersion {
    let Some(transport) = TransportVersion::from_number(number) else {
        return ParsedVersion::UNSUPPORTED;
    };
    if !all_supported_transport_versions().contains(&transport) {
        return ParsedVersion::UNSUPPORTED;
    }
    ParsedVersion::new(HandshakeProtocol::QuicCrypto, transport)
        .unwrap_or(ParsedVersion::UNSUPPORTED)
}

/// Parses a comma-separated version list.
///
/// Tokens are trimmed; unknown tokens and repeats are dropped. The
/// result keeps first-appearance order.
///
/// # Example
/// ```
/// use quicver_core::version::{parse_version_list, ParsedVersion};
///
/// let versions = parse_version_list("h3-29, h3-29 , garbage,Q046");
/// assert_eq!(versions, vec![ParsedVersion::DRAFT29, ParsedVersion::Q046]);
/// ```
#[must_use]
pub fn parse_version_list(text: &str) -> Vec<ParsedVersion> {
    let mut versions = Vec::new();
    for token in text.split(',') {
        let version = parse_version_string(token.trim());
        if version.is_known() && !versions.contains(&version) {
            versions.push(version);
        }
    }
    versions
}

// ============================================
// Strict Parsing
// ============================================

impl FromStr for ParsedVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let version = parse_version_string(s.trim());
        if version.is_known() {
            Ok(version)
        } else {
            Err(CoreError::unsupported(s))
        }
    }
}

impl Serialize for ParsedVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParsedVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// ============================================
// Tests
// ============================================
