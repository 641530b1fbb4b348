// ============================================
// File: crates/quicver-core/src/version/types.rs
// ============================================
//! # Version Identity Types
//!
//! ## Creation Reason
//! A QUIC version is identified by two independent axes: which handshake
//! mechanism it uses and which transport wire-format revision it speaks.
//! This module defines both axes and the validated pair.
//!
//! ## Main Functionality
//! - `HandshakeProtocol`: handshake mechanism (QUIC crypto or TLS 1.3)
//! - `TransportVersion`: ordered transport revision identifier
//! - `ParsedVersion`: validated `(handshake, transport)` pair
//!
//! ## Version History
//! | Identity | Handshake  | Transport      | Notes |
//! |----------|------------|----------------|-------|
//! | Q043     | QUIC crypto| 43             | legacy public header |
//! | Q046     | QUIC crypto| 46             | IETF invariant header |
//! | Q050     | QUIC crypto| 50             | header protection, retry |
//! | T051     | TLS 1.3    | 51             | TLS handshake over gQUIC |
//! | draft29  | TLS 1.3    | IETF draft 29  | IETF QUIC |
//!
//! ## ⚠️ Important Note for Next Developer
//! - The declaration order of `TransportVersion` IS the capability order.
//!   Capability predicates compare against it; re-audit
//!   `capability.rs` before inserting or reordering a variant.
//! - A new variant also needs a row in the supported table
//!   (`registry.rs`) and an update to `is_valid_combination`.
//!
//! ## Last Modified
//! v0.1.0 - Initial version identity types

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================
// HandshakeProtocol
// ============================================

/// Handshake mechanism used by a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeProtocol {
    /// Not a real handshake; paired only with sentinel transport versions.
    Unsupported,
    /// Google's legacy QUIC crypto handshake.
    QuicCrypto,
    /// Standard TLS 1.3 handshake.
    Tls13,
}

impl HandshakeProtocol {
    /// Every handshake kind that real versions use.
    pub const REAL: [Self; 2] = [Self::QuicCrypto, Self::Tls13];

    /// Returns the canonical constant-style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsupported => "PROTOCOL_UNSUPPORTED",
            Self::QuicCrypto => "PROTOCOL_QUIC_CRYPTO",
            Self::Tls13 => "PROTOCOL_TLS1_3",
        }
    }
}

impl fmt::Display for HandshakeProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================
// TransportVersion
// ============================================

/// Transport wire-format revision.
///
/// Variants are declared oldest first; the derived `Ord` is what
/// capability predicates compare against. The discriminant is the
/// revision number used by legacy numeric version strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum TransportVersion {
    /// Not a version; the result of every failed lookup.
    Unsupported = 0,
    /// Legacy public header, QUIC crypto only.
    V43 = 43,
    /// First revision with the IETF invariant header.
    V46 = 46,
    /// Header protection, retry and length-prefixed connection IDs.
    V50 = 50,
    /// Only ever shipped with the TLS handshake.
    V51 = 51,
    /// IETF QUIC draft 29.
    IetfDraft29 = 73,
    /// Never a real version; asks for a greased label.
    ReservedForNegotiation = 999,
}

impl TransportVersion {
    /// Returns the revision number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Maps a revision number back to a variant, sentinels included.
    #[must_use]
    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            0 => Some(Self::Unsupported),
            43 => Some(Self::V43),
            46 => Some(Self::V46),
            50 => Some(Self::V50),
            51 => Some(Self::V51),
            73 => Some(Self::IetfDraft29),
            999 => Some(Self::ReservedForNegotiation),
            _ => None,
        }
    }

    /// Returns the canonical constant-style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsupported => "QUIC_VERSION_UNSUPPORTED",
            Self::V43 => "QUIC_VERSION_43",
            Self::V46 => "QUIC_VERSION_46",
            Self::V50 => "QUIC_VERSION_50",
            Self::V51 => "QUIC_VERSION_51",
            Self::IetfDraft29 => "QUIC_VERSION_IETF_DRAFT_29",
            Self::ReservedForNegotiation => "QUIC_VERSION_RESERVED_FOR_NEGOTIATION",
        }
    }
}

impl fmt::Display for TransportVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================
// Validity
// ============================================

/// Returns `true` if `handshake` and `transport` form a version this
/// implementation can represent.
#[must_use]
pub const fn is_valid_combination(
    handshake: HandshakeProtocol,
    transport: TransportVersion,
) -> bool {
    use TransportVersion as T;

    match handshake {
        HandshakeProtocol::Unsupported => {
            matches!(transport, T::Unsupported | T::ReservedForNegotiation)
        }
        HandshakeProtocol::QuicCrypto => matches!(transport, T::V43 | T::V46 | T::V50),
        HandshakeProtocol::Tls13 => matches!(transport, T::V50 | T::V51 | T::IetfDraft29),
    }
}

// ============================================
// ParsedVersion
// ============================================

/// A validated `(handshake, transport)` pair.
///
/// Values are plain constants; the only constructor that accepts
/// arbitrary parts, [`ParsedVersion::new`], rejects invalid pairs.
///
/// # Example
/// ```
/// use quicver_core::version::{HandshakeProtocol, ParsedVersion, TransportVersion};
///
/// let q046 = ParsedVersion::new(HandshakeProtocol::QuicCrypto, TransportVersion::V46);
/// assert_eq!(q046, Some(ParsedVersion::Q046));
///
/// // Version 51 never shipped with QUIC crypto
/// assert!(ParsedVersion::new(HandshakeProtocol::QuicCrypto, TransportVersion::V51).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    handshake_protocol: HandshakeProtocol,
    transport_version: TransportVersion,
}

impl ParsedVersion {
    /// IETF QUIC draft 29 over TLS 1.3.
    pub const DRAFT29: Self =
        Self::from_parts(HandshakeProtocol::Tls13, TransportVersion::IetfDraft29);
    /// Google QUIC 51 over TLS 1.3.
    pub const T051: Self = Self::from_parts(HandshakeProtocol::Tls13, TransportVersion::V51);
    /// Google QUIC 50 over QUIC crypto.
    pub const Q050: Self = Self::from_parts(HandshakeProtocol::QuicCrypto, TransportVersion::V50);
    /// Google QUIC 46 over QUIC crypto.
    pub const Q046: Self = Self::from_parts(HandshakeProtocol::QuicCrypto, TransportVersion::V46);
    /// Google QUIC 43 over QUIC crypto.
    pub const Q043: Self = Self::from_parts(HandshakeProtocol::QuicCrypto, TransportVersion::V43);
    /// The unsupported sentinel.
    pub const UNSUPPORTED: Self =
        Self::from_parts(HandshakeProtocol::Unsupported, TransportVersion::Unsupported);
    /// The negotiation sentinel; encodes to a fresh greased label.
    pub const RESERVED_FOR_NEGOTIATION: Self = Self::from_parts(
        HandshakeProtocol::Unsupported,
        TransportVersion::ReservedForNegotiation,
    );

    const fn from_parts(
        handshake_protocol: HandshakeProtocol,
        transport_version: TransportVersion,
    ) -> Self {
        assert!(is_valid_combination(handshake_protocol, transport_version));
        Self {
            handshake_protocol,
            transport_version,
        }
    }

    /// Creates a version from its parts, or `None` for an invalid pair.
    #[must_use]
    pub const fn new(
        handshake_protocol: HandshakeProtocol,
        transport_version: TransportVersion,
    ) -> Option<Self> {
        if is_valid_combination(handshake_protocol, transport_version) {
            Some(Self {
                handshake_protocol,
                transport_version,
            })
        } else {
            None
        }
    }

    /// Returns the unsupported sentinel.
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::UNSUPPORTED
    }

    /// Returns the negotiation sentinel.
    #[must_use]
    pub const fn reserved_for_negotiation() -> Self {
        Self::RESERVED_FOR_NEGOTIATION
    }

    /// Returns the handshake mechanism.
    #[must_use]
    pub const fn handshake_protocol(&self) -> HandshakeProtocol {
        self.handshake_protocol
    }

    /// Returns the transport revision.
    #[must_use]
    pub const fn transport_version(&self) -> TransportVersion {
        self.transport_version
    }

    /// Returns `true` unless this is the unsupported sentinel.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self.transport_version, TransportVersion::Unsupported)
    }

    /// Returns `true` for the negotiation sentinel.
    #[must_use]
    pub const fn is_reserved_for_negotiation(&self) -> bool {
        matches!(self.transport_version, TransportVersion::ReservedForNegotiation)
    }
}

impl Default for ParsedVersion {
    fn default() -> Self {
        Self::UNSUPPORTED
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_order_is_chronological() {
        use TransportVersion as T;
        let ordered = [
            T::Unsupported,
            T::V43,
            T::V46,
            T::V50,
            T::V51,
            T::IetfDraft29,
            T::ReservedForNegotiation,
        ];
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_number_round_trip() {
        for number in [0, 43, 46, 50, 51, 73, 999] {
            let transport = TransportVersion::from_number(number).unwrap();
            assert_eq!(transport.number(), number);
        }
        assert_eq!(TransportVersion::from_number(44), None);
        assert_eq!(TransportVersion::from_number(1), None);
    }

    #[test]
    fn test_valid_combinations() {
        use HandshakeProtocol as H;
        use TransportVersion as T;

        assert!(is_valid_combination(H::QuicCrypto, T::V43));
        assert!(is_valid_combination(H::QuicCrypto, T::V50));
        assert!(is_valid_combination(H::Tls13, T::V50));
        assert!(is_valid_combination(H::Tls13, T::IetfDraft29));
        assert!(is_valid_combination(H::Unsupported, T::Unsupported));
        assert!(is_valid_combination(H::Unsupported, T::ReservedForNegotiation));

        assert!(!is_valid_combination(H::QuicCrypto, T::V51));
        assert!(!is_valid_combination(H::QuicCrypto, T::IetfDraft29));
        assert!(!is_valid_combination(H::Tls13, T::V43));
        assert!(!is_valid_combination(H::Tls13, T::ReservedForNegotiation));
        assert!(!is_valid_combination(H::QuicCrypto, T::ReservedForNegotiation));
        assert!(!is_valid_combination(H::Unsupported, T::V46));
    }

    #[test]
    fn test_is_known() {
        assert!(ParsedVersion::Q043.is_known());
        assert!(ParsedVersion::DRAFT29.is_known());
        assert!(ParsedVersion::RESERVED_FOR_NEGOTIATION.is_known());
        assert!(!ParsedVersion::UNSUPPORTED.is_known());
        assert!(!ParsedVersion::default().is_known());
    }

    #[test]
    fn test_structural_equality() {
        let q050 =
            ParsedVersion::new(HandshakeProtocol::QuicCrypto, TransportVersion::V50).unwrap();
        let t050 = ParsedVersion::new(HandshakeProtocol::Tls13, TransportVersion::V50).unwrap();
        assert_eq!(q050, ParsedVersion::Q050);
        assert_ne!(q050, t050);
    }

    #[test]
    fn test_names() {
        assert_eq!(HandshakeProtocol::Tls13.to_string(), "PROTOCOL_TLS1_3");
        assert_eq!(TransportVersion::V46.to_string(), "QUIC_VERSION_46");
        assert_eq!(
            TransportVersion::IetfDraft29.to_string(),
            "QUIC_VERSION_IETF_DRAFT_29"
        );
    }
}
