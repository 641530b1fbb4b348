// ============================================
// File: crates/quicver-core/src/version/capability.rs
// ============================================
//! # Version Capabilities
//!
//! ## Creation Reason
//! Packet framing, header protection and handshake code all need to
//! know what a version supports. Those answers are derived here, from
//! the version identity alone, so no other module compares transport
//! revisions by hand.
//!
//! ## Main Functionality
//! - Named cut-point constants on the transport ordering
//! - Capability predicates on `ParsedVersion`
//! - Transport-only predicates for callers without a full identity
//!
//! ## Cut-points
//! ```text
//!  Q043 │ Q046 │ Q050  T051  draft29
//!  ─────┼──────┼─────────────────────►  transport order
//!       │      └─ LAST_PRE_MODERNIZATION_VERSION
//!       └──────── LAST_LEGACY_HEADER_VERSION
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Predicates are pure: never read flags or other mutable state here
//! - Calling a predicate on the unsupported sentinel is a bug; it is
//!   reported and answered with `false`
//! - Adding a transport revision: decide which side of each cut-point
//!   it falls on, then extend `test_boundary_versions`
//!
//! ## Last Modified
//! v0.1.0 - Initial capability model

use super::types::{HandshakeProtocol, ParsedVersion, TransportVersion};

// ============================================
// Cut-points
// ============================================

/// Newest revision before header protection, retry, length-prefixed
/// connection IDs and the rest of the IETF-aligned packet format.
pub const LAST_PRE_MODERNIZATION_VERSION: TransportVersion = TransportVersion::V46;

/// Newest revision that still used the legacy public header.
pub const LAST_LEGACY_HEADER_VERSION: TransportVersion = TransportVersion::V43;

const fn is_modern(transport: TransportVersion) -> bool {
    transport as u32 > LAST_PRE_MODERNIZATION_VERSION as u32
}

const fn has_invariant_header(transport: TransportVersion) -> bool {
    transport as u32 > LAST_LEGACY_HEADER_VERSION as u32
}

// ============================================
// Transport-only predicates
// ============================================

/// Returns `true` if `transport` allows connection IDs of any length.
#[must_use]
pub fn version_allows_variable_length_connection_ids(transport: TransportVersion) -> bool {
    if transport == TransportVersion::Unsupported {
        crate::version_bug!("variable-length connection ID check on unsupported transport version");
        return false;
    }
    is_modern(transport)
}

/// Returns `true` if `transport` encodes connection ID lengths as a
/// length prefix rather than in 4-bit fields.
#[must_use]
pub fn version_has_length_prefixed_connection_ids(transport: TransportVersion) -> bool {
    if transport == TransportVersion::Unsupported {
        crate::version_bug!("length-prefixed connection ID check on unsupported transport version");
        return false;
    }
    is_modern(transport)
}

/// Returns `true` if `transport` is advertised with the Google Alt-Svc
/// format.
#[must_use]
pub const fn version_supports_google_alt_svc_format(transport: TransportVersion) -> bool {
    transport as u32 <= LAST_PRE_MODERNIZATION_VERSION as u32
}

// ============================================
// ParsedVersion predicates
// ============================================

impl ParsedVersion {
    /// Reports a bug when asked about an unknown version.
    fn check_known(&self, predicate: &'static str) -> bool {
        if self.is_known() {
            true
        } else {
            crate::version_bug!(predicate, "capability queried on unsupported version");
            false
        }
    }

    /// Returns `true` if this version uses the TLS 1.3 handshake.
    #[must_use]
    pub fn uses_tls(&self) -> bool {
        self.check_known("uses_tls") && self.handshake_protocol() == HandshakeProtocol::Tls13
    }

    /// Returns `true` if this version uses the QUIC crypto handshake.
    #[must_use]
    pub fn uses_quic_crypto(&self) -> bool {
        self.check_known("uses_quic_crypto")
            && self.handshake_protocol() == HandshakeProtocol::QuicCrypto
    }

    /// Returns `true` if this version speaks HTTP/3 framing.
    #[must_use]
    pub fn uses_http3(&self) -> bool {
        self.check_known("uses_http3") && is_modern(self.transport_version())
    }

    /// Returns `true` if this version uses IETF QUIC frames.
    #[must_use]
    pub fn has_ietf_quic_frames(&self) -> bool {
        self.check_known("has_ietf_quic_frames") && self.uses_http3()
    }

    /// Returns `true` if packet headers are protected.
    #[must_use]
    pub fn has_header_protection(&self) -> bool {
        self.check_known("has_header_protection") && is_modern(self.transport_version())
    }

    /// Returns `true` if the client may choose its own connection ID.
    #[must_use]
    pub fn supports_client_connection_ids(&self) -> bool {
        self.check_known("supports_client_connection_ids") && is_modern(self.transport_version())
    }

    /// Returns `true` if long headers carry a variable-length packet number.
    #[must_use]
    pub fn sends_variable_length_packet_number_in_long_header(&self) -> bool {
        self.check_known("sends_variable_length_packet_number_in_long_header")
            && is_modern(self.transport_version())
    }

    /// Returns `true` if the packet's encryption level selects the decrypter.
    #[must_use]
    pub fn knows_which_decrypter_to_use(&self) -> bool {
        self.check_known("knows_which_decrypter_to_use") && is_modern(self.transport_version())
    }

    /// Returns `true` if initial packets use version-specific obfuscation keys.
    #[must_use]
    pub fn uses_initial_obfuscators(&self) -> bool {
        self.check_known("uses_initial_obfuscators") && is_modern(self.transport_version())
    }

    /// Returns `true` if the server may answer with a Retry packet.
    #[must_use]
    pub fn supports_retry(&self) -> bool {
        self.check_known("supports_retry") && is_modern(self.transport_version())
    }

    /// Returns `true` if long headers carry an explicit length field.
    #[must_use]
    pub fn has_long_header_lengths(&self) -> bool {
        self.check_known("has_long_header_lengths") && is_modern(self.transport_version())
    }

    /// Returns `true` if handshake data travels in CRYPTO frames.
    #[must_use]
    pub fn uses_crypto_frames(&self) -> bool {
        self.check_known("uses_crypto_frames") && is_modern(self.transport_version())
    }

    /// Returns `true` if connection IDs may have any length.
    #[must_use]
    pub fn allows_variable_length_connection_ids(&self) -> bool {
        self.check_known("allows_variable_length_connection_ids")
            && version_allows_variable_length_connection_ids(self.transport_version())
    }

    /// Returns `true` if connection IDs are length-prefixed on the wire.
    #[must_use]
    pub fn has_length_prefixed_connection_ids(&self) -> bool {
        self.check_known("has_length_prefixed_connection_ids")
            && version_has_length_prefixed_connection_ids(self.transport_version())
    }

    /// Returns `true` if the header follows the IETF invariants.
    #[must_use]
    pub fn has_ietf_invariant_header(&self) -> bool {
        self.check_known("has_ietf_invariant_header")
            && has_invariant_header(self.transport_version())
    }

    /// Returns `true` if MESSAGE (datagram) frames are available.
    #[must_use]
    pub fn supports_message_frames(&self) -> bool {
        self.check_known("supports_message_frames")
            && has_invariant_header(self.transport_version())
    }

    /// Returns `true` if Retry packets carry an integrity tag.
    #[must_use]
    pub fn has_retry_integrity_tag(&self) -> bool {
        self.check_known("has_retry_integrity_tag") && self.uses_tls()
    }

    /// Returns `true` if handshake connection IDs are authenticated
    /// through transport parameters.
    #[must_use]
    pub fn authenticates_handshake_connection_ids(&self) -> bool {
        self.check_known("authenticates_handshake_connection_ids") && self.uses_tls()
    }

    /// Returns `true` if transport parameters use variable-length integers.
    #[must_use]
    pub fn has_var_int_transport_params(&self) -> bool {
        self.check_known("has_var_int_transport_params") && self.uses_tls()
    }

    /// Returns `true` if the HANDSHAKE_DONE frame exists.
    #[must_use]
    pub fn has_handshake_done(&self) -> bool {
        self.check_known("has_handshake_done") && self.uses_tls()
    }

    /// Returns `true` if low initial flow-control limits are acceptable.
    #[must_use]
    pub fn allows_low_flow_control_limits(&self) -> bool {
        self.check_known("allows_low_flow_control_limits") && self.uses_http3()
    }

    /// Returns `true` if the server enforces the anti-amplification limit.
    #[must_use]
    pub fn supports_anti_amplification_limit(&self) -> bool {
        self.check_known("supports_anti_amplification_limit") && self.uses_http3()
    }

    /// Returns `true` if several packets may be coalesced in one datagram.
    #[must_use]
    pub fn can_send_coalesced_packets(&self) -> bool {
        self.check_known("can_send_coalesced_packets")
            && self.has_long_header_lengths()
            && self.uses_tls()
    }

    /// Returns `true` if this version is advertised with the Google
    /// Alt-Svc format.
    #[must_use]
    pub fn supports_google_alt_svc_format(&self) -> bool {
        self.check_known("supports_google_alt_svc_format")
            && version_supports_google_alt_svc_format(self.transport_version())
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_events;

    const ALL: [ParsedVersion; 5] = [
        ParsedVersion::DRAFT29,
        ParsedVersion::T051,
        ParsedVersion::Q050,
        ParsedVersion::Q046,
        ParsedVersion::Q043,
    ];

    #[test]
    fn test_boundary_versions() {
        // Q046 sits on the modernization cut-point, Q050 just past it
        let q046 = ParsedVersion::Q046;
        let q050 = ParsedVersion::Q050;

        assert!(!q046.has_header_protection());
        assert!(q050.has_header_protection());
        assert!(!q046.supports_retry());
        assert!(q050.supports_retry());
        assert!(!q046.has_length_prefixed_connection_ids());
        assert!(q050.has_length_prefixed_connection_ids());
        assert!(!q046.allows_variable_length_connection_ids());
        assert!(q050.allows_variable_length_connection_ids());
        assert!(!q046.sends_variable_length_packet_number_in_long_header());
        assert!(q050.sends_variable_length_packet_number_in_long_header());
        assert!(!q046.knows_which_decrypter_to_use());
        assert!(q050.knows_which_decrypter_to_use());
        assert!(!q046.supports_client_connection_ids());
        assert!(q050.supports_client_connection_ids());
        assert!(!q046.uses_http3());
        assert!(q050.uses_http3());
        assert!(q046.supports_google_alt_svc_format());
        assert!(!q050.supports_google_alt_svc_format());

        // Q043 sits on the legacy header cut-point, Q046 just past it
        assert!(!ParsedVersion::Q043.has_ietf_invariant_header());
        assert!(q046.has_ietf_invariant_header());
        assert!(!ParsedVersion::Q043.supports_message_frames());
        assert!(q046.supports_message_frames());
    }

    #[test]
    fn test_tls_derived_predicates() {
        for version in ALL {
            let tls = version.uses_tls();
            assert_eq!(version.has_retry_integrity_tag(), tls);
            assert_eq!(version.authenticates_handshake_connection_ids(), tls);
            assert_eq!(version.has_var_int_transport_params(), tls);
            assert_eq!(version.has_handshake_done(), tls);
            assert_eq!(version.uses_quic_crypto(), !tls);
        }
        assert!(ParsedVersion::DRAFT29.uses_tls());
        assert!(ParsedVersion::T051.uses_tls());
        assert!(!ParsedVersion::Q050.uses_tls());
    }

    #[test]
    fn test_http3_derived_predicates() {
        for version in ALL {
            let http3 = version.uses_http3();
            assert_eq!(version.allows_low_flow_control_limits(), http3);
            assert_eq!(version.supports_anti_amplification_limit(), http3);
            assert_eq!(version.has_ietf_quic_frames(), http3);
        }
    }

    #[test]
    fn test_coalescing_needs_tls_and_lengths() {
        assert!(ParsedVersion::DRAFT29.can_send_coalesced_packets());
        assert!(ParsedVersion::T051.can_send_coalesced_packets());
        // Long header lengths but QUIC crypto
        assert!(ParsedVersion::Q050.has_long_header_lengths());
        assert!(!ParsedVersion::Q050.can_send_coalesced_packets());
        assert!(!ParsedVersion::Q043.can_send_coalesced_packets());
    }

    #[test]
    fn test_predicates_are_pure() {
        for version in ALL {
            let copy = version;
            assert_eq!(version.uses_http3(), copy.uses_http3());
            assert_eq!(version.uses_tls(), copy.uses_tls());
            assert_eq!(
                version.supports_google_alt_svc_format(),
                copy.supports_google_alt_svc_format()
            );
        }
    }

    #[test]
    fn test_unknown_version_reports_bug() {
        let (result, events) = capture_events(|| ParsedVersion::UNSUPPORTED.uses_tls());
        assert!(!result);
        assert_eq!(events.error_count(), 1);

        let (result, events) =
            capture_events(|| ParsedVersion::UNSUPPORTED.supports_google_alt_svc_format());
        assert!(!result);
        assert_eq!(events.error_count(), 1);
    }

    #[test]
    fn test_derived_predicates_report_own_name() {
        let derived: [(&str, fn(&ParsedVersion) -> bool); 8] = [
            ("has_ietf_quic_frames", ParsedVersion::has_ietf_quic_frames),
            ("has_retry_integrity_tag", ParsedVersion::has_retry_integrity_tag),
            (
                "authenticates_handshake_connection_ids",
                ParsedVersion::authenticates_handshake_connection_ids,
            ),
            ("has_var_int_transport_params", ParsedVersion::has_var_int_transport_params),
            ("has_handshake_done", ParsedVersion::has_handshake_done),
            ("allows_low_flow_control_limits", ParsedVersion::allows_low_flow_control_limits),
            (
                "supports_anti_amplification_limit",
                ParsedVersion::supports_anti_amplification_limit,
            ),
            ("can_send_coalesced_packets", ParsedVersion::can_send_coalesced_packets),
        ];

        for (name, predicate) in derived {
            let (result, events) = capture_events(|| predicate(&ParsedVersion::UNSUPPORTED));
            assert!(!result, "{name}");
            assert_eq!(events.error_count(), 1, "{name}");
            assert_eq!(events.field_values("predicate"), vec![name.to_string()]);
        }
    }

    #[test]
    fn test_transport_only_predicates() {
        assert!(version_allows_variable_length_connection_ids(TransportVersion::V50));
        assert!(!version_allows_variable_length_connection_ids(TransportVersion::V46));
        assert!(version_has_length_prefixed_connection_ids(TransportVersion::IetfDraft29));
        assert!(version_supports_google_alt_svc_format(TransportVersion::V43));
        assert!(!version_supports_google_alt_svc_format(TransportVersion::V51));

        let (result, events) = capture_events(|| {
            version_has_length_prefixed_connection_ids(TransportVersion::Unsupported)
        });
        assert!(!result);
        assert_eq!(events.error_count(), 1);
    }

    #[test]
    fn test_known_versions_do_not_report() {
        let (_, events) = capture_events(|| {
            for version in ALL {
                let _ = version.can_send_coalesced_packets();
                let _ = version.has_ietf_invariant_header();
            }
        });
        assert_eq!(events.error_count(), 0);
    }
}
