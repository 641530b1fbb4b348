// ============================================
// File: crates/quicver-cli/src/inventory.rs
// ============================================
//! # Version Inventory
//!
//! ## Creation Reason
//! Turns a `ToolConfig` into the live objects a QUIC endpoint would hold
//! (flag store, registry, label codec) and answers the questions the
//! command-line tool asks of them.
//!
//! ## Main Functionality
//! - `Inventory::from_config`: apply the disabled set to a fresh flag store
//! - `summaries`: one serializable row per supported version
//! - `capabilities`: capability table for one version
//! - `negotiation_labels`: labels for a Version Negotiation packet
//! - `sanity_check`: warnings for a policy that cannot serve a handshake
//!
//! ## Last Modified
//! v0.1.0 - Initial inventory

use std::sync::Arc;

use bytes::BytesMut;
use serde::Serialize;
use tracing::{debug, warn};

use quicver_common::{MemoryFlagStore, OsRandom};
use quicver_core::version::{
    alpn_for_version, supported_entry, write_label_list, HandshakeProtocol, ParsedVersion,
    VersionLabel, VersionLabelCodec, VersionRegistry, SUPPORTED_VERSIONS,
};

use crate::config::ToolConfig;

/// One row of `quicver list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    /// Display name
    pub name: String,
    /// Handshake protocol name
    pub handshake: String,
    /// Transport revision name
    pub transport: String,
    /// Wire label as eight hex digits
    pub label: String,
    /// ALPN token
    pub alpn: Option<String>,
    /// Toggle controlling this version
    pub flag: &'static str,
    /// Whether the toggle currently allows it
    pub enabled: bool,
}

/// Live version policy built from configuration.
#[derive(Debug, Clone)]
pub struct Inventory {
    registry: VersionRegistry,
    codec: VersionLabelCodec,
    offer: Option<Vec<ParsedVersion>>,
}

impl Inventory {
    /// Builds the inventory described by `config`.
    #[must_use]
    pub fn from_config(config: &ToolConfig) -> Self {
        // Disabled versions start with their flag set
        let flags = MemoryFlagStore::from_pairs(
            config
                .versions
                .disabled_versions()
                .into_iter()
                .filter_map(supported_entry)
                .map(|row| (row.disable_flag, true)),
        );
        let registry = VersionRegistry::new(Arc::new(flags));

        let codec = if config.versions.grease_randomness {
            VersionLabelCodec::new(Arc::new(OsRandom))
        } else {
            VersionLabelCodec::deterministic()
        };

        debug!(registry = ?registry, "Inventory built");
        Self {
            registry,
            codec,
            offer: config.versions.offered_versions(),
        }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Rows for every supported version, optionally narrowed.
    #[must_use]
    pub fn summaries(
        &self,
        enabled_only: bool,
        handshake: Option<HandshakeProtocol>,
    ) -> Vec<VersionSummary> {
        SUPPORTED_VERSIONS
            .iter()
            .filter(|row| handshake.map_or(true, |hp| row.version.handshake_protocol() == hp))
            .map(|row| VersionSummary {
                name: row.version.to_string(),
                handshake: row.version.handshake_protocol().to_string(),
                transport: row.version.transport_version().to_string(),
                label: format!("{:08x}", row.label.value()),
                alpn: alpn_for_version(row.version),
                flag: row.disable_flag,
                enabled: self.registry.is_enabled(row.version),
            })
            .filter(|summary| !enabled_only || summary.enabled)
            .collect()
    }

    /// Versions this endpoint would offer, in preference order.
    ///
    /// The configured offer list narrowed to enabled versions, or every
    /// enabled version when no offer list is set.
    #[must_use]
    pub fn offered(&self) -> Vec<ParsedVersion> {
        let enabled = self.registry.currently_supported();
        match &self.offer {
            Some(offer) => offer.iter().copied().filter(|v| enabled.contains(v)).collect(),
            None => enabled,
        }
    }

    /// Labels for a Version Negotiation packet: one greased label, then
    /// the offered versions.
    #[must_use]
    pub fn negotiation_labels(&self) -> Vec<VersionLabel> {
        let mut labels = vec![self.codec.encode(ParsedVersion::RESERVED_FOR_NEGOTIATION)];
        labels.extend(self.codec.encode_all(&self.offered()));
        labels
    }

    /// Wire encoding of [`negotiation_labels`](Self::negotiation_labels).
    #[must_use]
    pub fn negotiation_wire(&self, labels: &[VersionLabel]) -> BytesMut {
        let mut buf = BytesMut::new();
        write_label_list(labels, &mut buf);
        buf
    }

    /// Problems with the current policy, one line each.
    #[must_use]
    pub fn sanity_check(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.registry.currently_supported().is_empty() {
            findings.push("every QUIC version is disabled".to_string());
        }

        for handshake in HandshakeProtocol::REAL {
            let in_table = SUPPORTED_VERSIONS
                .iter()
                .any(|row| row.version.handshake_protocol() == handshake);
            let enabled = self
                .registry
                .currently_supported()
                .into_iter()
                .any(|v| v.handshake_protocol() == handshake);
            if in_table && !enabled {
                findings.push(format!("no enabled version uses {handshake}"));
            }
        }

        if let Some(offer) = &self.offer {
            if self.offered().is_empty() {
                findings.push(format!(
                    "offer list ({} entries) has no enabled version",
                    offer.len()
                ));
            }
            for version in offer {
                if !self.registry.is_enabled(*version) {
                    findings.push(format!("offered version {version} is disabled"));
                }
            }
        }

        for finding in &findings {
            warn!("{}", finding);
        }
        findings
    }
}

/// Capability name and value pairs for `version`, in a stable order.
#[must_use]
pub fn capabilities(version: ParsedVersion) -> Vec<(&'static str, bool)> {
    vec![
        ("uses_tls", version.uses_tls()),
        ("uses_quic_crypto", version.uses_quic_crypto()),
        ("uses_http3", version.uses_http3()),
        ("has_ietf_quic_frames", version.has_ietf_quic_frames()),
        ("has_header_protection", version.has_header_protection()),
        ("supports_client_connection_ids", version.supports_client_connection_ids()),
        (
            "sends_variable_length_packet_number_in_long_header",
            version.sends_variable_length_packet_number_in_long_header(),
        ),
        ("knows_which_decrypter_to_use", version.knows_which_decrypter_to_use()),
        ("uses_initial_obfuscators", version.uses_initial_obfuscators()),
        ("supports_retry", version.supports_retry()),
        ("has_long_header_lengths", version.has_long_header_lengths()),
        ("uses_crypto_frames", version.uses_crypto_frames()),
        ("allows_variable_length_connection_ids", version.allows_variable_length_connection_ids()),
        ("has_length_prefixed_connection_ids", version.has_length_prefixed_connection_ids()),
        ("has_ietf_invariant_header", version.has_ietf_invariant_header()),
        ("supports_message_frames", version.supports_message_frames()),
        ("has_retry_integrity_tag", version.has_retry_integrity_tag()),
        (
            "authenticates_handshake_connection_ids",
            version.authenticates_handshake_connection_ids(),
        ),
        ("has_var_int_transport_params", version.has_var_int_transport_params()),
        ("has_handshake_done", version.has_handshake_done()),
        ("allows_low_flow_control_limits", version.allows_low_flow_control_limits()),
        ("supports_anti_amplification_limit", version.supports_anti_amplification_limit()),
        ("can_send_coalesced_packets", version.can_send_coalesced_packets()),
        ("supports_google_alt_svc_format", version.supports_google_alt_svc_format()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicver_core::version::FIXED_GREASE_LABEL;

    fn fixed_config(toml: &str) -> ToolConfig {
        let mut config = ToolConfig::from_str(toml).unwrap();
        config.versions.grease_randomness = false;
        config
    }

    #[test]
    fn test_default_inventory() {
        let inventory = Inventory::from_config(&ToolConfig::default());
        let rows = inventory.summaries(false, None);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.enabled));
        assert_eq!(rows[0].name, "draft29");
        assert_eq!(rows[0].label, "ff00001d");
        assert_eq!(rows[0].alpn.as_deref(), Some("h3-29"));
        assert_eq!(rows[0].flag, "quic_disable_version_draft_29");
        assert_eq!(rows[3].label, "51303436");
        assert!(inventory.sanity_check().is_empty());
    }

    #[test]
    fn test_disabled_versions_applied() {
        let config = fixed_config("[versions]\ndisabled = [\"Q043\", \"T051\"]\n");
        let inventory = Inventory::from_config(&config);
        assert!(!inventory.registry().is_enabled(ParsedVersion::Q043));
        assert_eq!(
            inventory.registry().currently_supported(),
            vec![ParsedVersion::DRAFT29, ParsedVersion::Q050, ParsedVersion::Q046]
        );

        let enabled: Vec<_> = inventory
            .summaries(true, Some(HandshakeProtocol::Tls13))
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(enabled, vec!["draft29".to_string()]);
    }

    #[test]
    fn test_negotiation_labels() {
        let config = fixed_config("[versions]\ndisabled = [\"Q050\"]\n");
        let inventory = Inventory::from_config(&config);
        let labels = inventory.negotiation_labels();
        assert_eq!(labels[0], FIXED_GREASE_LABEL);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[1].value(), 0xff00_001d);

        let wire = inventory.negotiation_wire(&labels);
        assert_eq!(wire.len(), 20);
        assert_eq!(&wire[..4], &[0xda, 0x5a, 0x3a, 0x3a]);
    }

    #[test]
    fn test_random_grease_is_still_grease() {
        let inventory = Inventory::from_config(&ToolConfig::default());
        for _ in 0..32 {
            assert!(inventory.negotiation_labels()[0].is_grease());
        }
    }

    #[test]
    fn test_offer_list() {
        let inventory = Inventory::from_config(&fixed_config(
            "[versions]\ndisabled = [\"Q050\"]\noffer = \"Q050,Q046,h3-29\"\n",
        ));
        assert_eq!(inventory.offered(), vec![ParsedVersion::Q046, ParsedVersion::DRAFT29]);

        let findings = inventory.sanity_check();
        assert_eq!(findings, vec!["offered version Q050 is disabled".to_string()]);
    }

    #[test]
    fn test_sanity_check_empty_handshake() {
        let inventory = Inventory::from_config(&fixed_config(
            "[versions]\ndisabled = [\"draft29\", \"T051\"]\n",
        ));
        let findings = inventory.sanity_check();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("PROTOCOL_TLS1_3"));
    }

    #[test]
    fn test_sanity_check_everything_disabled() {
        let inventory = Inventory::from_config(&fixed_config(
            "[versions]\n\
             disabled = [\"draft29\", \"T051\", \"Q050\", \"Q046\", \"Q043\"]\n\
             offer = \"Q046\"\n",
        ));
        let findings = inventory.sanity_check();
        assert!(findings.contains(&"every QUIC version is disabled".to_string()));
        assert!(findings.iter().any(|f| f.contains("PROTOCOL_QUIC_CRYPTO")));
        assert!(findings.iter().any(|f| f.starts_with("offer list")));
        assert_eq!(inventory.negotiation_labels().len(), 1);
    }

    #[test]
    fn test_capability_table() {
        let caps = capabilities(ParsedVersion::Q046);
        assert_eq!(caps.len(), 24);
        assert!(caps.contains(&("uses_quic_crypto", true)));
        assert!(caps.contains(&("uses_http3", false)));
        assert!(caps.contains(&("supports_google_alt_svc_format", true)));

        let caps = capabilities(ParsedVersion::DRAFT29);
        let off: Vec<_> = caps.iter().filter(|(_, value)| !value).map(|(name, _)| *name).collect();
        assert_eq!(off, vec!["uses_quic_crypto", "supports_google_alt_svc_format"]);
    }

}
