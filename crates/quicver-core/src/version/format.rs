// ============================================
// File: crates/quicver-core/src/version/format.rs
// ============================================
//! # Version Formatting
//!
//! Text renderings of versions and version lists for logs, ALPN and
//! operator-facing output. Every function here is deterministic.
//!
//! ## Last Modified
//! v0.1.0 - Initial formatting helpers

use std::fmt::{self, Display};

use super::label::FIXED_GREASE_LABEL;
use super::registry::supported_entry;
use super::types::{ParsedVersion, TransportVersion};
use super::VersionLabel;

/// Lists longer than this many elements plus one are cut short.
pub const DEFAULT_TRUNCATE_AFTER: usize = 20;

/// Marker appended in place of the elided tail of a long list.
pub const ELLIPSIS: &str = "...";

/// ALPN prefix shared by every version.
pub const ALPN_PREFIX: &str = "h3-";

impl fmt::Display for ParsedVersion {
    /// `0` for the unsupported sentinel, `draft29` for IETF draft 29, and
    /// the label rendering for everything else.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_known() {
            return f.write_str("0");
        }
        if *self == Self::DRAFT29 {
            return f.write_str("draft29");
        }
        if self.is_reserved_for_negotiation() {
            return write!(f, "{FIXED_GREASE_LABEL}");
        }
        match supported_entry(*self) {
            Some(row) => write!(f, "{}", row.label),
            None => write!(f, "{}/{}", self.handshake_protocol(), self.transport_version()),
        }
    }
}

/// Returns the ALPN token for `version`, or `None` if it is unknown.
///
/// Draft 29 is the one irregular entry: its token is `h3-29`, not
/// `h3-draft29`.
#[must_use]
pub fn alpn_for_version(version: ParsedVersion) -> Option<String> {
    if !version.is_known() {
        return None;
    }
    if version == ParsedVersion::DRAFT29 {
        return Some(format!("{ALPN_PREFIX}29"));
    }
    Some(format!("{ALPN_PREFIX}{version}"))
}

/// Joins `items` with `separator`, eliding everything after the
/// `truncate_after + 1`th element.
fn join_truncated<T: Display>(items: &[T], separator: &str, truncate_after: usize) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            out.push_str(separator);
        }
        if i > truncate_after {
            out.push_str(ELLIPSIS);
            break;
        }
        out.push_str(&item.to_string());
    }
    out
}

/// Renders a version list.
///
/// # Example
/// ```
/// use quicver_core::version::{format_version_list, ParsedVersion};
///
/// let versions = [
///     ParsedVersion::DRAFT29,
///     ParsedVersion::T051,
///     ParsedVersion::Q050,
///     ParsedVersion::Q046,
///     ParsedVersion::Q043,
/// ];
/// assert_eq!(format_version_list(&versions, ",", 2), "draft29,T051,Q050,...");
/// ```
#[must_use]
pub fn format_version_list(
    versions: &[ParsedVersion],
    separator: &str,
    truncate_after: usize,
) -> String {
    join_truncated(versions, separator, truncate_after)
}

/// Renders a label list.
#[must_use]
pub fn format_label_list(
    labels: &[VersionLabel],
    separator: &str,
    truncate_after: usize,
) -> String {
    join_truncated(labels, separator, truncate_after)
}

/// Renders transport revisions by name, comma-separated, without truncation.
#[must_use]
pub fn format_transport_versions(versions: &[TransportVersion]) -> String {
    join_truncated(versions, ",", usize::MAX)
}

/// `Display` adapter for a version list with the default separator and bound.
#[derive(Debug, Clone, Copy)]
pub struct VersionList<'a>(pub &'a [ParsedVersion]);

impl fmt::Display for VersionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_version_list(self.0, ",", DEFAULT_TRUNCATE_AFTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registry::all_supported_versions;
    use crate::version::types::HandshakeProtocol;

    #[test]
    fn test_version_display() {
        assert_eq!(ParsedVersion::UNSUPPORTED.to_string(), "0");
        assert_eq!(ParsedVersion::DRAFT29.to_string(), "draft29");
        assert_eq!(ParsedVersion::T051.to_string(), "T051");
        assert_eq!(ParsedVersion::Q050.to_string(), "Q050");
        assert_eq!(ParsedVersion::Q046.to_string(), "Q046");
        assert_eq!(ParsedVersion::Q043.to_string(), "Q043");
        assert_eq!(ParsedVersion::RESERVED_FOR_NEGOTIATION.to_string(), "da5a3a3a");

        let t050 = ParsedVersion::new(HandshakeProtocol::Tls13, TransportVersion::V50).unwrap();
        assert_eq!(t050.to_string(), "PROTOCOL_TLS1_3/QUIC_VERSION_50");
    }

    #[test]
    fn test_alpn() {
        assert_eq!(alpn_for_version(ParsedVersion::DRAFT29).as_deref(), Some("h3-29"));
        assert_eq!(alpn_for_version(ParsedVersion::T051).as_deref(), Some("h3-T051"));
        assert_eq!(alpn_for_version(ParsedVersion::Q046).as_deref(), Some("h3-Q046"));
        assert_eq!(alpn_for_version(ParsedVersion::UNSUPPORTED), None);

        let tokens: Vec<_> = all_supported_versions()
            .into_iter()
            .filter_map(alpn_for_version)
            .collect();
        let distinct: std::collections::HashSet<_> = tokens.iter().collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(distinct.len(), tokens.len());
    }

    #[test]
    fn test_truncation() {
        let versions = all_supported_versions();
        assert_eq!(
            format_version_list(&versions, ",", 2),
            "draft29,T051,Q050,..."
        );
        assert_eq!(
            format_version_list(&versions, ", ", 3),
            "draft29, T051, Q050, Q046, ..."
        );
        // Exactly truncate_after + 1 elements: nothing elided
        assert_eq!(
            format_version_list(&versions[..3], ",", 2),
            "draft29,T051,Q050"
        );
        assert_eq!(
            format_version_list(&versions, ",", DEFAULT_TRUNCATE_AFTER),
            "draft29,T051,Q050,Q046,Q043"
        );
        assert_eq!(format_version_list(&[], ",", 0), "");
        assert_eq!(format_version_list(&versions, ",", 0), "draft29,...");
    }

    #[test]
    fn test_list_renders_each_element_display() {
        let versions = [
            ParsedVersion::UNSUPPORTED,
            ParsedVersion::RESERVED_FOR_NEGOTIATION,
            ParsedVersion::DRAFT29,
            ParsedVersion::Q043,
        ];
        assert_eq!(
            format_version_list(&versions, " | ", DEFAULT_TRUNCATE_AFTER),
            "0 | da5a3a3a | draft29 | Q043"
        );
    }

    #[test]
    fn test_long_list_uses_default_bound() {
        let versions = vec![ParsedVersion::Q046; 30];
        let rendered = VersionList(&versions).to_string();
        assert_eq!(rendered.matches("Q046").count(), DEFAULT_TRUNCATE_AFTER + 1);
        assert!(rendered.ends_with(",..."));
    }

    #[test]
    fn test_label_and_transport_lists() {
        let labels = [FIXED_GREASE_LABEL, VersionLabel::from_tag(b'Q', b'0', b'4', b'6')];
        assert_eq!(format_label_list(&labels, ",", DEFAULT_TRUNCATE_AFTER), "da5a3a3a,Q046");

        let transports = [TransportVersion::V43, TransportVersion::IetfDraft29];
        assert_eq!(
            format_transport_versions(&transports),
            "QUIC_VERSION_43,QUIC_VERSION_IETF_DRAFT_29"
        );
    }
}
