// ============================================
// File: crates/quicver-core/src/version/registry.rs
// ============================================
//! # Version Registry
//!
//! ## Creation Reason
//! Separates "what this build can speak" (a fixed table) from "what is
//! enabled right now" (runtime toggles), so operators can retire or
//! introduce versions without a rebuild.
//!
//! ## Main Functionality
//! - `SUPPORTED_VERSIONS`: the preference-ordered table, one row per
//!   version with its wire label and its disable flag
//! - `VersionRegistry`: enabled views computed from an injected
//!   `FlagStore` on every call
//! - Index and projection helpers over version lists
//!
//! ## Main Logical Flow
//! 1. `all_supported()` returns the table in preference order
//! 2. `currently_supported()` drops rows whose disable flag is set
//! 3. `set_enabled()` writes exactly one flag
//!
//! ## ⚠️ Important Note for Next Developer
//! - Adding a version: add ONE row to `SUPPORTED_VERSIONS` and bump
//!   `SUPPORTED_VERSION_COUNT`; the compile-time checks below catch
//!   duplicate labels, duplicate identities and grease collisions
//! - The enabled view is never cached; toggles apply immediately
//!
//! ## Last Modified
//! v0.1.0 - Initial registry

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use quicver_common::flags::{FlagStore, MemoryFlagStore};

use super::label::VersionLabel;
use super::types::{HandshakeProtocol, ParsedVersion, TransportVersion};

// ============================================
// Supported Table
// ============================================

/// One row of the supported version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedVersion {
    /// The version identity.
    pub version: ParsedVersion,
    /// Its fixed wire label.
    pub label: VersionLabel,
    /// Flag that disables it when set.
    pub disable_flag: &'static str,
}

/// Number of rows in [`SUPPORTED_VERSIONS`].
pub const SUPPORTED_VERSION_COUNT: usize = 5;

/// Every version this build speaks, most preferred first.
pub const SUPPORTED_VERSIONS: [SupportedVersion; SUPPORTED_VERSION_COUNT] = [
    SupportedVersion {
        version: ParsedVersion::DRAFT29,
        label: VersionLabel::from_tag(0xff, 0x00, 0x00, 29),
        disable_flag: "quic_disable_version_draft_29",
    },
    SupportedVersion {
        version: ParsedVersion::T051,
        label: VersionLabel::from_tag(b'T', b'0', b'5', b'1'),
        disable_flag: "quic_disable_version_t051",
    },
    SupportedVersion {
        version: ParsedVersion::Q050,
        label: VersionLabel::from_tag(b'Q', b'0', b'5', b'0'),
        disable_flag: "quic_disable_version_q050",
    },
    SupportedVersion {
        version: ParsedVersion::Q046,
        label: VersionLabel::from_tag(b'Q', b'0', b'4', b'6'),
        disable_flag: "quic_disable_version_q046",
    },
    SupportedVersion {
        version: ParsedVersion::Q043,
        label: VersionLabel::from_tag(b'Q', b'0', b'4', b'3'),
        disable_flag: "quic_disable_version_q043",
    },
];

const fn same_version(a: ParsedVersion, b: ParsedVersion) -> bool {
    a.handshake_protocol() as u32 == b.handshake_protocol() as u32
        && a.transport_version() as u32 == b.transport_version() as u32
}

const fn same_str(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// Table consistency, checked at compile time.
const _: () = {
    assert!(!SUPPORTED_VERSIONS.is_empty(), "supported version table is empty");

    let mut i = 0;
    while i < SUPPORTED_VERSION_COUNT {
        let row = SUPPORTED_VERSIONS[i];
        assert!(row.version.is_known(), "unsupported sentinel in version table");
        assert!(
            !row.version.is_reserved_for_negotiation(),
            "negotiation sentinel in version table"
        );
        assert!(!row.label.is_grease(), "version label collides with grease pattern");
        assert!(row.label.value() != 0, "zero version label");

        let mut j = i + 1;
        while j < SUPPORTED_VERSION_COUNT {
            let other = SUPPORTED_VERSIONS[j];
            assert!(row.label.value() != other.label.value(), "duplicate version label");
            assert!(!same_version(row.version, other.version), "duplicate version");
            assert!(!same_str(row.disable_flag, other.disable_flag), "duplicate disable flag");
            j += 1;
        }
        i += 1;
    }
};

/// Returns the table row for `version`, if it has one.
#[must_use]
pub fn supported_entry(version: ParsedVersion) -> Option<&'static SupportedVersion> {
    SUPPORTED_VERSIONS.iter().find(|row| row.version == version)
}

/// Returns every supported version, most preferred first.
#[must_use]
pub fn all_supported_versions() -> Vec<ParsedVersion> {
    SUPPORTED_VERSIONS.iter().map(|row| row.version).collect()
}

/// Returns the transport revision of every supported version, in table order.
#[must_use]
pub fn all_supported_transport_versions() -> Vec<TransportVersion> {
    SUPPORTED_VERSIONS
        .iter()
        .map(|row| row.version.transport_version())
        .collect()
}

/// Version used when encapsulating traffic in a legacy-only tunnel.
#[must_use]
pub const fn legacy_version_for_encapsulation() -> ParsedVersion {
    ParsedVersion::Q043
}

fn table_has_handshake(handshake: HandshakeProtocol) -> bool {
    SUPPORTED_VERSIONS
        .iter()
        .any(|row| row.version.handshake_protocol() == handshake)
}

// ============================================
// List Helpers
// ============================================

/// Returns a one-element list holding `versions[index]`, or the
/// unsupported sentinel when `index` is out of range.
#[must_use]
pub fn parsed_version_of_index(versions: &[ParsedVersion], index: usize) -> Vec<ParsedVersion> {
    vec![versions.get(index).copied().unwrap_or(ParsedVersion::UNSUPPORTED)]
}

/// Returns a one-element list holding `versions[index]`, or
/// `TransportVersion::Unsupported` when `index` is out of range.
#[must_use]
pub fn transport_version_of_index(
    versions: &[TransportVersion],
    index: usize,
) -> Vec<TransportVersion> {
    vec![versions.get(index).copied().unwrap_or(TransportVersion::Unsupported)]
}

/// Projects each version onto its transport revision.
#[must_use]
pub fn transport_versions_of(versions: &[ParsedVersion]) -> Vec<TransportVersion> {
    versions.iter().map(ParsedVersion::transport_version).collect()
}

// ============================================
// VersionRegistry
// ============================================

/// Enable/disable policy over [`SUPPORTED_VERSIONS`].
///
/// # Thread Safety
/// The registry holds no state of its own beyond the shared flag store,
/// so it is `Send + Sync` and cheap to clone.
///
/// # Example
/// ```
/// use quicver_core::version::{HandshakeProtocol, ParsedVersion, VersionRegistry};
///
/// let registry = VersionRegistry::with_defaults();
/// assert!(registry.is_enabled(ParsedVersion::T051));
///
/// registry.disable(ParsedVersion::DRAFT29);
/// registry.disable(ParsedVersion::T051);
/// assert!(registry.currently_supported_with(HandshakeProtocol::Tls13).is_empty());
/// ```
#[derive(Clone)]
pub struct VersionRegistry {
    flags: Arc<dyn FlagStore>,
}

impl VersionRegistry {
    /// Creates a registry reading toggles from `flags`.
    #[must_use]
    pub fn new(flags: Arc<dyn FlagStore>) -> Self {
        Self { flags }
    }

    /// Creates a registry over a fresh in-memory store: everything enabled.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(MemoryFlagStore::new()))
    }

    /// Returns the underlying flag store.
    #[must_use]
    pub fn flags(&self) -> &Arc<dyn FlagStore> {
        &self.flags
    }

    /// Returns every supported version, most preferred first.
    #[must_use]
    pub fn all_supported(&self) -> Vec<ParsedVersion> {
        all_supported_versions()
    }

    /// Returns the supported versions whose toggle is on, in table order.
    #[must_use]
    pub fn currently_supported(&self) -> Vec<ParsedVersion> {
        SUPPORTED_VERSIONS
            .iter()
            .filter(|row| !self.flags.get(row.disable_flag))
            .map(|row| row.version)
            .collect()
    }

    /// Keeps the entries of `versions` that are currently enabled.
    ///
    /// A version with no table row has no toggle; it is reported and
    /// dropped.
    #[must_use]
    pub fn filter_supported(&self, versions: &[ParsedVersion]) -> Vec<ParsedVersion> {
        versions
            .iter()
            .copied()
            .filter(|&version| match supported_entry(version) {
                Some(row) => !self.flags.get(row.disable_flag),
                None => {
                    crate::version_bug!(version = %version, "QUIC version has no flag protection");
                    false
                }
            })
            .collect()
    }

    /// Turns the toggle for `version` on or off.
    ///
    /// Versions outside the table are reported and ignored.
    pub fn set_enabled(&self, version: ParsedVersion, enabled: bool) {
        let Some(row) = supported_entry(version) else {
            let action = if enabled { "enable" } else { "disable" };
            crate::version_bug!(version = %version, "Cannot {} version", action);
            return;
        };
        debug!(version = %version, enabled, "Version toggle updated");
        self.flags.set(row.disable_flag, !enabled);
    }

    /// Enables `version`.
    pub fn enable(&self, version: ParsedVersion) {
        self.set_enabled(version, true);
    }

    /// Disables `version`.
    pub fn disable(&self, version: ParsedVersion) {
        self.set_enabled(version, false);
    }

    /// Returns `true` if `version` is currently enabled.
    #[must_use]
    pub fn is_enabled(&self, version: ParsedVersion) -> bool {
        self.currently_supported().contains(&version)
    }

    /// Returns the supported versions using `handshake`.
    #[must_use]
    pub fn all_supported_with(&self, handshake: HandshakeProtocol) -> Vec<ParsedVersion> {
        Self::restrict(self.all_supported(), handshake)
    }

    /// Returns the enabled versions using `handshake`.
    ///
    /// An empty result for a handshake the table does support means the
    /// configuration disabled all of them; that is reported, and the empty
    /// list is still returned for the caller to act on.
    #[must_use]
    pub fn currently_supported_with(&self, handshake: HandshakeProtocol) -> Vec<ParsedVersion> {
        Self::restrict(self.currently_supported(), handshake)
    }

    fn restrict(versions: Vec<ParsedVersion>, handshake: HandshakeProtocol) -> Vec<ParsedVersion> {
        let restricted: Vec<_> = versions
            .into_iter()
            .filter(|v| v.handshake_protocol() == handshake)
            .collect();
        if restricted.is_empty() && table_has_handshake(handshake) {
            crate::version_bug!(handshake = %handshake, "No enabled version with handshake");
        }
        restricted
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for VersionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionRegistry")
            .field("enabled", &self.currently_supported())
            .finish()
    }
}

// ============================================
// Tests
// ============================================
