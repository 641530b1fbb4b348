// ============================================
// File: crates/quicver-core/src/version/label.rs
// ============================================
//! # Version Labels
//!
//! ## Creation Reason
//! Versions travel on the wire as 32-bit labels in long headers and in
//! version negotiation packets. This module converts between labels and
//! `ParsedVersion`, and produces greased labels for negotiation.
//!
//! ## Main Functionality
//! - `VersionLabel`: the 32-bit wire value
//! - `VersionLabelCodec`: encode with grease support
//! - `parse_version_label`: label to version, never fails
//! - `uses_4bit_connection_id_length`: historical fact table
//! - Label list wire helpers for negotiation packets
//!
//! ## Wire Format
//! ```text
//! ┌──────┬──────┬──────┬──────┐
//! │ b0   │ b1   │ b2   │ b3   │   network byte order
//! └──────┴──────┴──────┴──────┘
//!  'Q'    '0'    '4'    '6'      Google QUIC: ASCII tag
//!  0xff   0x00   0x00   0x1d     IETF drafts: 0xff0000 + draft number
//!  0x?a   0x?a   0x?a   0x?a     greased: low nibble of every byte is 0xa
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - An unknown label from a peer is normal traffic, not an error:
//!   log at info level and return the unsupported sentinel
//! - Real labels must never match the grease pattern; `registry.rs`
//!   enforces this at compile time
//!
//! ## Last Modified
//! v0.1.0 - Initial label codec

use std::fmt;
use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::info;

use quicver_common::error::CommonError;
use quicver_common::random::{OsRandom, RandomSource};

use super::registry::{supported_entry, SUPPORTED_VERSIONS};
use super::types::{HandshakeProtocol, ParsedVersion, TransportVersion};
use crate::error::{CoreError, Result};

// ============================================
// Constants
// ============================================

/// Size of a version label on the wire.
pub const VERSION_LABEL_SIZE: usize = 4;

/// Bits of a greased label taken from the random draw.
pub const GREASE_MASK: u32 = 0xf0f0_f0f0;

/// Bits forced on in every greased label.
pub const GREASE_PATTERN: u32 = 0x0a0a_0a0a;

/// Draw used when grease randomness is disabled.
pub const FIXED_GREASE_DRAW: [u8; VERSION_LABEL_SIZE] = [0xd1, 0x57, 0x38, 0x3f];

/// Greased label produced from [`FIXED_GREASE_DRAW`].
pub const FIXED_GREASE_LABEL: VersionLabel = grease_label_from_bytes(FIXED_GREASE_DRAW);

// ============================================
// VersionLabel
// ============================================

/// A 32-bit version label as carried on the wire.
///
/// # Example
/// ```
/// use quicver_core::version::VersionLabel;
///
/// let label = VersionLabel::from_tag(b'Q', b'0', b'4', b'6');
/// assert_eq!(label.to_wire_bytes(), *b"Q046");
/// assert_eq!(label.to_string(), "Q046");
///
/// let draft = VersionLabel::new(0xff00_001d);
/// assert_eq!(draft.to_string(), "ff00001d");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionLabel(u32);

impl VersionLabel {
    /// The zero label, returned when a version cannot be encoded.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw label value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Builds a label whose wire bytes are `a, b, c, d` in that order.
    #[must_use]
    pub const fn from_tag(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(u32::from_be_bytes([a, b, c, d]))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the label in network byte order.
    #[must_use]
    pub const fn to_wire_bytes(&self) -> [u8; VERSION_LABEL_SIZE] {
        self.0.to_be_bytes()
    }

    /// Reads a label from network byte order.
    #[must_use]
    pub const fn from_wire_bytes(bytes: [u8; VERSION_LABEL_SIZE]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Reads a label from a slice that must be exactly 4 bytes long.
    ///
    /// # Errors
    /// Returns `InvalidLength` for any other slice length.
    pub fn from_wire_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; VERSION_LABEL_SIZE] = bytes
            .try_into()
            .map_err(|_| CommonError::invalid_length(VERSION_LABEL_SIZE, bytes.len()))?;
        Ok(Self::from_wire_bytes(bytes))
    }

    /// Returns `true` if this label follows the reserved grease pattern.
    #[must_use]
    pub const fn is_grease(&self) -> bool {
        (self.0 & !GREASE_MASK) == GREASE_PATTERN
    }
}

impl From<u32> for VersionLabel {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<VersionLabel> for u32 {
    fn from(label: VersionLabel) -> Self {
        label.0
    }
}

impl fmt::Display for VersionLabel {
    /// Renders the wire bytes as ASCII when printable, hex otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0");
        }

        let mut chars = self.to_wire_bytes();
        let last = chars.len() - 1;
        for (i, c) in chars.iter_mut().enumerate() {
            // Trailing NUL or 0xff reads as a space so "Q04\0"-style tags stay ASCII
            if i == last && (*c == 0 || *c == 0xff) {
                *c = b' ';
            }
            if !(b' '..=b'~').contains(&*c) {
                return f.write_str(&hex::encode(self.to_wire_bytes()));
            }
        }
        chars.iter().try_for_each(|&c| fmt::Write::write_char(f, char::from(c)))
    }
}

impl fmt::Debug for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionLabel({:#010x})", self.0)
    }
}

// ============================================
// Grease
// ============================================

/// Applies the grease mask to four random bytes.
#[must_use]
pub const fn grease_label_from_bytes(bytes: [u8; VERSION_LABEL_SIZE]) -> VersionLabel {
    VersionLabel((u32::from_be_bytes(bytes) & GREASE_MASK) | GREASE_PATTERN)
}

/// Where greased labels get their high nibbles from.
#[derive(Clone)]
enum GreaseMode {
    /// Fresh random bytes on every call.
    Random(Arc<dyn RandomSource>),
    /// Always [`FIXED_GREASE_LABEL`]; for reproducible runs.
    Fixed,
}

impl fmt::Debug for GreaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random(_) => f.write_str("GreaseMode::Random"),
            Self::Fixed => f.write_str("GreaseMode::Fixed"),
        }
    }
}

// ============================================
// VersionLabelCodec
// ============================================

/// Converts versions to wire labels.
///
/// Encoding the negotiation sentinel needs randomness, so the codec
/// owns either a random source or the fixed draw. Decoding is stateless; see
/// [`parse_version_label`].
///
/// # Example
/// ```
/// use quicver_core::version::{ParsedVersion, VersionLabelCodec};
///
/// let codec = VersionLabelCodec::default();
/// let label = codec.encode(ParsedVersion::T051);
/// assert_eq!(label.to_wire_bytes(), *b"T051");
///
/// let grease = codec.encode(ParsedVersion::RESERVED_FOR_NEGOTIATION);
/// assert!(grease.is_grease());
/// ```
#[derive(Debug, Clone)]
pub struct VersionLabelCodec {
    grease: GreaseMode,
}

impl VersionLabelCodec {
    /// Creates a codec drawing grease from `random`.
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            grease: GreaseMode::Random(random),
        }
    }

    /// Creates a codec whose greased label is always the same.
    #[must_use]
    pub const fn deterministic() -> Self {
        Self {
            grease: GreaseMode::Fixed,
        }
    }

    /// Produces a greased label.
    #[must_use]
    pub fn grease_label(&self) -> VersionLabel {
        match &self.grease {
            GreaseMode::Random(random) => {
                let mut bytes = [0u8; VERSION_LABEL_SIZE];
                random.fill_bytes(&mut bytes);
                grease_label_from_bytes(bytes)
            }
            GreaseMode::Fixed => FIXED_GREASE_LABEL,
        }
    }

    /// Encodes `version` as a wire label.
    ///
    /// Supported versions map to their fixed label, the negotiation
    /// sentinel to a greased label. Anything else is a bug and yields
    /// [`VersionLabel::ZERO`].
    #[must_use]
    pub fn encode(&self, version: ParsedVersion) -> VersionLabel {
        if version.is_reserved_for_negotiation() {
            return self.grease_label();
        }
        match supported_entry(version) {
            Some(entry) => entry.label,
            None => {
                crate::version_bug!(
                    transport = %version.transport_version(),
                    handshake = %version.handshake_protocol(),
                    "Cannot encode unsupported version"
                );
                VersionLabel::ZERO
            }
        }
    }

    /// Encodes every version in order.
    #[must_use]
    pub fn encode_all(&self, versions: &[ParsedVersion]) -> Vec<VersionLabel> {
        versions.iter().map(|&v| self.encode(v)).collect()
    }
}

impl Default for VersionLabelCodec {
    fn default() -> Self {
        Self::new(Arc::new(OsRandom))
    }
}

// ============================================
// Decoding
// ============================================

/// Decodes a label into the first supported version using it.
///
/// Unknown labels return [`ParsedVersion::UNSUPPORTED`]. Peers advertise
/// versions this build does not speak all the time, so this only logs at
/// info level.
#[must_use]
pub fn parse_version_label(label: VersionLabel) -> ParsedVersion {
    if let Some(entry) = SUPPORTED_VERSIONS.iter().find(|entry| entry.label == label) {
        return entry.version;
    }
    info!(label = %label, "Unsupported QUIC version label");
    ParsedVersion::UNSUPPORTED
}

/// Returns the transport revision `label` decodes to.
#[must_use]
pub fn label_to_transport_version(label: VersionLabel) -> TransportVersion {
    parse_version_label(label).transport_version()
}

/// Returns the handshake mechanism `label` decodes to.
#[must_use]
pub fn label_to_handshake_protocol(label: VersionLabel) -> HandshakeProtocol {
    parse_version_label(label).handshake_protocol()
}

/// Returns `true` if `label` belongs to a version that encoded connection
/// ID lengths in two 4-bit fields.
///
/// This is a record of shipped versions, not a derived predicate: it must
/// keep answering for versions long removed from the supported table so
/// negotiation packets for them stay well formed. Google QUIC 43 and
/// earlier used a different encoding, 49 and later use length prefixes.
#[must_use]
pub fn uses_4bit_connection_id_length(label: VersionLabel) -> bool {
    // Q044 through Q048
    if (b'4'..=b'8').any(|c| label == VersionLabel::from_tag(b'Q', b'0', b'4', c)) {
        return true;
    }
    if label == VersionLabel::from_tag(b'T', b'0', b'4', b'8') {
        return true;
    }
    // IETF drafts 11 through 21
    (11..=21).any(|draft| label == VersionLabel::from_tag(0xff, 0x00, 0x00, draft))
}

// ============================================
// Label Lists
// ============================================

/// Appends `labels` to `buf` in wire order.
pub fn write_label_list(labels: &[VersionLabel], buf: &mut BytesMut) {
    buf.reserve(labels.len() * VERSION_LABEL_SIZE);
    for label in labels {
        buf.put_u32(label.value());
    }
}

/// Reads every label remaining in `buf`.
///
/// # Errors
/// Returns `TruncatedLabel` if the buffer does not hold a whole number
/// of labels; nothing is consumed in that case.
pub fn read_label_list(buf: &mut Bytes) -> Result<Vec<VersionLabel>> {
    let remaining = buf.remaining() % VERSION_LABEL_SIZE;
    if remaining != 0 {
        return Err(CoreError::TruncatedLabel { remaining });
    }

    let mut labels = Vec::with_capacity(buf.remaining() / VERSION_LABEL_SIZE);
    while buf.has_remaining() {
        labels.push(VersionLabel::new(buf.get_u32()));
    }
    Ok(labels)
}

// ============================================
// Tests
// ============================================
