// ============================================
// File: crates/quicver-cli/src/config.rs
// ============================================
//! # Tool Configuration
//!
//! ## Creation Reason
//! Lets operators describe a deployment's version policy in a file and
//! check it before rollout: which versions start disabled, what list to
//! offer, and whether greased labels are random.
//!
//! ## Main Functionality
//! - `ToolConfig`: Main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//! - Lenient resolution of version names
//!
//! ## Configuration Sections
//! - `logging`: Log level
//! - `versions`: Disabled set, offer list, grease randomness
//!
//! ## Example Configuration
//! ```toml
//! [logging]
//! level = "info"
//!
//! [versions]
//! disabled = ["Q043"]
//! offer = "h3-29,Q050"
//! grease_randomness = true
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Unknown version names are dropped with a warning, never rejected;
//!   a fleet may carry config written for a newer release
//! - A missing file means defaults, except for `validate`, which
//!   loads with `MissingConfig::Reject`
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use quicver_core::version::parse_version_string;
use quicver_core::ParsedVersion;

use crate::error::{Result, ToolError};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// What [`ToolConfig::load_with`] does when the file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingConfig {
    /// Fall back to built-in defaults.
    UseDefaults,
    /// Fail with `ConfigLoad`.
    Reject,
}

/// Main tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Version policy configuration.
    #[serde(default)]
    pub versions: VersionsConfig,
}

impl ToolConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if file cannot be read, parsed or validated.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ToolError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ToolError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads the file at `path`, handling a missing file per `missing`.
    ///
    /// # Errors
    /// Returns error if the file exists but is invalid, or if it is
    /// missing and `missing` is [`MissingConfig::Reject`].
    pub async fn load_with(path: impl AsRef<Path>, missing: MissingConfig) -> Result<Self> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path).await? {
            return Self::load(path).await;
        }

        match missing {
            MissingConfig::UseDefaults => {
                info!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            MissingConfig::Reject => Err(ToolError::config_load(
                path.display().to_string(),
                "file not found",
            )),
        }
    }

    /// Loads configuration from a string (useful for testing).
    ///
    /// # Errors
    /// Returns error if the text is not valid configuration.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ToolError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()
    }
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ToolError::config_invalid(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

// ============================================
// VersionsConfig
// ============================================

/// Version policy section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsConfig {
    /// Versions to turn off at startup, in any accepted spelling.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Comma-separated preference list to offer instead of every
    /// enabled version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,

    /// `false` pins the greased label for reproducible output.
    #[serde(default = "default_grease_randomness")]
    pub grease_randomness: bool,
}

fn default_grease_randomness() -> bool {
    true
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            offer: None,
            grease_randomness: default_grease_randomness(),
        }
    }
}

impl VersionsConfig {
    /// Resolves `disabled`, dropping names that match no version.
    #[must_use]
    pub fn disabled_versions(&self) -> Vec<ParsedVersion> {
        resolve_names("versions.disabled", self.disabled.iter().map(String::as_str))
    }

    /// Resolves `offer`, or `None` when no offer list is configured.
    #[must_use]
    pub fn offered_versions(&self) -> Option<Vec<ParsedVersion>> {
        self.offer
            .as_deref()
            .map(|offer| resolve_names("versions.offer", offer.split(',').map(str::trim)))
    }
}

fn resolve_names<'a>(field: &str, names: impl Iterator<Item = &'a str>) -> Vec<ParsedVersion> {
    let mut versions = Vec::new();
    for name in names.filter(|name| !name.is_empty()) {
        let version = parse_version_string(name);
        if !version.is_known() {
            warn!(field, name, "Ignoring unknown QUIC version");
            continue;
        }
        if !versions.contains(&version) {
            versions.push(version);
        }
    }
    versions
}

// ============================================
// Tests
// ============================================
