// ============================================
// File: crates/quicver-cli/src/lib.rs
// ============================================
//! # quicver CLI - Version Policy Inspection
//!
//! ## Creation Reason
//! Operators need to see what a version policy does before shipping it:
//! which versions are on, what a Version Negotiation packet will carry,
//! and what each version implies.
//!
//! ## Main Functionality
//! - [`config`]: TOML configuration
//! - [`inventory`]: registry and codec built from configuration
//! - [`error`]: tool error types
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod inventory;

pub use config::{MissingConfig, ToolConfig};
pub use error::{exit_status, Result, ToolError};
pub use inventory::{capabilities, Inventory, VersionSummary};
