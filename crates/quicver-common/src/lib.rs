// ============================================
// File: crates/quicver-common/src/lib.rs
// ============================================
//! # quicver Common - Shared Utilities Library
//!
//! ## Creation Reason
//! Provides the error base type and the collaborator interfaces that the
//! version layer consumes but does not own.
//!
//! ## Main Functionality
//! - [`error`]: Common error types and result aliases
//! - [`flags`]: Named boolean toggle storage (`FlagStore`)
//! - [`random`]: Random byte sources (`RandomSource`)
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────┐
//! │            quicver-cli              │
//! │                 │                   │
//! │                 ▼                   │
//! │           quicver-core              │
//! │                 │                   │
//! │                 ▼                   │
//! │          quicver-common  ◄── here   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - Keep dependencies minimal
//! - Trait implementations must stay `Send + Sync`
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flags;
pub mod random;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use flags::{FlagStore, MemoryFlagStore};
pub use random::{OsRandom, RandomSource, SeededRandom};
