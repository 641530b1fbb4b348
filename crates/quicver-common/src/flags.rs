// ============================================
// File: crates/quicver-common/src/flags.rs
// ============================================
//! # Runtime Flag Storage
//!
//! ## Creation Reason
//! Version enable/disable policy is driven by named boolean toggles that
//! live outside the version layer. This module defines that boundary.
//!
//! ## Main Functionality
//! - `FlagStore`: read/write interface for named boolean toggles
//! - `MemoryFlagStore`: process-local implementation backed by `DashMap`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Implementations must be `Send + Sync`; readers may run on any thread
//! - A single `set` must be atomic: readers see the old or the new value
//! - Unset flags read as `false`
//!
//! ## Last Modified
//! v0.1.0 - Initial flag store

use std::fmt;

use dashmap::DashMap;
use tracing::debug;

// ============================================
// FlagStore Trait
// ============================================

/// Named boolean toggle storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single store can be shared
/// between every consumer of the version registry.
pub trait FlagStore: Send + Sync {
    /// Returns the current value of `name`, or `false` if never set.
    fn get(&self, name: &str) -> bool;

    /// Sets `name` to `value`.
    fn set(&self, name: &str, value: bool);
}

// ============================================
// MemoryFlagStore
// ============================================

/// In-process flag store.
///
/// # Example
/// ```
/// use quicver_common::flags::{FlagStore, MemoryFlagStore};
///
/// let flags = MemoryFlagStore::new();
/// assert!(!flags.get("quic_disable_version_q043"));
///
/// flags.set("quic_disable_version_q043", true);
/// assert!(flags.get("quic_disable_version_q043"));
/// ```
#[derive(Default)]
pub struct MemoryFlagStore {
    values: DashMap<String, bool>,
}

impl MemoryFlagStore {
    /// Creates an empty store where every flag reads as `false`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(name, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let store = Self::new();
        for (name, value) in pairs {
            store.values.insert(name.into(), value);
        }
        store
    }

    /// Returns the number of flags that have been explicitly set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no flag has been explicitly set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, name: &str) -> bool {
        self.values.get(name).map_or(false, |value| *value)
    }

    fn set(&self, name: &str, value: bool) {
        debug!(flag = name, value, "Flag updated");
        self.values.insert(name.to_string(), value);
    }
}

impl fmt::Debug for MemoryFlagStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFlagStore")
            .field("set_flags", &self.values.len())
            .finish()
    }
}

// ============================================
// Tests
// ============================================
