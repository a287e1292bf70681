// crates/stateguard-core/src/registry.rs
// ============================================================================
// Module: Release Uniqueness Registry
// Description: Per-pass record of (namespace, release name) pairs.
// Purpose: Detect release name collisions within a namespace.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The registry is built fresh for every validation pass and dropped when
//! the pass ends. It is never shared across passes or threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Namespace name to the set of release names already seen.
///
/// Custom [`crate::ReleaseChecker`] implementations receive the registry of
/// the current pass and may query it with [`Self::contains`] and
/// [`Self::len`] before registering.
#[derive(Debug, Default)]
pub struct UniquenessRegistry {
    /// Seen release names keyed by namespace.
    seen: BTreeMap<String, BTreeSet<String>>,
}

impl UniquenessRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a release name in a namespace.
    ///
    /// Returns `false` when the pair was already registered.
    pub fn register(&mut self, namespace: &str, name: &str) -> bool {
        self.seen.entry(namespace.to_string()).or_default().insert(name.to_string())
    }

    /// Returns true when the pair is registered.
    #[must_use]
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.seen.get(namespace).is_some_and(|names| names.contains(name))
    }

    /// Returns the number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.values().map(BTreeSet::len).sum()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::UniquenessRegistry;

    #[test]
    fn same_name_in_different_namespaces_is_allowed() {
        let mut registry = UniquenessRegistry::new();
        assert!(registry.register("prod", "api"));
        assert!(registry.register("staging", "api"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn repeated_pair_is_rejected() {
        let mut registry = UniquenessRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("prod", "api"));
        assert!(!registry.is_empty());
        assert!(!registry.register("prod", "api"));
        assert!(registry.contains("prod", "api"));
        assert_eq!(registry.len(), 1);
    }
}
