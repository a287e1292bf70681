// crates/stateguard-core/src/release.rs
// ============================================================================
// Module: Release Rule Checker
// Description: Per-release field rules and uniqueness registration.
// Purpose: Check one declared application against the rest of the state.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The pipeline delegates each declared application to a [`ReleaseChecker`].
//! The default checker enforces the minimal field rules and registers the
//! release's `(namespace, name)` pair, failing on a collision. The pair uses
//! the namespace the release is deployed into: the override namespace when
//! one is active, the declared namespace otherwise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use crate::error::ReleaseRuleError;
use crate::model::DesiredState;
use crate::model::Release;
use crate::pipeline::ValidationContext;
use crate::registry::UniquenessRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File extensions accepted for values files.
const VALUES_FILE_EXTENSIONS: &[&str] = &["yaml", "yml"];

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Per-release rule checker.
pub trait ReleaseChecker {
    /// Checks one release and registers it in the uniqueness registry.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseRuleError`] for the first rule the release violates.
    fn check(
        &self,
        app: &str,
        release: &Release,
        registry: &mut UniquenessRegistry,
        state: &DesiredState,
        context: &ValidationContext,
    ) -> Result<(), ReleaseRuleError>;
}

/// Default release rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultReleaseChecker;

impl ReleaseChecker for DefaultReleaseChecker {
    fn check(
        &self,
        _app: &str,
        release: &Release,
        registry: &mut UniquenessRegistry,
        state: &DesiredState,
        context: &ValidationContext,
    ) -> Result<(), ReleaseRuleError> {
        let name = release.name.trim();
        if name.is_empty() {
            return Err(ReleaseRuleError::MissingName);
        }
        let namespace = release.namespace.trim();
        if namespace.is_empty() {
            return Err(ReleaseRuleError::MissingNamespace);
        }
        if context.namespace_override().is_none() && !state.namespaces.contains_key(namespace) {
            return Err(ReleaseRuleError::UndeclaredNamespace {
                namespace: namespace.to_string(),
            });
        }
        check_chart(release, state)?;
        if release.version.trim().is_empty() {
            return Err(ReleaseRuleError::MissingVersion);
        }
        check_values_files(release)?;
        let target = context.namespace_override().unwrap_or(namespace);
        if !registry.register(target, name) {
            return Err(ReleaseRuleError::DuplicateRelease {
                namespace: target.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks the chart reference and its repository prefix.
fn check_chart(release: &Release, state: &DesiredState) -> Result<(), ReleaseRuleError> {
    let chart = release.chart.trim();
    if chart.is_empty() {
        return Err(ReleaseRuleError::MissingChart);
    }
    if chart.starts_with('.') || chart.starts_with('/') {
        return Ok(());
    }
    if let Some((repository, _)) = chart.split_once('/')
        && !state.repositories.contains_key(repository)
    {
        return Err(ReleaseRuleError::UnknownRepository {
            repository: repository.to_string(),
        });
    }
    Ok(())
}

/// Checks values file exclusivity, extension, and existence.
fn check_values_files(release: &Release) -> Result<(), ReleaseRuleError> {
    let single = release.values_file.trim();
    if !single.is_empty() && !release.values_files.is_empty() {
        return Err(ReleaseRuleError::ConflictingValuesFiles);
    }
    let files = release.values_files.iter().map(|path| path.trim()).chain(Some(single));
    for path in files.filter(|path| !path.is_empty()) {
        let has_yaml_extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| VALUES_FILE_EXTENSIONS.contains(&ext));
        if !has_yaml_extension || !fs::metadata(path).is_ok_and(|meta| meta.is_file()) {
            return Err(ReleaseRuleError::InvalidValuesFile {
                path: path.to_string(),
            });
        }
    }
    Ok(())
}
