// crates/stateguard-core/tests/common/mod.rs
// =============================================================================
// Module: Validation Test Helpers
// Description: Shared builders for desired-state validation tests.
// Purpose: Reduce duplication across integration tests for stateguard-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::BTreeMap;

use stateguard_core::DesiredState;
use stateguard_core::Namespace;
use stateguard_core::Release;
use stateguard_core::Repository;
use stateguard_core::ValidationContext;
use stateguard_core::ValidationError;
use stateguard_core::ValidationOutcome;

/// Result type used by tests that report failures as strings.
pub type TestResult = Result<(), String>;

/// Returns a minimal valid state: local context, one namespace, one repo, no releases.
pub fn valid_state() -> DesiredState {
    let mut state = DesiredState::default();
    state.settings.kube_context = "minikube".to_string();
    state.namespaces.insert("prod".to_string(), Namespace::default());
    state.repositories.insert("stable".to_string(), repository("https://charts.example.com"));
    state.apps = Some(BTreeMap::new());
    state
}

/// Returns a valid state configured for a remote cluster with resolvable certificates.
pub fn remote_state() -> DesiredState {
    let mut state = valid_state();
    state.settings.cluster_uri = "https://cluster.example:6443".to_string();
    state.settings.username = "admin".to_string();
    state.settings.password = "secret".to_string();
    state.certificates.insert("caCrt".to_string(), "s3://certs/ca.crt".to_string());
    state.certificates.insert("caKey".to_string(), "s3://certs/ca.key".to_string());
    state
}

/// Builds a repository entry with the given URL.
pub fn repository(url: &str) -> Repository {
    Repository {
        url: url.to_string(),
        ..Repository::default()
    }
}

/// Builds a release that passes the default release rules against [`valid_state`].
pub fn release(name: &str, namespace: &str) -> Release {
    Release {
        name: name.to_string(),
        namespace: namespace.to_string(),
        enabled: true,
        chart: "stable/nginx".to_string(),
        version: "1.0.0".to_string(),
        ..Release::default()
    }
}

/// Inserts a release under the given application label.
pub fn add_app(state: &mut DesiredState, app: &str, release: Release) {
    state.apps.get_or_insert_with(BTreeMap::new).insert(app.to_string(), release);
}

/// Returns a context with no override and no ambient context.
pub fn context() -> ValidationContext {
    ValidationContext::new()
}

/// Validates a state in place with the default context.
pub fn validate(state: &mut DesiredState) -> Result<ValidationOutcome, ValidationError> {
    state.validate(&context())
}

/// Asserts that validation failed with a message containing `needle`.
pub fn assert_invalid(
    result: Result<ValidationOutcome, ValidationError>,
    needle: &str,
) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid desired state".to_string()),
    }
}

/// Asserts that validation failed with exactly `expected`.
pub fn assert_error(
    result: Result<ValidationOutcome, ValidationError>,
    expected: &ValidationError,
) -> TestResult {
    match result {
        Err(error) if &error == expected => Ok(()),
        Err(error) => Err(format!("unexpected error: {error}")),
        Ok(_) => Err(format!("expected error: {expected}")),
    }
}
