//! Settings validation tests for stateguard-core.
// crates/stateguard-core/tests/settings_validation.rs
// =============================================================================
// Module: Settings Validation Tests
// Description: Context, remote-cluster, and webhook rules of the settings block.
// Purpose: Ensure partial remote-cluster settings are rejected.
// =============================================================================

use stateguard_core::ContextRequirement;
use stateguard_core::Settings;
use stateguard_core::UrlField;
use stateguard_core::ValidationError;
use stateguard_core::ValidationOutcome;

mod common;

use common::TestResult;

#[test]
fn default_settings_are_missing() -> TestResult {
    let mut state = common::valid_state();
    state.settings = Settings::default();
    common::assert_error(common::validate(&mut state), &ValidationError::MissingSettings)
}

#[test]
fn missing_context_without_ambient_context_fails() -> TestResult {
    let mut state = common::valid_state();
    state.settings.kube_context = String::new();
    state.settings.storage_backend = "secret".to_string();
    common::assert_error(
        common::validate(&mut state),
        &ValidationError::MissingContext {
            reason: ContextRequirement::NoAmbientContext,
        },
    )
}

#[test]
fn missing_context_with_ambient_context_passes() -> TestResult {
    let mut state = common::valid_state();
    state.settings.kube_context = String::new();
    state.settings.storage_backend = "secret".to_string();
    let context = common::context().with_ambient_context(true);
    match state.validate(&context) {
        Ok(ValidationOutcome::Ready) => Ok(()),
        other => Err(format!("unexpected result: {}", describe(&other))),
    }
}

#[test]
fn remote_cluster_requires_context_even_with_ambient_context() -> TestResult {
    let mut state = common::remote_state();
    state.settings.kube_context = String::new();
    let context = common::context().with_ambient_context(true);
    common::assert_error(
        state.validate(&context),
        &ValidationError::MissingContext {
            reason: ContextRequirement::RemoteCluster,
        },
    )
}

#[test]
fn remote_cluster_requires_absolute_url() -> TestResult {
    let mut state = common::remote_state();
    state.settings.cluster_uri = "cluster.example:6443/api".to_string();
    common::assert_invalid(common::validate(&mut state), "clusterURI must be a valid absolute URL")
}

#[test]
fn remote_cluster_requires_username() -> TestResult {
    let mut state = common::remote_state();
    state.settings.username = String::new();
    common::assert_error(common::validate(&mut state), &ValidationError::MissingUsername)
}

#[test]
fn remote_cluster_requires_password() -> TestResult {
    let mut state = common::remote_state();
    state.settings.password = "  ".to_string();
    common::assert_invalid(common::validate(&mut state), "password must be provided")
}

#[test]
fn webhook_must_be_absolute_url() -> TestResult {
    let mut state = common::valid_state();
    state.settings.notification_webhook = "hooks/slack".to_string();
    common::assert_error(
        common::validate(&mut state),
        &ValidationError::InvalidUrl {
            field: UrlField::NotificationWebhook,
        },
    )
}

#[test]
fn webhook_with_absolute_url_passes() -> TestResult {
    let mut state = common::valid_state();
    state.settings.notification_webhook = "https://hooks.slack.com/services/T/B/X".to_string();
    common::validate(&mut state).map(|_| ()).map_err(|err| err.to_string())
}

/// Renders a validation result for failure messages.
fn describe(result: &Result<ValidationOutcome, ValidationError>) -> String {
    match result {
        Ok(ValidationOutcome::Ready) => "ready".to_string(),
        Ok(ValidationOutcome::NoApplications) => "no applications".to_string(),
        Err(err) => err.to_string(),
    }
}
