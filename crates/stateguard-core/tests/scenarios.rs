//! End-to-end validation scenarios for stateguard-core.
// crates/stateguard-core/tests/scenarios.rs
// =============================================================================
// Module: Validation Scenarios
// Description: Whole-document scenarios exercising stage ordering.
// Purpose: Pin the observable pass/fail contract for representative documents.
// =============================================================================

use std::collections::BTreeMap;

use stateguard_core::DesiredState;
use stateguard_core::Namespace;
use stateguard_core::ReleaseRuleError;
use stateguard_core::ValidationError;
use stateguard_core::ValidationOutcome;

mod common;

use common::TestResult;

#[test]
fn scenario_a_empty_settings() -> TestResult {
    let mut state = DesiredState::default();
    common::assert_error(common::validate(&mut state), &ValidationError::MissingSettings)
}

#[test]
fn scenario_b_remote_cluster_without_password() -> TestResult {
    let mut state = DesiredState::default();
    state.settings.cluster_uri = "https://cluster.example:6443".to_string();
    state.settings.kube_context = "prod-cluster".to_string();
    state.settings.username = "admin".to_string();
    common::assert_invalid(
        common::validate(&mut state),
        "password must be provided if clusterURI is defined",
    )
}

#[test]
fn scenario_c_conflicting_engine_intent() -> TestResult {
    let mut state = common::valid_state();
    state.namespaces = BTreeMap::from([(
        "prod".to_string(),
        Namespace {
            install_engine: true,
            use_engine: true,
            ..Namespace::default()
        },
    )]);
    common::assert_invalid(
        common::validate(&mut state),
        "can't be used together for namespace [ prod ]",
    )
}

#[test]
fn scenario_d_absent_apps_exit_successfully_after_all_other_stages() -> TestResult {
    let mut state = common::valid_state();
    state.apps = None;
    match common::validate(&mut state) {
        Ok(ValidationOutcome::NoApplications) => {}
        Ok(ValidationOutcome::Ready) => return Err("expected no-applications outcome".into()),
        Err(err) => return Err(err.to_string()),
    }
    state.repositories.clear();
    common::assert_error(common::validate(&mut state), &ValidationError::NoRepositories)
}

#[test]
fn scenario_e_duplicate_release_in_prod() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "first", common::release("web", "prod"));
    common::add_app(&mut state, "second", common::release("web", "prod"));
    match common::validate(&mut state) {
        Err(ValidationError::ReleaseValidationFailed {
            app,
            source: ReleaseRuleError::DuplicateRelease {
                ..
            },
        }) if app == "second" => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("expected duplicate release failure".to_string()),
    }
}

#[test]
fn empty_apps_table_is_ready_not_a_no_op() -> TestResult {
    let mut state = common::valid_state();
    match common::validate(&mut state) {
        Ok(ValidationOutcome::Ready) => Ok(()),
        Ok(ValidationOutcome::NoApplications) => Err("present apps table is not absent".into()),
        Err(err) => Err(err.to_string()),
    }
}

#[test]
fn earlier_stage_failures_win() -> TestResult {
    let mut state = common::valid_state();
    state.settings.notification_webhook = "not a url".to_string();
    state.namespaces.clear();
    state.repositories.clear();
    common::assert_invalid(common::validate(&mut state), "settings validation failed")
}
