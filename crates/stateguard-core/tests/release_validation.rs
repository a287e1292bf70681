//! Release validation tests for stateguard-core.
// crates/stateguard-core/tests/release_validation.rs
// =============================================================================
// Module: Release Validation Tests
// Description: Default release rules, uniqueness, and custom checkers.
// Purpose: Ensure release collisions and malformed releases are rejected.
// =============================================================================

use std::fs;
use std::sync::Arc;
use std::sync::Mutex;

use stateguard_core::DesiredState;
use stateguard_core::Release;
use stateguard_core::ReleaseChecker;
use stateguard_core::ReleaseRuleError;
use stateguard_core::UniquenessRegistry;
use stateguard_core::ValidationContext;
use stateguard_core::ValidationError;
use stateguard_core::ValidationOutcome;
use stateguard_core::Validator;
use tempfile::TempDir;

mod common;

use common::TestResult;

/// Asserts a release rule failure for `app`.
fn assert_release_error(
    result: Result<ValidationOutcome, ValidationError>,
    app: &str,
    expected: &ReleaseRuleError,
) -> TestResult {
    common::assert_error(
        result,
        &ValidationError::ReleaseValidationFailed {
            app: app.to_string(),
            source: expected.clone(),
        },
    )
}

#[test]
fn duplicate_release_in_same_namespace_fails() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "api-a", common::release("api", "prod"));
    common::add_app(&mut state, "api-b", common::release("api", "prod"));
    assert_release_error(
        common::validate(&mut state),
        "api-b",
        &ReleaseRuleError::DuplicateRelease {
            namespace: "prod".to_string(),
            name: "api".to_string(),
        },
    )
}

#[test]
fn same_release_name_in_different_namespaces_passes() -> TestResult {
    let mut state = common::valid_state();
    state.namespaces.insert("staging".to_string(), stateguard_core::Namespace::default());
    common::add_app(&mut state, "api-prod", common::release("api", "prod"));
    common::add_app(&mut state, "api-staging", common::release("api", "staging"));
    match common::validate(&mut state) {
        Ok(ValidationOutcome::Ready) => Ok(()),
        Ok(ValidationOutcome::NoApplications) => Err("apps were declared".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

#[test]
fn registry_is_fresh_on_every_pass() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "api", common::release("api", "prod"));
    common::validate(&mut state).map_err(|err| err.to_string())?;
    common::validate(&mut state).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn release_requires_name() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "nameless", common::release(" ", "prod"));
    assert_release_error(common::validate(&mut state), "nameless", &ReleaseRuleError::MissingName)
}

#[test]
fn release_requires_declared_namespace() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "api", common::release("api", "qa"));
    assert_release_error(
        common::validate(&mut state),
        "api",
        &ReleaseRuleError::UndeclaredNamespace {
            namespace: "qa".to_string(),
        },
    )
}

#[test]
fn namespace_override_relaxes_declared_namespace_rule() -> TestResult {
    let mut state = common::valid_state();
    common::add_app(&mut state, "api", common::release("api", "qa"));
    let context = common::context().with_namespace_override("sandbox");
    state.validate(&context).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn namespace_override_collapses_release_names_into_one_namespace() -> TestResult {
    let mut state = common::valid_state();
    state.namespaces.insert("staging".to_string(), stateguard_core::Namespace::default());
    common::add_app(&mut state, "api-prod", common::release("api", "prod"));
    common::add_app(&mut state, "api-staging", common::release("api", "staging"));
    let context = common::context().with_namespace_override("sandbox");
    assert_release_error(
        state.validate(&context),
        "api-staging",
        &ReleaseRuleError::DuplicateRelease {
            namespace: "sandbox".to_string(),
            name: "api".to_string(),
        },
    )
}

#[test]
fn chart_repository_must_be_declared() -> TestResult {
    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.chart = "incubator/api".to_string();
    common::add_app(&mut state, "api", release);
    assert_release_error(
        common::validate(&mut state),
        "api",
        &ReleaseRuleError::UnknownRepository {
            repository: "incubator".to_string(),
        },
    )
}

#[test]
fn local_chart_paths_skip_repository_lookup() -> TestResult {
    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.chart = "./charts/api".to_string();
    common::add_app(&mut state, "api", release);
    common::validate(&mut state).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn release_requires_version() -> TestResult {
    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.version = String::new();
    common::add_app(&mut state, "api", release);
    assert_release_error(common::validate(&mut state), "api", &ReleaseRuleError::MissingVersion)
}

#[test]
fn values_file_must_exist_with_yaml_extension() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let yaml = dir.path().join("values.yaml");
    let text = dir.path().join("values.txt");
    fs::write(&yaml, "replicas: 2\n").map_err(|err| err.to_string())?;
    fs::write(&text, "replicas: 2\n").map_err(|err| err.to_string())?;

    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.values_file = yaml.to_string_lossy().to_string();
    common::add_app(&mut state, "api", release.clone());
    common::validate(&mut state).map_err(|err| err.to_string())?;

    let text_path = text.to_string_lossy().to_string();
    release.values_file = text_path.clone();
    common::add_app(&mut state, "api", release);
    assert_release_error(
        common::validate(&mut state),
        "api",
        &ReleaseRuleError::InvalidValuesFile {
            path: text_path,
        },
    )
}

#[test]
fn values_file_and_values_files_conflict() -> TestResult {
    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.values_file = "a.yaml".to_string();
    release.values_files = vec!["b.yaml".to_string()];
    common::add_app(&mut state, "api", release);
    assert_release_error(
        common::validate(&mut state),
        "api",
        &ReleaseRuleError::ConflictingValuesFiles,
    )
}

#[test]
fn error_message_names_app_and_cause() -> TestResult {
    let mut state = common::valid_state();
    let mut release = common::release("api", "prod");
    release.chart = String::new();
    common::add_app(&mut state, "frontend", release);
    common::assert_invalid(
        common::validate(&mut state),
        "apps validation failed -- for app [ frontend ]: chart must be provided",
    )
}

/// Checker that records application labels and registry sizes, then registers
/// the declared `(namespace, name)` pair.
#[derive(Default)]
struct RecordingChecker {
    /// Labels seen, in call order.
    seen: Mutex<Vec<String>>,
    /// Registry size observed at each call.
    sizes: Mutex<Vec<usize>>,
}

impl ReleaseChecker for RecordingChecker {
    fn check(
        &self,
        app: &str,
        release: &Release,
        registry: &mut UniquenessRegistry,
        _state: &DesiredState,
        _context: &ValidationContext,
    ) -> Result<(), ReleaseRuleError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(app.to_string());
        }
        if let Ok(mut sizes) = self.sizes.lock() {
            sizes.push(registry.len());
        }
        if registry.contains(&release.namespace, &release.name) {
            return Err(ReleaseRuleError::DuplicateRelease {
                namespace: release.namespace.clone(),
                name: release.name.clone(),
            });
        }
        registry.register(&release.namespace, &release.name);
        Ok(())
    }
}

#[test]
fn custom_checker_shares_one_registry_per_pass() -> TestResult {
    let checker = Arc::new(RecordingChecker::default());
    let validator = Validator::new(common::context()).with_checker(checker.clone());
    let mut state = common::valid_state();
    let first = Release {
        name: "same".to_string(),
        namespace: "anywhere".to_string(),
        ..Release::default()
    };
    common::add_app(&mut state, "a", first.clone());
    common::add_app(&mut state, "b", first);
    let result = validator.validate_in_place(&mut state);
    assert_release_error(
        result,
        "b",
        &ReleaseRuleError::DuplicateRelease {
            namespace: "anywhere".to_string(),
            name: "same".to_string(),
        },
    )?;
    let seen = checker.seen.lock().map_err(|err| err.to_string())?.clone();
    if seen != ["a", "b"] {
        return Err(format!("unexpected call order: {}", seen.join(",")));
    }
    let sizes = checker.sizes.lock().map_err(|err| err.to_string())?.clone();
    if sizes != [0, 1] {
        return Err("registry should start empty and grow by one per release".to_string());
    }
    Ok(())
}
