// crates/stateguard-core/src/pipeline.rs
// ============================================================================
// Module: Validation Pipeline
// Description: Ordered, short-circuiting desired-state validation.
// Purpose: Decide accept/reject for a desired state before any mutation runs.
// Dependencies: stateguard-core stage modules
// ============================================================================

//! ## Overview
//! Validation runs settings, certificates, namespaces, repositories, and
//! apps in that order. The first failure aborts the pass.
//!
//! Resolution is two-phase. [`Validator::resolve`] validates a copy of the
//! input and returns it with every credential reference replaced by its
//! resolved value; [`ResolvedState::commit`] writes that copy back over the
//! stored document. [`Validator::validate_in_place`] runs both and leaves the
//! input untouched on failure.
//!
//! ## Invariants
//! - One pass owns one uniqueness registry; nothing outlives the pass.
//! - The pipeline is synchronous and single-threaded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::certificates::resolve_certificates;
use crate::error::ValidationError;
use crate::error::ValidationStage;
use crate::log::NoopValidationLog;
use crate::log::NoteKind;
use crate::log::ValidationEvent;
use crate::log::ValidationLog;
use crate::model::DesiredState;
use crate::namespaces::resolve_namespaces;
use crate::release::DefaultReleaseChecker;
use crate::release::ReleaseChecker;
use crate::releases::validate_releases;
use crate::repositories::validate_repositories;
use crate::settings::validate_settings;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Externally supplied inputs for a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Namespace forced onto every release; disables namespace validation.
    namespace_override: Option<String>,
    /// Whether an ambient cluster context is already resolvable.
    ambient_context: bool,
}

impl ValidationContext {
    /// Creates a context with no override and no ambient context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace override; a blank value clears it.
    #[must_use]
    pub fn with_namespace_override(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace_override =
            if namespace.trim().is_empty() { None } else { Some(namespace.trim().to_string()) };
        self
    }

    /// Sets whether an ambient cluster context is available.
    #[must_use]
    pub const fn with_ambient_context(mut self, available: bool) -> Self {
        self.ambient_context = available;
        self
    }

    /// Returns the active namespace override.
    #[must_use]
    pub fn namespace_override(&self) -> Option<&str> {
        self.namespace_override.as_deref()
    }

    /// Returns whether an ambient cluster context is available.
    #[must_use]
    pub const fn ambient_context(&self) -> bool {
        self.ambient_context
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Successful validation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The desired state is valid and declares applications.
    Ready,
    /// The desired state is valid but declares no applications; callers
    /// should stop with a successful status.
    NoApplications,
}

/// A validated, canonicalized copy of a desired state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    /// Canonicalized document.
    state: DesiredState,
    /// Outcome of the pass.
    outcome: ValidationOutcome,
}

impl ResolvedState {
    /// Returns the canonicalized document.
    #[must_use]
    pub const fn state(&self) -> &DesiredState {
        &self.state
    }

    /// Returns the outcome of the pass.
    #[must_use]
    pub const fn outcome(&self) -> ValidationOutcome {
        self.outcome
    }

    /// Consumes the resolution, returning the canonicalized document.
    #[must_use]
    pub fn into_state(self) -> DesiredState {
        self.state
    }

    /// Replaces the stored document with the canonicalized copy.
    pub fn commit(self, target: &mut DesiredState) -> ValidationOutcome {
        *target = self.state;
        self.outcome
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Desired-state validator.
#[derive(Clone)]
pub struct Validator {
    /// External inputs for each pass.
    context: ValidationContext,
    /// Sink for informational notes.
    log: Arc<dyn ValidationLog>,
    /// Per-release rule checker.
    checker: Arc<dyn ReleaseChecker + Send + Sync>,
}

impl Validator {
    /// Creates a validator with the default release rules and no logging.
    #[must_use]
    pub fn new(context: ValidationContext) -> Self {
        Self {
            context,
            log: Arc::new(NoopValidationLog),
            checker: Arc::new(DefaultReleaseChecker),
        }
    }

    /// Routes informational notes to the given sink.
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn ValidationLog>) -> Self {
        self.log = log;
        self
    }

    /// Replaces the per-release rule checker.
    #[must_use]
    pub fn with_checker(mut self, checker: Arc<dyn ReleaseChecker + Send + Sync>) -> Self {
        self.checker = checker;
        self
    }

    /// Returns the validation context.
    #[must_use]
    pub const fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Validates a copy of `state` and returns it canonicalized.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by any stage.
    pub fn resolve(&self, state: &DesiredState) -> Result<ResolvedState, ValidationError> {
        let log = self.log.as_ref();
        let mut resolved = state.clone();
        validate_settings(&resolved.settings, &self.context)?;
        resolve_certificates(&resolved.settings, &mut resolved.certificates, log)?;
        if let Some(namespace) = self.context.namespace_override() {
            log.record(&ValidationEvent::note(
                ValidationStage::Namespaces,
                NoteKind::NamespaceOverride,
                Some(namespace),
                format!(
                    "ns-override is used to override all namespaces with [ {namespace} ]; \
                     skipping defined namespaces validation"
                ),
            ));
        } else {
            resolve_namespaces(&mut resolved.namespaces, log)?;
        }
        validate_repositories(&resolved.repositories)?;
        let outcome = validate_releases(&resolved, &self.context, self.checker.as_ref(), log)?;
        Ok(ResolvedState {
            state: resolved,
            outcome,
        })
    }

    /// Validates `state` and, on success, commits the resolved values into it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by any stage; `state` is
    /// left unchanged in that case.
    pub fn validate_in_place(
        &self,
        state: &mut DesiredState,
    ) -> Result<ValidationOutcome, ValidationError> {
        Ok(self.resolve(state)?.commit(state))
    }
}

impl DesiredState {
    /// Validates the state in place with the default release rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by any stage.
    pub fn validate(
        &mut self,
        context: &ValidationContext,
    ) -> Result<ValidationOutcome, ValidationError> {
        Validator::new(context.clone()).validate_in_place(self)
    }
}
