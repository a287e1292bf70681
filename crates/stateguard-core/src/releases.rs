// crates/stateguard-core/src/releases.rs
// ============================================================================
// Module: Release Validation
// Description: Drives the release checker across all declared applications.
// Purpose: Thread one uniqueness registry through every release check.
// Dependencies: none
// ============================================================================

//! ## Overview
//! An absent `apps` table means there is nothing to deploy: the pass
//! succeeds with [`ValidationOutcome::NoApplications`] and callers stop
//! there. A present table (even an empty one) is checked release by release
//! with a registry that lives only for this call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::ValidationError;
use crate::error::ValidationStage;
use crate::log::NoteKind;
use crate::log::ValidationEvent;
use crate::log::ValidationLog;
use crate::model::DesiredState;
use crate::pipeline::ValidationContext;
use crate::pipeline::ValidationOutcome;
use crate::registry::UniquenessRegistry;
use crate::release::ReleaseChecker;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks every declared release.
///
/// # Errors
///
/// Returns [`ValidationError::ReleaseValidationFailed`] for the first
/// release the checker rejects.
pub fn validate_releases(
    state: &DesiredState,
    context: &ValidationContext,
    checker: &dyn ReleaseChecker,
    log: &dyn ValidationLog,
) -> Result<ValidationOutcome, ValidationError> {
    let Some(apps) = &state.apps else {
        log.record(&ValidationEvent::note(
            ValidationStage::Apps,
            NoteKind::NoApplications,
            None,
            "no apps are declared; nothing to do",
        ));
        return Ok(ValidationOutcome::NoApplications);
    };
    let mut registry = UniquenessRegistry::new();
    for (app, release) in apps {
        checker.check(app, release, &mut registry, state, context).map_err(|source| {
            ValidationError::ReleaseValidationFailed {
                app: app.clone(),
                source,
            }
        })?;
    }
    Ok(ValidationOutcome::Ready)
}
