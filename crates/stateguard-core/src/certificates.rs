// crates/stateguard-core/src/certificates.rs
// ============================================================================
// Module: Certificate Set Validation
// Description: Completeness and resolution of the remote-cluster certificate bundle.
// Purpose: Ensure remote connectivity has resolvable CA material.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The bundle is required only when a remote-cluster URL is configured. In
//! that mode every entry, not just the required slots, must resolve, and the
//! resolved value replaces the raw reference. Without a remote-cluster URL
//! the bundle is left untouched and a note is logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::ValidationError;
use crate::error::ValidationStage;
use crate::log::NoteKind;
use crate::log::ValidationEvent;
use crate::log::ValidationLog;
use crate::model::Certificates;
use crate::model::Settings;
use crate::resolver::resolve_reference;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Certificate slots required for remote-cluster connectivity.
pub const REQUIRED_CERTIFICATE_SLOTS: &[&str] = &["caCrt", "caKey"];

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Validates the bundle and resolves every entry in place.
///
/// # Errors
///
/// Returns [`ValidationError::MissingCertificates`] when a required slot is
/// absent and [`ValidationError::InvalidCertificateReference`] for the first
/// entry that does not resolve.
pub fn resolve_certificates(
    settings: &Settings,
    certificates: &mut Certificates,
    log: &dyn ValidationLog,
) -> Result<(), ValidationError> {
    if !settings.remote_cluster() {
        if !certificates.is_empty() {
            log.record(&ValidationEvent::note(
                ValidationStage::Certificates,
                NoteKind::CertificatesUnused,
                None,
                "certificates provided but not needed; skipping certificates validation",
            ));
        }
        return Ok(());
    }
    if !REQUIRED_CERTIFICATE_SLOTS.iter().all(|slot| certificates.contains_key(*slot)) {
        return Err(ValidationError::MissingCertificates);
    }
    for (key, value) in certificates.iter_mut() {
        let Some(resolved) = resolve_reference(value) else {
            return Err(ValidationError::InvalidCertificateReference {
                key: key.clone(),
            });
        };
        *value = resolved;
    }
    Ok(())
}
