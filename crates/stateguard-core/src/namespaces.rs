// crates/stateguard-core/src/namespaces.rs
// ============================================================================
// Module: Namespace Validation
// Description: Engine intent and TLS credential rules per namespace.
// Purpose: Reject conflicting engine intents and unresolvable TLS material.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each namespace either reuses an existing engine, installs a managed one,
//! or wants no engine at all. A managed engine uses TLS only when all five
//! credential references are set; those references must then resolve and
//! are replaced by their resolved values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::error::ValidationStage;
use crate::log::NoteKind;
use crate::log::ValidationEvent;
use crate::log::ValidationLog;
use crate::model::Namespace;
use crate::resolver::resolve_reference;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Validates every namespace and resolves TLS credentials in place.
///
/// # Errors
///
/// Returns [`ValidationError`] for an empty mapping or the first namespace
/// that fails.
pub fn resolve_namespaces(
    namespaces: &mut BTreeMap<String, Namespace>,
    log: &dyn ValidationLog,
) -> Result<(), ValidationError> {
    if namespaces.is_empty() {
        return Err(ValidationError::NoNamespaces);
    }
    for (name, namespace) in namespaces.iter_mut() {
        resolve_namespace(name, namespace, log)?;
    }
    Ok(())
}

/// Validates a single namespace.
fn resolve_namespace(
    name: &str,
    namespace: &mut Namespace,
    log: &dyn ValidationLog,
) -> Result<(), ValidationError> {
    if namespace.install_engine && namespace.use_engine {
        return Err(ValidationError::ConflictingEngineIntent {
            namespace: name.to_string(),
        });
    }
    let (kind, message) = if namespace.use_engine {
        (NoteKind::EngineReused, "a pre-installed engine is used")
    } else if !namespace.install_engine {
        (NoteKind::EngineNotDesired, "no engine is desired")
    } else if namespace.tls_desired() {
        let resolved = namespace
            .tls_fields()
            .into_iter()
            .map(resolve_reference)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ValidationError::InvalidTlsCertificate {
                namespace: name.to_string(),
            })?;
        for (slot, value) in namespace.tls_fields_mut().into_iter().zip(resolved) {
            *slot = value;
        }
        (NoteKind::TlsEnabled, "the managed engine is deployed with TLS")
    } else {
        (NoteKind::TlsNotDesired, "the managed engine is deployed without TLS")
    };
    log.record(&ValidationEvent::note(
        ValidationStage::Namespaces,
        kind,
        Some(name),
        format!("{message} in namespace [ {name} ]"),
    ));
    Ok(())
}
