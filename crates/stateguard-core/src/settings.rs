// crates/stateguard-core/src/settings.rs
// ============================================================================
// Module: Settings Validation
// Description: Rules for the global settings block.
// Purpose: Establish cluster identity and remote-cluster mode before other stages.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Either no remote-cluster URL is configured (a context identifier or an
//! ambient context is enough), or the URL, context, username, and password
//! are all configured together. A notification webhook, when present, must
//! be an absolute URL.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::ContextRequirement;
use crate::error::UrlField;
use crate::error::ValidationError;
use crate::model::Settings;
use crate::pipeline::ValidationContext;
use crate::resolver::parse_absolute_url;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the settings block.
///
/// # Errors
///
/// Returns [`ValidationError`] for the first settings rule that fails.
pub fn validate_settings(
    settings: &Settings,
    context: &ValidationContext,
) -> Result<(), ValidationError> {
    if settings.is_unset() {
        return Err(ValidationError::MissingSettings);
    }
    let has_context = !settings.kube_context.trim().is_empty();
    if !has_context && !context.ambient_context() {
        return Err(ValidationError::MissingContext {
            reason: ContextRequirement::NoAmbientContext,
        });
    }
    if settings.remote_cluster() {
        if parse_absolute_url(&settings.cluster_uri).is_none() {
            return Err(ValidationError::InvalidUrl {
                field: UrlField::ClusterUri,
            });
        }
        if !has_context {
            return Err(ValidationError::MissingContext {
                reason: ContextRequirement::RemoteCluster,
            });
        }
        if settings.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if settings.password.trim().is_empty() {
            return Err(ValidationError::MissingPassword);
        }
    }
    if !settings.notification_webhook.trim().is_empty()
        && parse_absolute_url(&settings.notification_webhook).is_none()
    {
        return Err(ValidationError::InvalidUrl {
            field: UrlField::NotificationWebhook,
        });
    }
    Ok(())
}
