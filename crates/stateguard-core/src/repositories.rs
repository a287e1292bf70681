// crates/stateguard-core/src/repositories.rs
// ============================================================================
// Module: Repository Validation
// Description: URL rules for chart repositories.
// Purpose: Ensure every repository entry names an absolute URL.
// Dependencies: url
// ============================================================================

//! Repository credentials are not inspected here; they are the concern of
//! whatever performs the authenticated fetch.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::model::Repository;
use crate::resolver::parse_absolute_url;

/// Validates the repository mapping.
///
/// # Errors
///
/// Returns [`ValidationError::NoRepositories`] for an empty mapping and
/// [`ValidationError::InvalidRepositoryUrl`] for the first invalid URL.
pub fn validate_repositories(
    repositories: &BTreeMap<String, Repository>,
) -> Result<(), ValidationError> {
    if repositories.is_empty() {
        return Err(ValidationError::NoRepositories);
    }
    if let Some((name, _)) =
        repositories.iter().find(|(_, repository)| parse_absolute_url(&repository.url).is_none())
    {
        return Err(ValidationError::InvalidRepositoryUrl {
            repository: name.clone(),
        });
    }
    Ok(())
}
