// crates/stateguard-core/src/resolver.rs
// ============================================================================
// Module: Credential Reference Resolver
// Description: Liveness check for certificate and key references.
// Purpose: Decide whether a reference names remote object storage or a local file.
// Dependencies: url
// ============================================================================

//! ## Overview
//! A credential reference is either an object-storage URI (`s3://` or
//! `gs://`) or a path that exists on the local filesystem at validation
//! time. Resolution is a pass-through: a valid reference resolves to itself,
//! which keeps the resolver idempotent on its own output.
//!
//! The filesystem check is a point-in-time probe; a file deleted after
//! validation is not detected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// URL schemes accepted as remote object storage.
pub const OBJECT_STORAGE_SCHEMES: &[&str] = &["s3", "gs"];

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a credential reference.
///
/// Returns the canonical value when the reference is an object-storage URI
/// or an existing local path, and `None` otherwise. Blank input never
/// resolves.
#[must_use]
pub fn resolve_reference(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    if is_object_storage_uri(value) || fs::metadata(value).is_ok() {
        return Some(value.to_string());
    }
    None
}

/// Returns true when the value is an absolute object-storage URI.
#[must_use]
pub fn is_object_storage_uri(value: &str) -> bool {
    parse_absolute_url(value)
        .is_some_and(|url| OBJECT_STORAGE_SCHEMES.contains(&url.scheme()))
}

/// Parses a value as an absolute URL.
///
/// Relative references and opaque forms such as `mailto:` are rejected.
#[must_use]
pub fn parse_absolute_url(value: &str) -> Option<Url> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Url::parse(trimmed).ok().filter(|url| !url.cannot_be_a_base())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
