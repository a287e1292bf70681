// crates/stateguard-config/src/loader.rs
// ============================================================================
// Module: Desired-State Loader
// Description: Reads desired-state documents from disk with hard limits.
// Purpose: Produce a parsed `DesiredState` for the validator.
// Dependencies: serde_yaml, stateguard-core, thiserror, toml
// ============================================================================

//! ## Overview
//! Documents are loaded from TOML or YAML files selected by extension.
//! Environment variables referenced as `$NAME` or `${NAME}` inside string
//! values are substituted after decoding, so secrets can stay out of the
//! file and a substituted value can never alter document structure. Several
//! documents can be merged, later files taking precedence.
//! Security posture: document inputs are untrusted; path and size limits
//! fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use stateguard_core::DesiredState;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default desired-state filename when no path is specified.
const DEFAULT_STATE_NAME: &str = "stateguard.toml";
/// Environment variable used to override the desired-state path.
pub const STATE_ENV_VAR: &str = "STATEGUARD_STATE";
/// Maximum desired-state file size in bytes.
pub const MAX_STATE_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Desired-state loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O failure while reading the document.
    #[error("state io error: {0}")]
    Io(String),
    /// TOML or YAML decoding error.
    #[error("state parse error: {0}")]
    Parse(String),
    /// Invalid document input.
    #[error("invalid state file: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFormat {
    /// TOML document.
    Toml,
    /// YAML document.
    Yaml,
}

impl StateFormat {
    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] for unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LoadError::Invalid(
                "state file must have a .toml, .yaml, or .yml extension".to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a desired state using the default resolution rules.
///
/// # Errors
///
/// Returns [`LoadError`] when the path, size, encoding, or content is invalid.
pub fn load_state(path: Option<&Path>) -> Result<DesiredState, LoadError> {
    let resolved = resolve_path(path)?;
    validate_path(&resolved)?;
    let bytes = fs::read(&resolved).map_err(|err| LoadError::Io(err.to_string()))?;
    if bytes.len() > MAX_STATE_FILE_SIZE {
        return Err(LoadError::Invalid("state file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| LoadError::Invalid("state file must be utf-8".to_string()))?;
    let mut state = parse_state(content, StateFormat::from_path(&resolved)?)?;
    expand_state(&mut state, |name| env::var(name).ok());
    Ok(state)
}

/// Loads several desired states and merges them in order.
///
/// # Errors
///
/// Returns [`LoadError`] for the first document that fails to load, or when
/// no paths are given.
pub fn load_states(paths: &[PathBuf]) -> Result<DesiredState, LoadError> {
    let Some((first, rest)) = paths.split_first() else {
        return Err(LoadError::Invalid("at least one state file is required".to_string()));
    };
    let mut merged = load_state(Some(first))?;
    for path in rest {
        merge_state(&mut merged, load_state(Some(path))?);
    }
    Ok(merged)
}

/// Decodes a desired state from text.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when decoding fails.
pub fn parse_state(content: &str, format: StateFormat) -> Result<DesiredState, LoadError> {
    match format {
        StateFormat::Toml => {
            toml::from_str(content).map_err(|err| LoadError::Parse(err.to_string()))
        }
        StateFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(DesiredState::default());
            }
            serde_yaml::from_str(content).map_err(|err| LoadError::Parse(err.to_string()))
        }
    }
}

// ============================================================================
// SECTION: Merging
// ============================================================================

/// Merges `overlay` into `base`.
///
/// Map entries are merged per key with the overlay winning; settings are
/// replaced only when the overlay sets any of them; apps are merged when
/// either side declares them.
pub fn merge_state(base: &mut DesiredState, overlay: DesiredState) {
    base.metadata.extend(overlay.metadata);
    base.certificates.extend(overlay.certificates);
    if !overlay.settings.is_unset() {
        base.settings = overlay.settings;
    }
    base.namespaces.extend(overlay.namespaces);
    base.repositories.extend(overlay.repositories);
    if let Some(apps) = overlay.apps {
        base.apps.get_or_insert_with(Default::default).extend(apps);
    }
}

// ============================================================================
// SECTION: Environment Substitution
// ============================================================================

/// Expands environment references in every string value of a decoded state.
///
/// Map keys and non-string values are left alone.
pub fn expand_state(state: &mut DesiredState, lookup: impl Fn(&str) -> Option<String>) {
    let expand = |value: &mut String| {
        if value.contains('$') {
            *value = expand_env(value.as_str(), &lookup);
        }
    };
    state.metadata.values_mut().for_each(&expand);
    state.certificates.values_mut().for_each(&expand);
    let settings = &mut state.settings;
    for value in [
        &mut settings.kube_context,
        &mut settings.username,
        &mut settings.password,
        &mut settings.cluster_uri,
        &mut settings.service_account,
        &mut settings.storage_backend,
        &mut settings.notification_webhook,
    ] {
        expand(value);
    }
    for namespace in state.namespaces.values_mut() {
        for value in [
            &mut namespace.ca_cert,
            &mut namespace.client_cert,
            &mut namespace.client_key,
            &mut namespace.engine_cert,
            &mut namespace.engine_key,
        ] {
            expand(value);
        }
    }
    for repository in state.repositories.values_mut() {
        for value in [&mut repository.url, &mut repository.username, &mut repository.password] {
            expand(value);
        }
    }
    for release in state.apps.iter_mut().flat_map(|apps| apps.values_mut()) {
        for value in [
            &mut release.name,
            &mut release.description,
            &mut release.namespace,
            &mut release.chart,
            &mut release.version,
            &mut release.values_file,
        ] {
            expand(value);
        }
        release.values_files.iter_mut().for_each(&expand);
        release.set.values_mut().for_each(&expand);
    }
}

/// Expands `$NAME` and `${NAME}` references using `lookup`.
///
/// Unknown variables expand to the empty string and `$$` yields a literal
/// `$`. A `$` not followed by a name is kept as is.
#[must_use]
pub fn expand_env(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(index) = rest.find('$') {
        out.push_str(&rest[.. index]);
        let after = &rest[index + 1 ..];
        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) if is_var_name(&braced[.. end]) => {
                    out.push_str(&lookup(&braced[.. end]).unwrap_or_default());
                    rest = &braced[end + 1 ..];
                }
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
        } else {
            let end = after
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(after.len());
            let name = &after[.. end];
            if is_var_name(name) {
                out.push_str(&lookup(name).unwrap_or_default());
            } else {
                out.push('$');
            }
            rest = if is_var_name(name) { &after[end ..] } else { after };
        }
    }
    out.push_str(rest);
    out
}

/// Returns true for a valid environment variable name.
fn is_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the desired-state path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, LoadError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(STATE_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(LoadError::Invalid("state path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_STATE_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), LoadError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(LoadError::Invalid("state path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(LoadError::Invalid("state path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
