// crates/stateguard-config/src/kubeconfig.rs
// ============================================================================
// Module: Ambient Kube Context Detection
// Description: Detects whether a local kubeconfig selects a current context.
// Purpose: Supply the ambient-context flag consumed by settings validation.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! A desired state may omit `kubeContext` when the local kubeconfig already
//! selects one. The kubeconfig is located through `KUBECONFIG` (first entry
//! of the list) or `$HOME/.kube/config`. Unreadable or malformed files count
//! as "no ambient context".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable listing kubeconfig files.
pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";
/// Maximum kubeconfig size read for detection.
const MAX_KUBECONFIG_SIZE: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// The subset of a kubeconfig needed for detection.
#[derive(Debug, Deserialize)]
struct KubeConfig {
    /// Selected context name.
    #[serde(default, rename = "current-context")]
    current_context: Option<String>,
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Returns true when the default kubeconfig selects a current context.
#[must_use]
pub fn ambient_context_available() -> bool {
    default_kubeconfig_path().and_then(|path| current_context(&path)).is_some()
}

/// Returns the current context selected by the kubeconfig at `path`.
#[must_use]
pub fn current_context(path: &Path) -> Option<String> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() || meta.len() > MAX_KUBECONFIG_SIZE {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    let config: KubeConfig = serde_yaml::from_str(&content).ok()?;
    config.current_context.map(|name| name.trim().to_string()).filter(|name| !name.is_empty())
}

/// Locates the kubeconfig consulted for detection.
#[must_use]
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    if let Some(list) = env::var_os(KUBECONFIG_ENV_VAR)
        && let Some(first) = env::split_paths(&list).find(|path| !path.as_os_str().is_empty())
    {
        return Some(first);
    }
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".kube").join("config"))
}
