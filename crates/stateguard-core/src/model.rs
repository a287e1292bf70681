// crates/stateguard-core/src/model.rs
// ============================================================================
// Module: Desired-State Model
// Description: Typed representation of a desired-state document.
// Purpose: Provide the shared aggregate that validation borrows and resolves.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The desired state is the declarative description of every namespace,
//! chart repository, and application release that should exist on a target
//! cluster. Document keys follow the established state-file spelling
//! (`kubeContext`, `clusterURI`, `helmRepos`, `installTiller`, ...), with
//! engine-neutral aliases accepted alongside.
//!
//! ## Invariants
//! - Maps are ordered (`BTreeMap`) so validation and rendering are
//!   deterministic.
//! - `apps` distinguishes "never set" (`None`) from "present but empty".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Aggregate
// ============================================================================

/// Certificate bundle keyed by semantic slot name (`caCrt`, `caKey`, ...).
pub type Certificates = BTreeMap<String, String>;

/// Root aggregate of a desired-state document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Free-form document metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Certificate references used for remote-cluster connectivity.
    #[serde(default)]
    pub certificates: Certificates,
    /// Global settings block.
    #[serde(default)]
    pub settings: Settings,
    /// Declared namespaces keyed by namespace name.
    #[serde(default)]
    pub namespaces: BTreeMap<String, Namespace>,
    /// Declared chart repositories keyed by repository name.
    #[serde(default, rename = "helmRepos", alias = "repositories")]
    pub repositories: BTreeMap<String, Repository>,
    /// Declared application releases keyed by application label.
    #[serde(default)]
    pub apps: Option<BTreeMap<String, Release>>,
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Global settings for the target cluster and notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Cluster context identifier.
    #[serde(default)]
    pub kube_context: String,
    /// Username for remote-cluster connectivity.
    #[serde(default)]
    pub username: String,
    /// Password for remote-cluster connectivity.
    #[serde(default)]
    pub password: String,
    /// Optional remote-cluster API URL.
    #[serde(default, rename = "clusterURI", alias = "clusterUri")]
    pub cluster_uri: String,
    /// Optional service account used by the managed engine.
    #[serde(default)]
    pub service_account: String,
    /// Optional release storage backend selector.
    #[serde(default)]
    pub storage_backend: String,
    /// Optional notification webhook URL.
    #[serde(default, rename = "slackWebhook", alias = "notificationWebhook")]
    pub notification_webhook: String,
    /// Delete releases in reverse priority order.
    #[serde(default)]
    pub reverse_delete: bool,
}

impl Settings {
    /// Returns true when every field is at its default value.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true when a remote-cluster URL is configured.
    #[must_use]
    pub fn remote_cluster(&self) -> bool {
        !self.cluster_uri.trim().is_empty()
    }
}

// ============================================================================
// SECTION: Namespaces
// ============================================================================

/// Per-namespace deployment-engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Install a managed engine into this namespace.
    #[serde(default, rename = "installTiller", alias = "installEngine")]
    pub install_engine: bool,
    /// Use an engine that already exists in this namespace.
    #[serde(default, rename = "useTiller", alias = "useEngine")]
    pub use_engine: bool,
    /// Protect releases in this namespace from destructive changes.
    #[serde(default)]
    pub protected: bool,
    /// CA certificate reference for engine TLS.
    #[serde(default)]
    pub ca_cert: String,
    /// Client certificate reference for engine TLS.
    #[serde(default)]
    pub client_cert: String,
    /// Client key reference for engine TLS.
    #[serde(default)]
    pub client_key: String,
    /// Engine certificate reference.
    #[serde(default, rename = "tillerCert", alias = "engineCert")]
    pub engine_cert: String,
    /// Engine key reference.
    #[serde(default, rename = "tillerKey", alias = "engineKey")]
    pub engine_key: String,
}

impl Namespace {
    /// Returns true when all five TLS credential references are non-blank.
    ///
    /// A single blank field disables TLS for the namespace entirely.
    #[must_use]
    pub fn tls_desired(&self) -> bool {
        self.tls_fields().iter().all(|value| !value.trim().is_empty())
    }

    /// Returns the TLS credential references in a fixed order.
    #[must_use]
    pub fn tls_fields(&self) -> [&str; 5] {
        [
            self.ca_cert.as_str(),
            self.client_cert.as_str(),
            self.client_key.as_str(),
            self.engine_cert.as_str(),
            self.engine_key.as_str(),
        ]
    }

    /// Returns mutable handles to the TLS credential references.
    pub(crate) fn tls_fields_mut(&mut self) -> [&mut String; 5] {
        [
            &mut self.ca_cert,
            &mut self.client_cert,
            &mut self.client_key,
            &mut self.engine_cert,
            &mut self.engine_key,
        ]
    }
}

// ============================================================================
// SECTION: Repositories
// ============================================================================

/// Chart repository entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository source URL.
    #[serde(default)]
    pub url: String,
    /// Optional username for authenticated fetches.
    #[serde(default)]
    pub username: String,
    /// Optional password for authenticated fetches.
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// SECTION: Releases
// ============================================================================

/// One declared application release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Release name, unique within its namespace.
    #[serde(default)]
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Target namespace.
    #[serde(default)]
    pub namespace: String,
    /// Whether the release should exist at all.
    #[serde(default)]
    pub enabled: bool,
    /// Chart reference (`repo/chart` or a local path).
    #[serde(default)]
    pub chart: String,
    /// Chart version.
    #[serde(default)]
    pub version: String,
    /// Single values file.
    #[serde(default)]
    pub values_file: String,
    /// Ordered list of values files.
    #[serde(default)]
    pub values_files: Vec<String>,
    /// Inline value overrides.
    #[serde(default)]
    pub set: BTreeMap<String, String>,
    /// Wait for resources to become ready.
    #[serde(default)]
    pub wait: bool,
    /// Operation timeout in seconds.
    #[serde(default)]
    pub timeout: u64,
    /// Ordering priority (lower runs first).
    #[serde(default)]
    pub priority: i32,
    /// Protect the release from destructive changes.
    #[serde(default)]
    pub protected: bool,
    /// Purge release history on delete.
    #[serde(default)]
    pub purge: bool,
    /// Run chart tests after install or upgrade.
    #[serde(default)]
    pub test: bool,
}
