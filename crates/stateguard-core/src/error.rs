// crates/stateguard-core/src/error.rs
// ============================================================================
// Module: Validation Errors
// Description: Error taxonomy for desired-state validation.
// Purpose: Report the first actionable inconsistency as a single prefixed line.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every failure is terminal: the first failing rule aborts the pass and is
//! returned as a [`ValidationError`]. The rendered message is one line,
//! prefixed by the failing stage and naming the offending entity key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Stages
// ============================================================================

/// Validation pipeline stages, in execution order.
///
/// # Invariants
/// - Variants are stable for log labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStage {
    /// Global settings block.
    Settings,
    /// Certificate bundle.
    Certificates,
    /// Namespace declarations.
    Namespaces,
    /// Chart repositories.
    #[serde(rename = "repos")]
    Repositories,
    /// Application releases.
    Apps,
}

impl ValidationStage {
    /// Returns a stable label for the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Certificates => "certificates",
            Self::Namespaces => "namespaces",
            Self::Repositories => "repos",
            Self::Apps => "apps",
        }
    }
}

/// URL-valued settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField {
    /// Remote-cluster API URL.
    ClusterUri,
    /// Notification webhook URL.
    NotificationWebhook,
}

impl UrlField {
    /// Returns the document key of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClusterUri => "clusterURI",
            Self::NotificationWebhook => "slackWebhook",
        }
    }
}

impl std::fmt::Display for UrlField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a context identifier is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRequirement {
    /// No ambient context could be detected.
    NoAmbientContext,
    /// A remote-cluster URL is configured.
    RemoteCluster,
}

impl std::fmt::Display for ContextRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAmbientContext => f.write_str("no ambient cluster context was detected"),
            Self::RemoteCluster => f.write_str("clusterURI is defined"),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Desired-state validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The settings block is absent or entirely default.
    #[error("settings validation failed -- no settings table provided in state file")]
    MissingSettings,
    /// No usable context identifier.
    #[error("settings validation failed -- kubeContext must be provided: {reason}")]
    MissingContext {
        /// Why the context identifier is required.
        reason: ContextRequirement,
    },
    /// A URL-valued settings field is not an absolute URL.
    #[error("settings validation failed -- {field} must be a valid absolute URL")]
    InvalidUrl {
        /// Offending settings field.
        field: UrlField,
    },
    /// Cluster URL configured without a username.
    #[error("settings validation failed -- username must be provided if clusterURI is defined")]
    MissingUsername,
    /// Cluster URL configured without a password.
    #[error("settings validation failed -- password must be provided if clusterURI is defined")]
    MissingPassword,
    /// Cluster URL configured without `caCrt` and `caKey`.
    #[error(
        "certificates validation failed -- a clusterURI is configured but [caCrt] and [caKey] \
         are not both provided under certificates"
    )]
    MissingCertificates,
    /// A certificate entry does not resolve.
    #[error(
        "certificates validation failed -- [ {key} ] must be a valid s3:// or gs:// URL or an \
         existing file path"
    )]
    InvalidCertificateReference {
        /// Offending certificate slot.
        key: String,
    },
    /// Both engine intents are set for a namespace.
    #[error(
        "namespaces validation failed -- installTiller and useTiller can't be used together for \
         namespace [ {namespace} ]"
    )]
    ConflictingEngineIntent {
        /// Offending namespace.
        namespace: String,
    },
    /// A TLS credential of a namespace does not resolve.
    #[error(
        "namespaces validation failed -- some certs/keys are not valid for engine TLS in \
         namespace [ {namespace} ]"
    )]
    InvalidTlsCertificate {
        /// Offending namespace.
        namespace: String,
    },
    /// The namespace mapping is empty.
    #[error("namespaces validation failed -- at least one namespace is required")]
    NoNamespaces,
    /// The repository mapping is empty.
    #[error("repos validation failed -- at least one helm repo is required")]
    NoRepositories,
    /// A repository URL is not an absolute URL.
    #[error("repos validation failed -- repo [ {repository} ] must have a valid URL")]
    InvalidRepositoryUrl {
        /// Offending repository key.
        repository: String,
    },
    /// A release failed its per-release rules.
    #[error("apps validation failed -- for app [ {app} ]: {source}")]
    ReleaseValidationFailed {
        /// Offending application label.
        app: String,
        /// Underlying release rule failure.
        source: ReleaseRuleError,
    },
}

impl ValidationError {
    /// Returns the pipeline stage that raised the error.
    #[must_use]
    pub const fn stage(&self) -> ValidationStage {
        match self {
            Self::MissingSettings
            | Self::MissingContext {
                ..
            }
            | Self::InvalidUrl {
                ..
            }
            | Self::MissingUsername
            | Self::MissingPassword => ValidationStage::Settings,
            Self::MissingCertificates
            | Self::InvalidCertificateReference {
                ..
            } => ValidationStage::Certificates,
            Self::ConflictingEngineIntent {
                ..
            }
            | Self::InvalidTlsCertificate {
                ..
            }
            | Self::NoNamespaces => ValidationStage::Namespaces,
            Self::NoRepositories
            | Self::InvalidRepositoryUrl {
                ..
            } => ValidationStage::Repositories,
            Self::ReleaseValidationFailed {
                ..
            } => ValidationStage::Apps,
        }
    }
}

/// Per-release rule failures reported by a release checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseRuleError {
    /// Release name is blank.
    #[error("release name must be provided")]
    MissingName,
    /// Release namespace is blank.
    #[error("release namespace must be provided")]
    MissingNamespace,
    /// Release targets a namespace that is not declared.
    #[error("namespace [ {namespace} ] is not declared under namespaces")]
    UndeclaredNamespace {
        /// Undeclared namespace.
        namespace: String,
    },
    /// Chart reference is blank.
    #[error("chart must be provided")]
    MissingChart,
    /// Chart reference names an undeclared repository.
    #[error("chart repository [ {repository} ] is not declared under helmRepos")]
    UnknownRepository {
        /// Undeclared repository.
        repository: String,
    },
    /// Chart version is blank.
    #[error("chart version must be provided")]
    MissingVersion,
    /// Both `valuesFile` and `valuesFiles` are set.
    #[error("valuesFile and valuesFiles can't be used together")]
    ConflictingValuesFiles,
    /// A values file is not a readable YAML file.
    #[error("values file [ {path} ] must be an existing .yaml or .yml file")]
    InvalidValuesFile {
        /// Offending values file path.
        path: String,
    },
    /// The `(namespace, name)` pair was already declared.
    #[error("release name [ {name} ] is already used in namespace [ {namespace} ]")]
    DuplicateRelease {
        /// Namespace of the colliding release.
        namespace: String,
        /// Colliding release name.
        name: String,
    },
}
