// crates/stateguard-core/src/lib.rs
// ============================================================================
// Module: Stateguard Core Library
// Description: Desired-state model and pre-flight validation.
// Purpose: Reject inconsistent desired states before any mutating action runs.
// Dependencies: serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! `stateguard-core` checks a parsed desired-state document for internal
//! consistency before install, upgrade, or delete operations are attempted
//! against a cluster. Validation is an ordered set of short-circuiting rules
//! (settings, certificates, namespaces, repositories, apps); the first
//! violation is reported as a single prefixed line.
//!
//! Validation resolves credential references and writes the resolved values
//! back into the document so downstream consumers see canonical values; see
//! [`Validator::resolve`] and [`ResolvedState::commit`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod certificates;
pub mod error;
pub mod log;
pub mod model;
pub mod namespaces;
pub mod pipeline;
pub mod registry;
pub mod release;
pub mod releases;
pub mod repositories;
pub mod resolver;
pub mod settings;
mod summary;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ContextRequirement;
pub use error::ReleaseRuleError;
pub use error::UrlField;
pub use error::ValidationError;
pub use error::ValidationStage;
pub use log::FileValidationLog;
pub use log::MemoryValidationLog;
pub use log::NoopValidationLog;
pub use log::NoteKind;
pub use log::StderrValidationLog;
pub use log::ValidationEvent;
pub use log::ValidationLog;
pub use model::Certificates;
pub use model::DesiredState;
pub use model::Namespace;
pub use model::Release;
pub use model::Repository;
pub use model::Settings;
pub use pipeline::ResolvedState;
pub use pipeline::ValidationContext;
pub use pipeline::ValidationOutcome;
pub use pipeline::Validator;
pub use registry::UniquenessRegistry;
pub use release::DefaultReleaseChecker;
pub use release::ReleaseChecker;
pub use resolver::resolve_reference;
