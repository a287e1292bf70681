// crates/stateguard-core/src/log.rs
// ============================================================================
// Module: Validation Logging
// Description: Structured informational events emitted during validation.
// Purpose: Route non-fatal validation notes without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Conditions that do not fail validation (unused certificates, engine not
//! desired, namespace override active, ...) are reported as
//! [`ValidationEvent`]s through a [`ValidationLog`] sink. Sinks write JSON
//! lines so deployments can route them to their preferred pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::error::ValidationStage;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Informational note kinds.
///
/// # Invariants
/// - Variants are stable for log labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// Certificates were provided without a remote-cluster URL.
    CertificatesUnused,
    /// Namespace override skips namespace validation.
    NamespaceOverride,
    /// A pre-existing engine is used in the namespace.
    EngineReused,
    /// No engine is desired in the namespace.
    EngineNotDesired,
    /// The managed engine is installed with TLS.
    TlsEnabled,
    /// The managed engine is installed without TLS.
    TlsNotDesired,
    /// No applications are declared.
    NoApplications,
}

/// Validation log event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Stage emitting the note.
    pub stage: ValidationStage,
    /// Note classification.
    pub kind: NoteKind,
    /// Entity key the note refers to, when any.
    pub subject: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl ValidationEvent {
    /// Creates a new note event with a consistent timestamp.
    #[must_use]
    pub fn note(
        stage: ValidationStage,
        kind: NoteKind,
        subject: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "validation_note",
            timestamp_ms,
            stage,
            kind,
            subject: subject.map(ToString::to_string),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for validation events.
pub trait ValidationLog: Send + Sync {
    /// Record a validation event.
    fn record(&self, event: &ValidationEvent);
}

/// No-op validation log.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopValidationLog;

impl ValidationLog for NoopValidationLog {
    fn record(&self, _event: &ValidationEvent) {}
}

/// Validation log that writes JSON lines to stderr.
pub struct StderrValidationLog;

impl ValidationLog for StderrValidationLog {
    fn record(&self, event: &ValidationEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Validation log that appends JSON lines to a file.
pub struct FileValidationLog {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileValidationLog {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationLog for FileValidationLog {
    fn record(&self, event: &ValidationEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Validation log that retains events in memory.
#[derive(Default)]
pub struct MemoryValidationLog {
    /// Recorded events in emission order.
    events: Mutex<Vec<ValidationEvent>>,
}

impl MemoryValidationLog {
    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ValidationEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the kinds of the recorded events, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<NoteKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }
}

impl ValidationLog for MemoryValidationLog {
    fn record(&self, event: &ValidationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
