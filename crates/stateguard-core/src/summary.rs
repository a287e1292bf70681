// crates/stateguard-core/src/summary.rs
// ============================================================================
// Module: Desired-State Summary
// Description: Human-readable rendering of a desired state.
// Purpose: Let operators review the document the validator saw.
// Dependencies: none
// ============================================================================

//! Secrets are never rendered: settings and repository passwords appear as
//! a fixed mask when set.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::model::DesiredState;

/// Replacement text for secret values.
const REDACTED: &str = "******";

impl DesiredState {
    /// Renders the state as sectioned plain text.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        section(&mut out, "Metadata");
        render_map(&mut out, &self.metadata);
        section(&mut out, "Certificates");
        render_map(&mut out, &self.certificates);

        section(&mut out, "Settings");
        let settings = &self.settings;
        let _ = writeln!(out, "  kubeContext: {}", settings.kube_context);
        let _ = writeln!(out, "  username: {}", settings.username);
        let _ = writeln!(out, "  password: {}", mask(&settings.password));
        let _ = writeln!(out, "  clusterURI: {}", settings.cluster_uri);
        let _ = writeln!(out, "  serviceAccount: {}", settings.service_account);
        let _ = writeln!(out, "  storageBackend: {}", settings.storage_backend);
        let _ = writeln!(out, "  slackWebhook: {}", settings.notification_webhook);
        let _ = writeln!(out, "  reverseDelete: {}", settings.reverse_delete);

        section(&mut out, "Namespaces");
        for (name, namespace) in &self.namespaces {
            let _ = writeln!(
                out,
                "  {name}: installEngine={} useEngine={} protected={} tls={}",
                namespace.install_engine,
                namespace.use_engine,
                namespace.protected,
                namespace.tls_desired()
            );
        }

        section(&mut out, "Repositories");
        for (name, repository) in &self.repositories {
            let _ = write!(out, "  {name}: {}", repository.url);
            if !repository.username.is_empty() {
                let _ = write!(
                    out,
                    " (user {}, password {})",
                    repository.username,
                    mask(&repository.password)
                );
            }
            out.push('\n');
        }

        section(&mut out, "Applications");
        match &self.apps {
            None => out.push_str("  (none declared)\n"),
            Some(apps) => {
                for (app, release) in apps {
                    let _ = writeln!(
                        out,
                        "  {app}: release={} namespace={} chart={} version={} enabled={} \
                         priority={}",
                        release.name,
                        release.namespace,
                        release.chart,
                        release.version,
                        release.enabled,
                        release.priority
                    );
                }
            }
        }
        out
    }
}

/// Writes a section heading.
fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, "{}", "-".repeat(title.len() + 1));
}

/// Writes `key: value` lines for a string map.
fn render_map(out: &mut String, map: &BTreeMap<String, String>) {
    for (key, value) in map {
        let _ = writeln!(out, "  {key}: {value}");
    }
}

/// Masks a secret value when set.
fn mask(value: &str) -> &str {
    if value.is_empty() { "" } else { REDACTED }
}
