// crates/stateguard-cli/src/main.rs
// ============================================================================
// Module: Stateguard CLI Entry Point
// Description: Command dispatcher for desired-state validation workflows.
// Purpose: Load, validate, and display desired-state documents from the shell.
// Dependencies: clap, stateguard-config, stateguard-core, thiserror.
// ============================================================================

//! ## Overview
//! The Stateguard CLI loads one or more desired-state documents, validates
//! them in place, and reports the outcome. All user-facing strings are routed
//! through the message catalog. Security posture: documents are untrusted;
//! the loader enforces path and size limits before decoding.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use stateguard_cli::t;
use stateguard_config::ambient_context_available;
use stateguard_config::load_state;
use stateguard_config::load_states;
use stateguard_core::DesiredState;
use stateguard_core::FileValidationLog;
use stateguard_core::StderrValidationLog;
use stateguard_core::ValidationContext;
use stateguard_core::ValidationLog;
use stateguard_core::ValidationOutcome;
use stateguard_core::Validator;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "stateguard", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a desired state and resolve its credential references.
    Validate(ValidateCommand),
    /// Print a desired state without validating it.
    Show(ShowCommand),
}

/// Arguments for `stateguard validate`.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Desired-state documents, merged in order (defaults to `STATEGUARD_STATE`
    /// or `stateguard.toml`).
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    files: Vec<PathBuf>,
    /// Namespace forced onto every release; skips namespace validation.
    #[arg(long = "ns-override", value_name = "NAMESPACE")]
    ns_override: Option<String>,
    /// Append validation notes to this file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Print the resolved desired state after a successful validation.
    #[arg(long, action = ArgAction::SetTrue)]
    show: bool,
}

/// Arguments for `stateguard show`.
#[derive(Args, Debug)]
struct ShowCommand {
    /// Desired-state documents, merged in order.
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    files: Vec<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog-rendered error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    match cli.command {
        Some(Commands::Validate(command)) => command_validate(&command),
        Some(Commands::Show(command)) => command_show(&command),
        None => {
            let help = <Cli as clap::CommandFactory>::command().render_help().to_string();
            write_stdout_line(&help).map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs `stateguard validate`.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let mut state = load_documents(&command.files)?;
    let context = build_context(command.ns_override.as_deref(), ambient_context_available());
    if state.settings.kube_context.trim().is_empty() && context.ambient_context() {
        write_stderr_line(&t!("validate.ambient_context"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    let log = open_log(command.log_file.as_deref())?;
    let validator = Validator::new(context).with_log(log);
    let outcome = match validator.validate_in_place(&mut state) {
        Ok(outcome) => outcome,
        Err(err) => return Ok(emit_error(&t!("validate.failed", error = err))),
    };
    let message = match outcome {
        ValidationOutcome::Ready => t!("validate.ok"),
        ValidationOutcome::NoApplications => t!("validate.no_apps"),
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if command.show {
        print_summary(&state)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs `stateguard show`.
fn command_show(command: &ShowCommand) -> CliResult<ExitCode> {
    let state = load_documents(&command.files)?;
    print_summary(&state)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and merges the given documents, or the default document when none
/// are given.
fn load_documents(files: &[PathBuf]) -> CliResult<DesiredState> {
    let loaded = if files.is_empty() { load_state(None) } else { load_states(files) };
    loaded.map_err(|err| CliError::new(t!("state.load_failed", error = err)))
}

/// Builds the validation context from CLI inputs.
fn build_context(ns_override: Option<&str>, ambient: bool) -> ValidationContext {
    let context = ValidationContext::new().with_ambient_context(ambient);
    match ns_override {
        Some(namespace) => context.with_namespace_override(namespace),
        None => context,
    }
}

/// Opens the note sink: a JSON-lines file when requested, stderr otherwise.
fn open_log(path: Option<&Path>) -> CliResult<Arc<dyn ValidationLog>> {
    match path {
        Some(path) => {
            let sink = FileValidationLog::new(path).map_err(|err| {
                CliError::new(t!("log.open_failed", path = path.display(), error = err))
            })?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrValidationLog)),
    }
}

/// Writes the rendered summary of `state` to stdout.
fn print_summary(state: &DesiredState) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{}", t!("show.header"))
        .and_then(|()| write!(&mut stdout, "{}", state.render_summary()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.stdout"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
