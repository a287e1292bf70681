// crates/stateguard-cli/src/lib.rs
// ============================================================================
// Module: Stateguard CLI Library
// Description: Shared helpers for the Stateguard command-line interface.
// Purpose: Provide reusable components (message catalog) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities, including the message
//! catalog. The binary entry point (`src/main.rs`) imports these helpers to
//! keep all user-facing output consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog helpers.
pub mod i18n;
