// crates/stateguard-config/src/lib.rs
// ============================================================================
// Module: Stateguard Config Library
// Description: Desired-state loading and ambient context detection.
// Purpose: Turn files on disk into a `DesiredState` plus validation context.
// Dependencies: serde, serde_yaml, stateguard-core, toml
// ============================================================================

//! ## Overview
//! `stateguard-config` loads desired-state documents (TOML or YAML) with
//! strict, fail-closed limits and detects whether a local kubeconfig already
//! provides an ambient cluster context.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod kubeconfig;
pub mod loader;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use kubeconfig::ambient_context_available;
pub use loader::LoadError;
pub use loader::StateFormat;
pub use loader::expand_state;
pub use loader::load_state;
pub use loader::load_states;
pub use loader::merge_state;
pub use loader::parse_state;
