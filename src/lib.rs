//! # Media Organizer
//!
//! A media organization pipeline: scan a directory tree, detect
//! duplicates by content fingerprint, read capture metadata, resolve
//! GPS coordinates to place names, and relocate every file into a
//! deterministic date/location folder layout.
//!
//! ## Core Philosophy
//! - **Never delete** - Duplicates are quarantined to a trash folder, never removed
//! - **Degrade, don't halt** - Missing metadata or failed lookups fall back to
//!   safe defaults; a single bad file never stops a run
//! - **Deterministic** - The same inputs always plan the same destinations
//!
//! ## Architecture
//! The library is split into a core engine (interface-agnostic) and presentation layers:
//! - `core` - The organization pipeline
//! - `events` - Event-driven progress reporting and run controls
//! - `error` - Per-subsystem error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    // Ignore the error when a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}
