//! # Core Module
//!
//! The interface-agnostic organization engine.
//!
//! ## Modules
//! - `scanner` - Discovers media files in directories
//! - `hasher` - Computes content fingerprints for duplicate detection
//! - `registry` - Classifies fingerprints as original or duplicate
//! - `metadata` - Extracts capture timestamps and GPS coordinates
//! - `geocode` - Resolves coordinates to location labels, with caching
//! - `planner` - Computes deterministic destination paths
//! - `relocate` - Moves files into the output and trash trees
//! - `pipeline` - Orchestrates the full workflow

pub mod geocode;
pub mod hasher;
pub mod metadata;
pub mod pipeline;
pub mod planner;
pub mod registry;
pub mod relocate;
pub mod scanner;

// Convenience re-exports for the common types
pub use geocode::{GeocodeCache, ResolvedLocation, ReverseGeocoder};
pub use hasher::{Fingerprint, FingerprintStrategy};
pub use metadata::CaptureMetadata;
pub use pipeline::{Organizer, RunOptions, RunReport, RunStatus};
pub use scanner::{MediaFile, MediaKind};
